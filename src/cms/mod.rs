//! Headless CMS access layer
//!
//! This module talks to the content API: wire-level record types,
//! the query client, and the error kinds surfaced to callers.

pub mod client;
pub mod record;

pub use client::CmsClient;

use thiserror::Error;

/// Errors produced while fetching or normalizing CMS content
#[derive(Debug, Error)]
pub enum CmsError {
    /// The network request failed or the CMS answered a non-success status
    #[error("failed to fetch from CMS: {0}")]
    FetchFailure(String),

    /// A record is missing a required field or carries an undecodable value
    #[error("malformed record `{uid}`: {reason}")]
    MalformedRecord { uid: String, reason: String },

    /// A record has no publication date; formatting one would be undefined
    #[error("record `{uid}` has no publication date")]
    MissingDate { uid: String },

    /// No document exists for the requested identifier
    #[error("no document found for `{uid}`")]
    NotFound { uid: String },
}

impl From<reqwest::Error> for CmsError {
    fn from(err: reqwest::Error) -> Self {
        CmsError::FetchFailure(err.to_string())
    }
}

impl CmsError {
    /// Build a malformed-record error for a document, tolerating a missing uid
    pub fn malformed(uid: Option<&str>, reason: impl Into<String>) -> Self {
        CmsError::MalformedRecord {
            uid: uid.unwrap_or("<unknown>").to_string(),
            reason: reason.into(),
        }
    }
}
