//! Normalized post models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::helpers;

/// A post as listed on the home page. Immutable once normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    /// Document identifier, also the URL slug
    pub uid: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Author display name
    pub author: String,
}

/// A fully loaded post for the detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    /// Document identifier, also the URL slug
    pub uid: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Post title
    pub title: String,

    /// Author display name
    pub author: String,

    /// Banner image URL
    pub banner_url: String,

    /// Ordered content blocks
    pub content: Vec<ContentBlock>,
}

/// One section of post content: a heading and its paragraphs, in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<String>,
}

impl PostDetail {
    /// Estimated reading time in minutes (200 words per minute, rounded up)
    pub fn reading_time(&self) -> usize {
        helpers::reading_time(&self.content)
    }

    /// Total word count across all content blocks
    pub fn word_count(&self) -> usize {
        helpers::total_words(&self.content)
    }
}
