//! Wire-level CMS record types
//!
//! Everything is optional here: the CMS makes no guarantees about which
//! fields a document carries. Required-field checks happen during
//! normalization, not deserialization.

use serde::Deserialize;

/// One page of query results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBatch {
    /// Documents in source order
    #[serde(default)]
    pub results: Vec<RawDocument>,

    /// Opaque URL of the next page, absent or empty on the last page
    #[serde(default)]
    pub next_page: Option<String>,
}

impl RawBatch {
    /// Cursor for the following page, with the CMS's empty-string
    /// "no more pages" convention mapped to `None`
    pub fn next_cursor(&self) -> Option<String> {
        self.next_page.clone().filter(|url| !url.is_empty())
    }
}

/// A single document as returned by the CMS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    pub uid: Option<String>,

    /// RFC 3339 timestamp, null for unpublished previews
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: RawData,
}

/// Typed fields of a post document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawData {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub banner: Option<RawImage>,
    #[serde(default)]
    pub content: Vec<RawBlock>,
}

/// An image field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    pub url: Option<String>,
}

/// A content block: one heading followed by body paragraphs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    pub heading: Option<String>,
    #[serde(default)]
    pub body: Vec<RawSpan>,
}

/// A single paragraph of body text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpan {
    pub text: Option<String>,
}
