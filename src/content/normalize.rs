//! Normalization of raw CMS records into post models
//!
//! Required fields are checked here and surfaced as errors instead of
//! flowing through as nulls. In particular a record without a publication
//! date is rejected: formatting a missing date has no defined result.

use crate::cms::record::{RawBatch, RawDocument};
use crate::cms::CmsError;
use crate::helpers;

use super::{ContentBlock, PostDetail, PostSummary};

/// Normalize a raw record into a listing summary
pub fn summary(doc: &RawDocument) -> Result<PostSummary, CmsError> {
    let uid = require_uid(doc)?;
    let date = require_date(doc, &uid)?;
    let title = require_field(&uid, "title", &doc.data.title)?;
    let author = require_field(&uid, "author", &doc.data.author)?;

    Ok(PostSummary {
        uid,
        date,
        title,
        // A missing subtitle is rendered as empty, not rejected
        subtitle: doc.data.subtitle.clone().unwrap_or_default(),
        author,
    })
}

/// Normalize a raw record into a full post detail
pub fn detail(doc: &RawDocument) -> Result<PostDetail, CmsError> {
    let uid = require_uid(doc)?;
    let date = require_date(doc, &uid)?;
    let title = require_field(&uid, "title", &doc.data.title)?;
    let author = require_field(&uid, "author", &doc.data.author)?;

    let banner_url = doc
        .data
        .banner
        .as_ref()
        .and_then(|banner| banner.url.clone())
        .unwrap_or_default();

    let content = doc
        .data
        .content
        .iter()
        .map(|block| ContentBlock {
            heading: block.heading.clone().unwrap_or_default(),
            body: block
                .body
                .iter()
                .filter_map(|span| span.text.clone())
                .collect(),
        })
        .collect();

    Ok(PostDetail {
        uid,
        date,
        title,
        author,
        banner_url,
        content,
    })
}

/// Normalize a whole batch, preserving the source order of the results
pub fn batch(raw: &RawBatch) -> Result<Vec<PostSummary>, CmsError> {
    raw.results.iter().map(summary).collect()
}

fn require_uid(doc: &RawDocument) -> Result<String, CmsError> {
    doc.uid
        .clone()
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| CmsError::malformed(None, "document has no uid"))
}

fn require_date(
    doc: &RawDocument,
    uid: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>, CmsError> {
    let raw = doc
        .first_publication_date
        .as_deref()
        .ok_or_else(|| CmsError::MissingDate {
            uid: uid.to_string(),
        })?;
    helpers::parse_publication_date(raw, uid)
}

fn require_field(uid: &str, name: &str, value: &Option<String>) -> Result<String, CmsError> {
    value
        .clone()
        .ok_or_else(|| CmsError::malformed(Some(uid), format!("missing field `{name}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::record::RawBatch;

    fn raw_doc(uid: &str, title: &str) -> serde_json::Value {
        serde_json::json!({
            "uid": uid,
            "first_publication_date": "2021-04-19T20:15:52+0000",
            "data": {
                "title": title,
                "subtitle": "sub",
                "author": "Ana"
            }
        })
    }

    #[test]
    fn test_summary_normalizes_fields() {
        let doc: RawDocument = serde_json::from_value(raw_doc("hello-world", "Hello")).unwrap();
        let summary = summary(&doc).unwrap();
        assert_eq!(summary.uid, "hello-world");
        assert_eq!(summary.title, "Hello");
        assert_eq!(summary.subtitle, "sub");
        assert_eq!(summary.author, "Ana");
        assert_eq!(summary.date.timestamp(), 1618863352);
    }

    #[test]
    fn test_summary_missing_date() {
        let mut value = raw_doc("no-date", "Hello");
        value["first_publication_date"] = serde_json::Value::Null;
        let doc: RawDocument = serde_json::from_value(value).unwrap();

        let err = summary(&doc).unwrap_err();
        assert!(matches!(err, CmsError::MissingDate { uid } if uid == "no-date"));
    }

    #[test]
    fn test_summary_missing_uid() {
        let mut value = raw_doc("x", "Hello");
        value["uid"] = serde_json::Value::Null;
        let doc: RawDocument = serde_json::from_value(value).unwrap();

        let err = summary(&doc).unwrap_err();
        assert!(matches!(err, CmsError::MalformedRecord { .. }));
    }

    #[test]
    fn test_batch_preserves_order() {
        let value = serde_json::json!({
            "next_page": null,
            "results": [raw_doc("c", "C"), raw_doc("a", "A"), raw_doc("b", "B")]
        });
        let raw: RawBatch = serde_json::from_value(value).unwrap();

        let summaries = batch(&raw).unwrap();
        let uids: Vec<_> = summaries.iter().map(|s| s.uid.as_str()).collect();
        assert_eq!(uids, ["c", "a", "b"]);
    }

    #[test]
    fn test_detail_content_blocks() {
        let value = serde_json::json!({
            "uid": "rich-post",
            "first_publication_date": "2021-03-25T19:25:28+0000",
            "data": {
                "title": "Rich",
                "author": "Ana",
                "banner": { "url": "https://images.example/b.png" },
                "content": [
                    { "heading": "Intro", "body": [ { "text": "one two three" } ] },
                    { "heading": "More", "body": [ { "text": "four" }, { "text": "five six" } ] }
                ]
            }
        });
        let doc: RawDocument = serde_json::from_value(value).unwrap();

        let detail = detail(&doc).unwrap();
        assert_eq!(detail.banner_url, "https://images.example/b.png");
        assert_eq!(detail.content.len(), 2);
        assert_eq!(detail.content[0].heading, "Intro");
        assert_eq!(detail.content[1].body, vec!["four", "five six"]);
        assert_eq!(detail.word_count(), 6);
        assert_eq!(detail.reading_time(), 1);
    }
}
