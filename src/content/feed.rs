//! Paginated post feed
//!
//! The feed holds every summary loaded so far plus the cursor for the next
//! page. It is append-only: loading more pages never removes, reorders or
//! de-duplicates what is already there.

use serde::Serialize;

use crate::cms::record::RawBatch;
use crate::cms::{CmsClient, CmsError};

use super::{normalize, PostSummary};

/// In-memory list of post summaries with a next-page cursor
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostFeed {
    /// Summaries in the order the CMS returned them
    pub posts: Vec<PostSummary>,

    /// Opaque URL of the next page, `None` once exhausted
    pub next_page: Option<String>,
}

impl PostFeed {
    /// Build a feed from the first batch of results
    pub fn from_batch(batch: &RawBatch) -> Result<Self, CmsError> {
        let mut feed = Self::default();
        feed.append_batch(batch)?;
        Ok(feed)
    }

    /// Whether another page can be loaded
    pub fn has_more(&self) -> bool {
        self.next_page.is_some()
    }

    /// Normalize a batch and append it, replacing the cursor with the
    /// batch's own next-page value (cleared on the last page).
    /// Returns the number of summaries appended.
    pub fn append_batch(&mut self, batch: &RawBatch) -> Result<usize, CmsError> {
        let summaries = normalize::batch(batch)?;
        let appended = summaries.len();
        self.posts.extend(summaries);
        self.next_page = batch.next_cursor();
        Ok(appended)
    }

    /// Fetch the next page and append it. Without a cursor this is a no-op
    /// that touches neither the list nor the network; callers are expected
    /// to check [`has_more`](Self::has_more) first.
    pub async fn load_more(&mut self, client: &CmsClient) -> Result<usize, CmsError> {
        let Some(cursor) = self.next_page.clone() else {
            return Ok(0);
        };
        let batch = client.get_page(&cursor).await?;
        self.append_batch(&batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmsConfig;

    fn batch_json(uids: &[&str], next_page: Option<&str>) -> RawBatch {
        let results: Vec<_> = uids
            .iter()
            .map(|uid| {
                serde_json::json!({
                    "uid": uid,
                    "first_publication_date": "2021-04-19T20:15:52+0000",
                    "data": { "title": uid, "subtitle": "", "author": "Ana" }
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "results": results,
            "next_page": next_page,
        }))
        .unwrap()
    }

    fn uids(feed: &PostFeed) -> Vec<&str> {
        feed.posts.iter().map(|p| p.uid.as_str()).collect()
    }

    #[test]
    fn test_from_batch_sets_cursor() {
        let feed = PostFeed::from_batch(&batch_json(&["a", "b"], Some("next-url"))).unwrap();
        assert_eq!(uids(&feed), ["a", "b"]);
        assert_eq!(feed.next_page.as_deref(), Some("next-url"));
        assert!(feed.has_more());
    }

    #[test]
    fn test_append_preserves_earlier_posts() {
        let mut feed = PostFeed::from_batch(&batch_json(&["a", "b"], Some("page2"))).unwrap();

        let appended = feed
            .append_batch(&batch_json(&["c", "d"], Some("page3")))
            .unwrap();

        assert_eq!(appended, 2);
        assert_eq!(uids(&feed), ["a", "b", "c", "d"]);
        assert_eq!(feed.next_page.as_deref(), Some("page3"));
    }

    #[test]
    fn test_last_page_clears_cursor() {
        let mut feed = PostFeed::from_batch(&batch_json(&["a"], Some("page2"))).unwrap();

        feed.append_batch(&batch_json(&["b"], None)).unwrap();
        assert!(!feed.has_more());

        // The CMS signals the last page as an empty string too
        let mut feed = PostFeed::from_batch(&batch_json(&["a"], Some("page2"))).unwrap();
        feed.append_batch(&batch_json(&["b"], Some(""))).unwrap();
        assert!(!feed.has_more());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut feed = PostFeed::from_batch(&batch_json(&["a"], Some("page2"))).unwrap();
        feed.append_batch(&batch_json(&["a"], None)).unwrap();
        assert_eq!(uids(&feed), ["a", "a"]);
    }

    #[tokio::test]
    async fn test_load_more_without_cursor_is_a_noop() {
        let client = CmsClient::new(CmsConfig::default()).unwrap();
        let mut feed = PostFeed::from_batch(&batch_json(&["a"], None)).unwrap();

        let appended = feed.load_more(&client).await.unwrap();
        assert_eq!(appended, 0);
        assert_eq!(uids(&feed), ["a"]);
    }
}
