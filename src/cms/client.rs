//! CMS query client

use std::time::Duration;

use super::record::{RawBatch, RawDocument};
use super::CmsError;
use crate::config::CmsConfig;

/// Request timeout for every CMS call. A hung fetch must not block the
/// caller indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the headless CMS query API
#[derive(Debug, Clone)]
pub struct CmsClient {
    config: CmsConfig,
    http: reqwest::Client,
}

impl CmsClient {
    /// Create a client over the configured API endpoint
    pub fn new(config: CmsConfig) -> Result<Self, CmsError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, http })
    }

    /// Fetch the first page of documents of a type, with the configured
    /// fetch fields and page size
    pub async fn get_by_type(&self, kind: &str) -> Result<RawBatch, CmsError> {
        let url = format!("{}/documents/search", self.config.api_url);
        let query = type_predicate(kind);
        let fetch = self.config.fetch_fields.join(",");

        let request = self
            .http
            .get(&url)
            .query(&[("q", query.as_str())])
            .query(&[("pageSize", self.config.page_size)])
            .query(&[("fetch", fetch.as_str())]);

        let resp = request.send().await?;
        decode_batch(resp).await
    }

    /// Fetch a single document by uid, or `NotFound`
    pub async fn get_by_uid(&self, kind: &str, uid: &str) -> Result<RawDocument, CmsError> {
        let url = format!("{}/documents/search", self.config.api_url);
        let query = uid_predicate(kind, uid);

        let resp = self
            .http
            .get(&url)
            .query(&[("q", query.as_str())])
            .query(&[("pageSize", 1)])
            .send()
            .await?;

        let batch = decode_batch(resp).await?;
        batch
            .results
            .into_iter()
            .next()
            .ok_or_else(|| CmsError::NotFound {
                uid: uid.to_string(),
            })
    }

    /// Follow an opaque next-page cursor URL
    pub async fn get_page(&self, cursor: &str) -> Result<RawBatch, CmsError> {
        let resp = self.http.get(cursor).send().await?;
        decode_batch(resp).await
    }

    /// Whether a cursor points back at the configured API endpoint.
    /// The load-more proxy refuses to follow anything else.
    pub fn trusted_cursor(&self, cursor: &str) -> bool {
        cursor.starts_with(&self.config.api_url)
    }
}

/// Decode a response into a batch, mapping HTTP and body failures
async fn decode_batch(resp: reqwest::Response) -> Result<RawBatch, CmsError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(CmsError::FetchFailure(format!(
            "CMS answered {} for {}",
            status,
            resp.url()
        )));
    }
    resp.json::<RawBatch>()
        .await
        .map_err(|e| CmsError::malformed(None, format!("undecodable response body: {e}")))
}

/// Predicate selecting every document of a type
fn type_predicate(kind: &str) -> String {
    format!(r#"[[at(document.type,"{kind}")]]"#)
}

/// Predicate selecting a single document by uid
fn uid_predicate(kind: &str, uid: &str) -> String {
    format!(r#"[[at(my.{kind}.uid,"{uid}")]]"#)
}
