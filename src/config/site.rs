//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    /// BCP 47 tag used for date display (e.g. "pt-BR")
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,

    // Date format (Moment.js-style, converted to chrono at render time)
    pub date_format: String,

    // Static generation
    /// Seconds before a generated home page is considered stale
    pub revalidate_secs: u64,

    // Headless CMS
    pub cms: CmsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling.".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "pt-BR".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),

            date_format: "DD MMMM YYYY".to_string(),

            revalidate_secs: 1800,

            cms: CmsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Headless CMS connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the CMS query API
    pub api_url: String,
    /// Document type queried for posts
    pub document_type: String,
    /// Number of summaries fetched per page
    pub page_size: usize,
    /// Fields requested for listing queries
    #[serde(default)]
    pub fetch_fields: Vec<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://spacetraveling.cdn.prismic.io/api/v2".to_string(),
            document_type: "post".to_string(),
            page_size: 2,
            fetch_fields: vec![
                "post.title".to_string(),
                "post.subtitle".to_string(),
                "post.author".to_string(),
            ],
        }
    }
}
