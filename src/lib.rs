//! spacetraveling: a static blog front-end for headless CMS backends
//!
//! This crate renders a CMS-driven blog to static HTML: a paginated home
//! page with a client-side "load more" interaction, and post detail pages
//! rendered at build time or on demand with time-based revalidation.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Spacetraveling {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Spacetraveling {
    /// Create a new instance from a directory, loading `_config.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(config, base_dir))
    }

    /// Create an instance from an already-built configuration
    pub fn with_config<P: AsRef<Path>>(config: config::SiteConfig, base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            public_dir,
        }
    }

    /// Create a CMS client from the configured endpoint
    pub fn cms_client(&self) -> Result<cms::CmsClient> {
        Ok(cms::CmsClient::new(self.config.cms.clone())?)
    }

    /// Generate the static site
    pub async fn build(&self, all: bool) -> Result<()> {
        commands::build::run(self, all).await
    }

    /// Clean the public directory and stamps
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
