//! Generation stamps for time-based revalidation
//!
//! Records when each output page was rendered so the server can decide
//! whether a page is stale and must be rebuilt before serving.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Stamp file name
const STAMP_FILE: &str = ".spacetraveling/stamps.json";

/// Generation timestamps keyed by output path (relative to the public dir)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StampDb {
    /// Version of the stamp format
    pub version: u32,
    /// Unix timestamp (seconds) each page was last generated
    pub pages: HashMap<String, u64>,
}

impl StampDb {
    /// Current stamp format version
    const VERSION: u32 = 1;

    /// Load stamps from disk, or start empty
    pub fn load(base_dir: &Path) -> Self {
        let stamp_path = base_dir.join(STAMP_FILE);
        if let Ok(content) = fs::read_to_string(&stamp_path) {
            if let Ok(db) = serde_json::from_str::<StampDb>(&content) {
                if db.version == Self::VERSION {
                    return db;
                }
                tracing::info!("Stamp version mismatch, starting fresh");
            }
        }
        Self::new()
    }

    /// Save stamps to disk
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let stamp_dir = base_dir.join(".spacetraveling");
        fs::create_dir_all(&stamp_dir)?;

        let stamp_path = base_dir.join(STAMP_FILE);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(stamp_path, content)?;
        Ok(())
    }

    /// Create a new stamp db with version set
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            ..Default::default()
        }
    }

    /// Record that a page was generated now
    pub fn touch(&mut self, page: &str) {
        self.pages.insert(page.to_string(), unix_now());
    }

    /// Whether a page is older than `max_age_secs` (or was never stamped)
    pub fn is_stale(&self, page: &str, max_age_secs: u64) -> bool {
        match self.pages.get(page) {
            Some(generated_at) => unix_now().saturating_sub(*generated_at) >= max_age_secs,
            None => true,
        }
    }
}

/// Current time as a unix timestamp in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Delete the stamp directory
pub fn clear(base_dir: &Path) -> Result<()> {
    let stamp_dir = base_dir.join(".spacetraveling");
    if stamp_dir.exists() {
        fs::remove_dir_all(&stamp_dir)?;
        tracing::info!("Stamps cleared");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstamped_page_is_stale() {
        let db = StampDb::new();
        assert!(db.is_stale("index.html", 1800));
    }

    #[test]
    fn test_fresh_stamp_is_not_stale() {
        let mut db = StampDb::new();
        db.touch("index.html");
        assert!(!db.is_stale("index.html", 1800));
    }

    #[test]
    fn test_old_stamp_is_stale() {
        let mut db = StampDb::new();
        db.pages
            .insert("index.html".to_string(), unix_now() - 3600);
        assert!(db.is_stale("index.html", 1800));
    }

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();

        let mut db = StampDb::new();
        db.touch("index.html");
        db.touch("post/hello/index.html");
        db.save(dir.path()).unwrap();

        let loaded = StampDb::load(dir.path());
        assert_eq!(loaded.pages.len(), 2);
        assert!(!loaded.is_stale("post/hello/index.html", 1800));
    }

    #[test]
    fn test_version_mismatch_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();

        let mut db = StampDb::new();
        db.version = 999;
        db.touch("index.html");
        db.save(dir.path()).unwrap();

        let loaded = StampDb::load(dir.path());
        assert!(loaded.pages.is_empty());
    }
}
