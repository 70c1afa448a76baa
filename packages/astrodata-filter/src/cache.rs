//! Load cache for the dataset.
//!
//! The key is the session configuration plus a SHA-256 digest of the source
//! document (and keyword file, when one is configured). Any content change
//! produces a new digest, so a modified file is never served stale.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::BrowserConfig;
use crate::dataset::{read_source, Dataset};
use crate::error::Result;

#[derive(Debug)]
struct CacheEntry {
    config: BrowserConfig,
    digest: String,
    dataset: Arc<Dataset>,
}

/// Holds at most one loaded dataset and reloads it when its source changes.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
    loads: usize,
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset, or load it if the source or configuration
    /// changed since the last call.
    pub fn get_or_load(&mut self, config: &BrowserConfig) -> Result<Arc<Dataset>> {
        let xml = read_source(&config.data_path)?;
        let digest = source_digest(&xml, config)?;

        if let Some(entry) = &self.entry {
            if entry.config == *config && entry.digest == digest {
                debug!(digest = %digest, "dataset cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(Dataset::from_xml(&xml, config)?);
        self.loads += 1;
        info!(
            path = %config.data_path.display(),
            records = dataset.len(),
            "dataset loaded"
        );

        self.entry = Some(CacheEntry {
            config: config.clone(),
            digest,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    /// Drop the cached dataset.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of loads performed (cache misses).
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

fn source_digest(xml: &str, config: &BrowserConfig) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(xml.as_bytes());
    if let Some(path) = &config.keywords_path {
        hasher.update(std::fs::read(path)?);
    }
    Ok(hex::encode(hasher.finalize()))
}
