//! On-disk adapter: one JSON dump per hashtag, as the scraper writes them.

use std::path::{Path, PathBuf};

use super::PostSource;
use crate::error::ScraperError;
use crate::types::{RawRecord, RecordBatch};

/// Reads `<dir>/<hashtag>.json`. A missing file means the scraper found
/// nothing for that hashtag and yields zero records.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dump_path(&self, hashtag: &str) -> PathBuf {
        self.dir.join(format!("{hashtag}.json"))
    }
}

impl PostSource for DirectorySource {
    async fn fetch_hashtag(
        &self,
        hashtag: &str,
        limit: u32,
    ) -> Result<Vec<RawRecord>, ScraperError> {
        let path = self.dump_path(hashtag);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(hashtag, path = %path.display(), "no dump for hashtag");
            return Ok(Vec::new());
        }
        let mut records = read_record_batch(&path).await?.into_records();
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(records)
    }
}

/// Read and parse a scraper dump in any supported batch shape.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if the file cannot be read, or
/// [`ScraperError::Deserialize`] if it holds no recognizable batch.
pub async fn read_record_batch(path: &Path) -> Result<RecordBatch, ScraperError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScraperError::Io {
            path: path.display().to_string(),
            source,
        })?;
    RecordBatch::parse(&body, &path.display().to_string())
}
