//! Collaborator adapters that hand raw post records to the pipeline.
//!
//! The scraper itself (browser automation, sessions, platform rate limits)
//! lives outside this workspace. A [`PostSource`] is the seam: give it a
//! hashtag, get back whatever records the collaborator produced.

mod directory;
mod http;

use std::future::Future;

pub use directory::{read_record_batch, DirectorySource};
pub use http::HttpPostSource;

use crate::error::ScraperError;
use crate::types::RawRecord;

/// Anything that can answer "recent posts for this hashtag".
///
/// Implementations must not normalize; the collector does that so rejection
/// counting happens in one place.
pub trait PostSource: Send + Sync {
    /// Fetch up to `limit` raw records tagged with `hashtag` (no leading `#`).
    fn fetch_hashtag(
        &self,
        hashtag: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawRecord>, ScraperError>> + Send;
}
