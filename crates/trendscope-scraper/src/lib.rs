//! Raw record intake for trendscope: collaborator adapters, the record
//! normalizer, and the candidate collector.

pub mod collector;
pub mod error;
pub mod normalize;
pub mod parse;
pub(crate) mod rate_limit;
pub mod source;
pub mod types;

pub use collector::{collect_candidates, CollectionOutcome};
pub use error::{NormalizeError, ScraperError};
pub use normalize::normalize_record;
pub use source::{read_record_batch, DirectorySource, HttpPostSource, PostSource};
pub use types::{RawRecord, RecordBatch};
