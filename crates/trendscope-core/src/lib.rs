//! Shared domain types and configuration for trendscope.
//!
//! Every pipeline crate builds on the types defined here: the canonical
//! [`Post`], its classified form, trend candidates, and the final
//! [`TrendReport`] artifact.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod error;
pub mod posts;
pub mod settings;
pub mod trends;

pub use app_config::AppConfig;
pub use categories::{normalize_hashtags, CategoryCatalog, ResolvedCategory};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use posts::{ClassifiedPost, MediaType, Post, RecordFlag, Sentiment};
pub use settings::{ClassifierConfig, EngagementWeights, TrendConfig};
pub use trends::{RunStats, TrendCandidate, TrendItem, TrendReport};
