use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("categories file validation failed: {0}")]
    Validation(String),

    /// A pipeline setting is out of range. Raised before any I/O is attempted.
    #[error("invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
