//! JSON artifact writing shared by the commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pretty-print `value` to `path`, creating parent directories as needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// `<data_dir>/<category>/trends_<category>_<YYYYmmdd_HHMM>.json`
pub(crate) fn default_trends_path(
    data_dir: &Path,
    category: &str,
    generated_at: DateTime<Utc>,
) -> PathBuf {
    let stamp = generated_at.format("%Y%m%d_%H%M");
    data_dir
        .join(category)
        .join(format!("trends_{category}_{stamp}.json"))
}
