//! `trends` and `categories` commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use trendscope_core::{AppConfig, CategoryCatalog, TrendConfig, TrendReport};
use trendscope_scraper::{DirectorySource, HttpPostSource};
use trendscope_trends::run_trends;

use crate::output::{default_trends_path, write_json};

#[derive(Debug)]
pub(crate) struct TrendsArgs {
    pub category: String,
    pub hashtags: Vec<String>,
    pub max_items: Option<usize>,
    pub max_hours: Option<i64>,
    pub max_candidates: Option<usize>,
    pub source_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

/// Resolve the category and CLI overrides into a validated run config.
///
/// Explicit `--hashtag` values replace the category preset. An unknown
/// category without explicit hashtags falls back to the generic preset.
///
/// # Errors
///
/// Returns an error if the category file cannot be loaded or the resulting
/// config fails validation.
pub(crate) fn resolve_trend_config(
    config: &AppConfig,
    args: &TrendsArgs,
) -> anyhow::Result<TrendConfig> {
    let hashtags = if args.hashtags.is_empty() {
        let catalog = CategoryCatalog::load(config.categories_path.as_deref())
            .context("failed to load category presets")?;
        let resolved = catalog.resolve(&args.category);
        if resolved.used_fallback {
            tracing::warn!(
                category = %args.category,
                fallback = %resolved.category,
                "unknown category, using generic hashtags"
            );
        }
        resolved.hashtags
    } else {
        args.hashtags.clone()
    };

    let mut trend_config = config.trend_config(&args.category, hashtags);
    if let Some(max_items) = args.max_items {
        trend_config.max_items = max_items;
    }
    if let Some(max_hours) = args.max_hours {
        trend_config.max_age_hours = max_hours;
    }
    if let Some(max_candidates) = args.max_candidates {
        trend_config.max_candidates = max_candidates;
    }
    trend_config
        .validate()
        .context("invalid trend run configuration")?;
    Ok(trend_config)
}

/// Run the `trends` command end to end.
///
/// # Errors
///
/// Returns an error for invalid configuration, a missing scraper base URL
/// when no `--source-dir` is given, or an unwritable output path.
pub(crate) async fn run_trends_command(config: &AppConfig, args: TrendsArgs) -> anyhow::Result<()> {
    let trend_config = resolve_trend_config(config, &args)?;

    if args.dry_run {
        println!(
            "dry-run: would collect category '{}' from {} hashtag(s): {}",
            trend_config.category,
            trend_config.hashtags.len(),
            trend_config.hashtags.join(", ")
        );
        println!(
            "dry-run: window {}h, up to {} candidates, {} items; source: {}",
            trend_config.max_age_hours,
            trend_config.max_candidates,
            trend_config.max_items,
            args.source_dir.as_ref().map_or_else(
                || "scraper api".to_string(),
                |dir| dir.display().to_string()
            )
        );
        return Ok(());
    }

    let now = Utc::now();
    let report: TrendReport = match &args.source_dir {
        Some(dir) => run_trends(&DirectorySource::new(dir), &trend_config, now).await?,
        None => {
            let source = HttpPostSource::from_app_config(config)
                .context("scraper API is not configured; pass --source-dir to read dumps")?;
            run_trends(&source, &trend_config, now).await?
        }
    };

    let path = args.output.unwrap_or_else(|| {
        default_trends_path(&config.data_dir, &report.category, report.generated_at)
    });
    write_json(&path, &report)?;

    println!("{}", summary_line(&report, &path));
    Ok(())
}

fn summary_line(report: &TrendReport, path: &Path) -> String {
    format!(
        "{} trend item(s) for '{}' ({} queries, {} timed out, {} failed, {} stale, {} duplicates collapsed) -> {}",
        report.items.len(),
        report.category,
        report.stats.queries_issued,
        report.stats.queries_timed_out.len(),
        report.stats.queries_failed.len(),
        report.stats.stale_candidates,
        report.stats.duplicates_collapsed,
        path.display()
    )
}

/// Print every category preset with its hashtags.
///
/// # Errors
///
/// Returns an error if a configured category file cannot be loaded.
pub(crate) fn list_categories(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = CategoryCatalog::load(config.categories_path.as_deref())
        .context("failed to load category presets")?;
    for (name, hashtags) in catalog.iter() {
        println!("{name}: {}", hashtags.join(", "));
    }
    Ok(())
}
