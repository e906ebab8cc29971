//! `classify` command: profile dump in, gated classified posts out.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use trendscope_core::{AppConfig, ClassifiedPost, ClassifierConfig, Post};
use trendscope_scraper::{normalize_record, read_record_batch, RecordBatch, ScraperError};
use trendscope_sentiment::{
    ClassificationStats, Classifier, LexiconScorer, ModelScorer, SentimentScorer,
};

use crate::gate::{apply_gate, Mode};
use crate::output::write_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScorerKind {
    /// Built-in word and emoji lexicon
    Lexicon,
    /// Remote text-classification model at `TRENDSCOPE_SENTIMENT_MODEL_URL`
    Model,
}

#[derive(Debug)]
pub(crate) struct ClassifyArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: Mode,
    pub scorer: ScorerKind,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassifyStats {
    pub records_seen: usize,
    pub malformed_records: usize,
    /// Records dropped because an earlier record had the same id.
    pub duplicate_ids: usize,
    pub flagged_records: usize,
    #[serde(flatten)]
    pub classification: ClassificationStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassifyOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    pub classified_at: DateTime<Utc>,
    pub stats: ClassifyStats,
    pub posts: Vec<ClassifiedPost>,
}

/// Run the `classify` command end to end.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the classifier
/// settings are invalid, the model scorer is requested without a model URL,
/// or the output cannot be written. Individual bad records and scorer
/// failures are counted, not raised.
pub(crate) async fn run_classify(config: &AppConfig, args: &ClassifyArgs) -> anyhow::Result<()> {
    let batch = read_record_batch(&args.input)
        .await
        .with_context(|| format!("failed to read profile dump {}", args.input.display()))?;

    let mut classifier_config = config.classifier_config();
    if let Some(concurrency) = args.concurrency {
        classifier_config.concurrency = concurrency;
    }

    let classified_at = Utc::now();
    let output = match args.scorer {
        ScorerKind::Lexicon => {
            classify_batch(LexiconScorer, classifier_config, batch, args.mode, classified_at)
                .await?
        }
        ScorerKind::Model => {
            let Some(url) = config.sentiment_model_url.as_deref() else {
                anyhow::bail!("--scorer model requires TRENDSCOPE_SENTIMENT_MODEL_URL to be set");
            };
            let scorer = ModelScorer::new(url, config.scraper_request_timeout_secs)?;
            classify_batch(scorer, classifier_config, batch, args.mode, classified_at).await?
        }
    };

    write_json(&args.output, &output)?;
    println!(
        "classified {} posts ({} positive, {} mixed, {} negative, {} unknown, {} malformed) -> {}",
        output.stats.classification.total,
        output.stats.classification.positive,
        output.stats.classification.mixed,
        output.stats.classification.negative,
        output.stats.classification.unknown,
        output.stats.malformed_records,
        args.output.display()
    );
    Ok(())
}

/// Normalize, classify, and gate one profile dump.
///
/// # Errors
///
/// Returns an error only if `classifier_config` is invalid.
pub(crate) async fn classify_batch<S: SentimentScorer>(
    scorer: S,
    classifier_config: ClassifierConfig,
    batch: RecordBatch,
    mode: Mode,
    classified_at: DateTime<Utc>,
) -> anyhow::Result<ClassifyOutput> {
    let classifier = Classifier::new(scorer, classifier_config)?;
    let handle = batch.handle().map(str::to_string);
    let records = batch.into_records();
    let records_seen = records.len();

    let mut malformed_records = 0;
    let mut duplicate_ids = 0;
    let mut seen: HashSet<String> = HashSet::new();
    let mut posts: Vec<Post> = Vec::with_capacity(records.len());
    for raw in &records {
        let post = match normalize_record(raw, classified_at).map_err(ScraperError::from) {
            Ok(post) => post,
            Err(err) => {
                malformed_records += 1;
                tracing::warn!(error = %err, "skipping malformed record");
                continue;
            }
        };
        if !seen.insert(post.id.clone()) {
            duplicate_ids += 1;
            tracing::debug!(id = %post.id, "skipping repeated post id");
            continue;
        }
        posts.push(post);
    }
    let flagged_records = posts.iter().filter(|p| p.is_flagged()).count();

    let classified = classifier.classify_all(posts).await;
    let classification = ClassificationStats::from_posts(&classified);

    Ok(ClassifyOutput {
        handle,
        classified_at,
        stats: ClassifyStats {
            records_seen,
            malformed_records,
            duplicate_ids,
            flagged_records,
            classification,
        },
        posts: apply_gate(classified, mode),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use trendscope_core::Sentiment;

    use super::*;
    use crate::gate::BASIC_INSIGHT;

    fn batch() -> RecordBatch {
        RecordBatch::parse(
            r#"{"handle": "tacoshop", "posts": [
                {"id": "1", "url": "https://www.instagram.com/p/1/",
                 "timestamp": "2026-03-01T12:00:00Z",
                 "caption": "New birria tacos this weekend",
                 "comments": ["the birria tacos are amazing", "best birria tacos ever", "love this"]},
                {"id": "2", "url": "https://www.instagram.com/p/2/",
                 "timestamp": "2026-03-01T13:00:00Z", "caption": "Closed Monday"},
                {"url": "https://www.instagram.com/p/3/", "caption": "no timestamp"}
            ]}"#,
            "test",
        )
        .unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn pro_output_keeps_key_comments_and_counts_malformed() {
        let out = classify_batch(
            LexiconScorer,
            ClassifierConfig::default(),
            batch(),
            Mode::Pro,
            at(),
        )
        .await
        .unwrap();

        assert_eq!(out.handle.as_deref(), Some("tacoshop"));
        assert_eq!(out.stats.records_seen, 3);
        assert_eq!(out.stats.malformed_records, 1);
        assert_eq!(out.stats.classification.total, 2);

        let ids: Vec<&str> = out.posts.iter().map(|p| p.post.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(out.posts[0].sentiment, Sentiment::Positive);
        assert_eq!(out.posts[0].themes, vec!["birria_tacos"]);
        assert!(!out.posts[0].key_comments.is_empty());
        assert_eq!(out.posts[1].sentiment, Sentiment::Unknown);
    }

    #[tokio::test]
    async fn repeated_ids_are_classified_once() {
        let batch = RecordBatch::parse(
            r#"[
                {"id": "dup", "url": "https://www.instagram.com/p/dup/",
                 "timestamp": "2026-03-01T12:00:00Z", "caption": "first copy"},
                {"id": "dup", "url": "https://www.instagram.com/p/dup/",
                 "timestamp": "2026-03-01T12:00:00Z", "caption": "second copy"},
                {"id": "other", "url": "https://www.instagram.com/p/other/",
                 "timestamp": "2026-03-01T13:00:00Z"}
            ]"#,
            "test",
        )
        .unwrap();
        let out = classify_batch(
            LexiconScorer,
            ClassifierConfig::default(),
            batch,
            Mode::Pro,
            at(),
        )
        .await
        .unwrap();

        let ids: Vec<&str> = out.posts.iter().map(|p| p.post.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "other"]);
        assert_eq!(out.posts[0].post.caption, "first copy");
        assert_eq!(out.stats.duplicate_ids, 1);
        assert_eq!(out.stats.records_seen, 3);
    }

    #[tokio::test]
    async fn basic_output_is_gated() {
        let out = classify_batch(
            LexiconScorer,
            ClassifierConfig::default(),
            batch(),
            Mode::Basic,
            at(),
        )
        .await
        .unwrap();
        assert!(out.posts.iter().all(|p| p.key_comments.is_empty()));
        assert!(out
            .posts
            .iter()
            .all(|p| p.insight.as_deref() == Some(BASIC_INSIGHT)));
    }

    #[tokio::test]
    async fn output_json_uses_camel_case_keys() {
        let out = classify_batch(
            LexiconScorer,
            ClassifierConfig::default(),
            batch(),
            Mode::Basic,
            at(),
        )
        .await
        .unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("classifiedAt").is_some());
        assert_eq!(json["stats"]["malformedRecords"], 1);
        assert_eq!(json["stats"]["duplicateIds"], 0);
        assert_eq!(json["stats"]["total"], 2);
        assert!(json["posts"][0].get("keyComments").is_some());
    }

    #[tokio::test]
    async fn invalid_classifier_config_is_rejected() {
        let cfg = ClassifierConfig {
            min_theme_recurrence: 0,
            ..ClassifierConfig::default()
        };
        let result = classify_batch(LexiconScorer, cfg, batch(), Mode::Pro, at()).await;
        assert!(result.is_err());
    }
}
