//! Normalization from raw scraper records to [`trendscope_core::Post`].
//!
//! Text and counter parsing is delegated to [`crate::parse`]; this module
//! resolves field aliases and decides what is required, what is coerced and
//! what is flagged.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use trendscope_core::{MediaType, Post, RecordFlag};

use crate::error::NormalizeError;
use crate::parse::{
    clean_text, collapse_whitespace, extract_hashtags, parse_count, parse_timestamp,
    shortcode_from_url, unix_seconds,
};
use crate::types::RawRecord;

const ID_KEYS: &[&str] = &["id", "shortcode", "shortCode"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "takenAt"];
const CAPTION_KEYS: &[&str] = &["caption", "raw_text"];
const LIKE_KEYS: &[&str] = &["likeCount", "likesCount", "likes"];
const COMMENT_COUNT_KEYS: &[&str] = &["commentCount", "commentsCount"];
const MEDIA_TYPE_KEYS: &[&str] = &["mediaType", "type", "productType"];
const AUDIO_KEYS: &[&str] = &["audioRef", "audioName", "audio_name"];

/// Normalizes one raw record into a [`Post`].
///
/// `collected_at` is the collection time; publish timestamps later than it
/// are clamped to it and flagged.
///
/// # Errors
///
/// Returns [`NormalizeError::NotAnObject`] for non-object records and
/// [`NormalizeError::MissingRequiredField`] when the id, URL, or publish
/// timestamp is absent or unparsable. Counter problems never reject a record.
pub fn normalize_record(
    raw: &RawRecord,
    collected_at: DateTime<Utc>,
) -> Result<Post, NormalizeError> {
    let obj = raw.as_object().ok_or(NormalizeError::NotAnObject)?;
    let mut flags = Vec::new();

    let url = first(obj, &["url"]).and_then(scalar_string);
    let id = first(obj, ID_KEYS)
        .and_then(scalar_string)
        .or_else(|| url.as_deref().and_then(shortcode_from_url))
        .ok_or_else(|| missing("id", "absent and not derivable from the URL"))?;
    let url = url.ok_or_else(|| missing("url", "absent"))?;

    let published_at = resolve_timestamp(obj)?;
    let published_at = if published_at > collected_at {
        raise(&mut flags, RecordFlag::FutureTimestamp);
        collected_at
    } else {
        published_at
    };

    let caption = first(obj, CAPTION_KEYS)
        .and_then(Value::as_str)
        .map(clean_text)
        .unwrap_or_default();
    let comments = comment_texts(obj.get("comments"));

    let like_count = first(obj, LIKE_KEYS)
        .map(|v| coerce_count(v, &mut flags))
        .unwrap_or(0);
    let comment_count = first(obj, COMMENT_COUNT_KEYS)
        .or_else(|| obj.get("comments").filter(|v| v.is_number() || v.is_string()))
        .map(|v| coerce_count(v, &mut flags))
        .unwrap_or(comments.len() as u64);

    let media_type = resolve_media_type(obj, &url);

    let audio_ref = first(obj, AUDIO_KEYS)
        .and_then(Value::as_str)
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty());
    let audio_ref = match audio_ref {
        Some(_) if media_type != MediaType::Video => {
            raise(&mut flags, RecordFlag::AudioOnNonVideo);
            None
        }
        other => other,
    };

    let hashtags = extract_hashtags(&caption);

    Ok(Post {
        id,
        url,
        caption,
        comments,
        media_type,
        like_count,
        comment_count,
        published_at,
        audio_ref,
        hashtags,
        flags,
    })
}

fn missing(field: &'static str, reason: impl Into<String>) -> NormalizeError {
    NormalizeError::MissingRequiredField {
        field,
        reason: reason.into(),
    }
}

fn raise(flags: &mut Vec<RecordFlag>, flag: RecordFlag) {
    if !flags.contains(&flag) {
        flags.push(flag);
    }
}

/// First non-null value among `keys`.
fn first<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|v| !v.is_null())
}

/// Non-blank string, or a number rendered as a string.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn resolve_timestamp(obj: &Map<String, Value>) -> Result<DateTime<Utc>, NormalizeError> {
    let value = first(obj, TIMESTAMP_KEYS).ok_or_else(|| missing("timestamp", "absent"))?;
    let parsed = match value {
        Value::String(s) => parse_timestamp(s),
        Value::Number(n) => n.as_i64().and_then(unix_seconds),
        _ => None,
    };
    parsed.ok_or_else(|| missing("timestamp", format!("unparsable value {value}")))
}

/// Coerce a counter to a non-negative integer, flagging anything that had to
/// be clamped or could not be read.
fn coerce_count(value: &Value, flags: &mut Vec<RecordFlag>) -> u64 {
    let signed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // Estimates sometimes arrive as floats ("1.2e4").
            #[allow(clippy::cast_possible_truncation)]
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
        }),
        Value::String(s) => parse_count(s),
        _ => None,
    };

    match signed {
        Some(n) if n < 0 => {
            raise(flags, RecordFlag::NegativeCount);
            0
        }
        Some(n) => n.unsigned_abs(),
        None => {
            raise(flags, RecordFlag::NonNumericCount);
            0
        }
    }
}

/// Comment texts from an array of strings or `{ "text": ... }` objects.
/// Anything else (including a numeric comment count) yields no texts.
fn comment_texts(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(o) => o.get("text").and_then(Value::as_str),
            _ => None,
        })
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
        .collect()
}

fn resolve_media_type(obj: &Map<String, Value>, url: &str) -> MediaType {
    match first(obj, MEDIA_TYPE_KEYS).and_then(Value::as_str) {
        Some(raw) => parse_media_type(raw),
        None if url.contains("/reel/") || url.contains("/reels/") => MediaType::Video,
        None => MediaType::Image,
    }
}

fn parse_media_type(raw: &str) -> MediaType {
    match raw.trim().to_lowercase().as_str() {
        "reel" | "reels" | "clips" | "video" | "graphvideo" | "igtv" => MediaType::Video,
        "carousel" | "sidecar" | "graphsidecar" | "carousel_container" => MediaType::Carousel,
        _ => MediaType::Image,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
