//! Recurring-theme extraction from a post's comments.
//!
//! A phrase (one word or two adjacent words) becomes a theme only when it
//! shows up in at least `min_theme_recurrence` distinct comments. Repeating a
//! phrase inside one comment, or pasting the same comment twice, does not
//! count twice.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use trendscope_core::ClassifierConfig;

const STOPWORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "aint", "because", "been",
    "before", "but", "can", "cant", "could", "did", "didnt", "does", "doesnt", "dont", "for",
    "from", "get", "got", "had", "has", "have", "her", "here", "him", "his", "how", "im", "into",
    "isnt", "its", "ive", "just", "lol", "more", "much", "not", "now", "off", "omg", "one", "only",
    "our", "out", "over", "she", "should", "some", "than", "that", "thats", "the", "their",
    "them", "then", "there", "these", "they", "this", "too", "very", "want", "was", "wasnt",
    "way", "were", "what", "when", "where", "which", "who", "why", "will", "with", "wont",
    "would", "yes", "you", "youre", "your",
];

const MIN_TOKEN_CHARS: usize = 3;

/// Themes and the comments that support them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSummary {
    /// snake_case tags, most recurrent first.
    pub themes: Vec<String>,
    /// Comments that mention an emitted theme, in original order.
    pub key_comments: Vec<String>,
}

/// Lowercase content tokens of `text`, in order.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(['\'', '’'], "")
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
        .filter(|t| !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Unigrams and adjacent bigrams of one comment, deduplicated.
fn phrases(text: &str) -> BTreeSet<String> {
    let tokens = tokenize(text);
    let mut set: BTreeSet<String> = tokens.iter().cloned().collect();
    for pair in tokens.windows(2) {
        if pair[0] != pair[1] {
            set.insert(format!("{} {}", pair[0], pair[1]));
        }
    }
    set
}

fn is_bigram(phrase: &str) -> bool {
    phrase.contains(' ')
}

/// Extract recurring themes from `comments`.
#[must_use]
pub fn extract_themes(comments: &[String], config: &ClassifierConfig) -> ThemeSummary {
    // Identical comment texts (case and spacing aside) count once.
    let mut seen_texts = HashSet::new();
    let distinct: Vec<(&str, BTreeSet<String>)> = comments
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .filter(|c| {
            let key = c.split_whitespace().collect::<Vec<_>>().join(" ");
            seen_texts.insert(key.to_lowercase())
        })
        .map(|c| (c, phrases(c)))
        .collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, set) in &distinct {
        for phrase in set {
            *counts.entry(phrase.as_str()).or_default() += 1;
        }
    }

    let recurring: BTreeMap<&str, usize> = counts
        .into_iter()
        .filter(|(_, n)| *n >= config.min_theme_recurrence)
        .collect();

    // A unigram adds nothing when a bigram containing it recurs at least as often.
    let subsumed = |unigram: &str, count: usize| {
        recurring.iter().any(|(phrase, n)| {
            is_bigram(phrase) && *n >= count && phrase.split(' ').any(|w| w == unigram)
        })
    };

    let mut ranked: Vec<(&str, usize)> = recurring
        .iter()
        .filter(|(phrase, n)| is_bigram(phrase) || !subsumed(**phrase, **n))
        .map(|(phrase, n)| (*phrase, *n))
        .collect();
    ranked.sort_by(|(pa, na), (pb, nb)| {
        nb.cmp(na)
            .then_with(|| is_bigram(pb).cmp(&is_bigram(pa)))
            .then_with(|| pa.cmp(pb))
    });
    ranked.truncate(config.max_themes);

    let key_comments = distinct
        .iter()
        .filter(|(_, set)| ranked.iter().any(|(phrase, _)| set.contains(*phrase)))
        .map(|(text, _)| (*text).to_string())
        .take(config.max_key_comments)
        .collect();

    ThemeSummary {
        themes: ranked
            .into_iter()
            .map(|(phrase, _)| phrase.replace(' ', "_"))
            .collect(),
        key_comments,
    }
}
