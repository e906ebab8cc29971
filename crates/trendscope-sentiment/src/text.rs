//! Text preparation shared by every scorer.

use trendscope_core::Post;

/// Upper bound on characters handed to a scorer.
pub const MAX_TEXT_CHARS: usize = 4000;

/// Page chrome that sometimes survives inside stacked comment text.
const CUT_MARKERS: &[&str] = &[
    "More posts from",
    "About Blog Jobs Help",
    "Instagram from",
    "Uploading & Non-Users",
    "Privacy Terms",
    "Meta ©",
];

/// Caption followed by every comment, one per line, with page chrome cut
/// and the result capped at [`MAX_TEXT_CHARS`].
#[must_use]
pub fn scoring_text(post: &Post) -> String {
    let mut text = String::with_capacity(post.caption.len() + 64);
    text.push_str(post.caption.trim());
    for comment in &post.comments {
        let comment = comment.trim();
        if comment.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(comment);
    }
    prepare(&text)
}

/// Cut page chrome and cap length on a char boundary.
#[must_use]
pub fn prepare(text: &str) -> String {
    let mut end = text.len();
    for marker in CUT_MARKERS {
        if let Some(pos) = text[..end].find(marker) {
            end = pos;
        }
    }
    let text = text[..end].trim();
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use trendscope_core::MediaType;

    use super::*;

    fn post(caption: &str, comments: &[&str]) -> Post {
        Post {
            id: "p1".to_string(),
            url: "https://www.instagram.com/p/p1/".to_string(),
            caption: caption.to_string(),
            comments: comments.iter().map(|c| (*c).to_string()).collect(),
            media_type: MediaType::Image,
            like_count: 0,
            comment_count: 0,
            published_at: Utc::now(),
            audio_ref: None,
            hashtags: vec![],
            flags: vec![],
        }
    }

    #[test]
    fn joins_caption_and_comments() {
        let text = scoring_text(&post("New menu", &["love it", "  ", "when?"]));
        assert_eq!(text, "New menu\nlove it\nwhen?");
    }

    #[test]
    fn comments_only_has_no_leading_newline() {
        let text = scoring_text(&post("", &["so good"]));
        assert_eq!(text, "so good");
    }

    #[test]
    fn prepare_cuts_at_earliest_marker() {
        assert_eq!(
            prepare("great pizza Privacy Terms blah More posts from x"),
            "great pizza"
        );
    }

    #[test]
    fn prepare_caps_length_on_char_boundary() {
        let long = "é".repeat(MAX_TEXT_CHARS + 10);
        let out = prepare(&long);
        assert_eq!(out.chars().count(), MAX_TEXT_CHARS);
    }
}
