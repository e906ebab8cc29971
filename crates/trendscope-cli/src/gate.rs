//! Tier gating applied to classified posts before they are written out.

use clap::ValueEnum;
use trendscope_core::ClassifiedPost;

pub(crate) const BASIC_INSIGHT: &str = "Upgrade to PRO for actionable insights.";
pub(crate) const MISSING_INSIGHT: &str = "No specific insight was generated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Basic,
    Pro,
}

/// Hide or fill the tier-dependent fields of each post.
///
/// `basic` drops key comments and replaces the insight with an upgrade
/// notice. `pro` keeps everything and only fills a missing insight.
pub(crate) fn apply_gate(posts: Vec<ClassifiedPost>, mode: Mode) -> Vec<ClassifiedPost> {
    posts
        .into_iter()
        .map(|mut post| {
            match mode {
                Mode::Basic => {
                    post.key_comments.clear();
                    post.insight = Some(BASIC_INSIGHT.to_string());
                }
                Mode::Pro => {
                    if post.insight.is_none() {
                        post.insight = Some(MISSING_INSIGHT.to_string());
                    }
                }
            }
            post
        })
        .collect()
}
