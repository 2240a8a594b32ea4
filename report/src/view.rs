//! Small formatting helpers shared by the Markdown and HTML renderers.

use ideascout_core::{AnalyzedPost, RecommendationTier};
use scoring_engine::{HeuristicScorer, LegacyScore};

/// Placeholder for an empty list or missing text.
pub const UNDECIDED: &str = "待确定";

const TITLE_LIMIT: usize = 35;

/// Display title cut to the leaderboard width.
pub fn short_title(title: &str) -> String {
    title.chars().take(TITLE_LIMIT).collect()
}

pub fn join_or_undecided(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        UNDECIDED.to_string()
    } else {
        items.join(separator)
    }
}

/// Whole dollars with thousands separators, e.g. `6,000`.
pub fn dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// CSS class of the tier badge.
pub fn badge_class(tier: RecommendationTier) -> &'static str {
    match tier {
        RecommendationTier::StronglyRecommend => "badge-hot",
        RecommendationTier::Recommend => "badge-good",
        RecommendationTier::Consider => "badge-ok",
        RecommendationTier::NeedsEvaluation => "badge-low",
    }
}

/// A post scored on the 0–50 legacy scale.
#[derive(Debug, Clone)]
pub struct LegacyEntry<'a> {
    pub post: &'a AnalyzedPost,
    pub score: LegacyScore,
}

/// Legacy scores for every post, highest first. Ties keep input order.
pub fn legacy_entries<'a>(posts: &'a [AnalyzedPost], scorer: &HeuristicScorer) -> Vec<LegacyEntry<'a>> {
    let scores = legacy_scores(posts, scorer);
    pair_legacy_scores(posts, scores)
}

/// Legacy score of each post, in input order.
pub fn legacy_scores(posts: &[AnalyzedPost], scorer: &HeuristicScorer) -> Vec<LegacyScore> {
    posts.iter().map(|post| scorer.legacy(&post.post)).collect()
}

/// Pairs scores computed earlier with `posts` by position, highest first.
/// Ties keep input order.
pub fn pair_legacy_scores<'a>(posts: &'a [AnalyzedPost], scores: Vec<LegacyScore>) -> Vec<LegacyEntry<'a>> {
    let mut entries: Vec<LegacyEntry<'a>> = posts
        .iter()
        .zip(scores)
        .map(|(post, score)| LegacyEntry { post, score })
        .collect();
    entries.sort_by(|a, b| b.score.total.cmp(&a.score.total));
    entries
}
