use ideascout_core::{AnalyzedPost, RecommendationTier};
use serde::Serialize;

/// Sorts by total score, highest first. Ties keep their input order.
pub fn rank(posts: &mut [AnalyzedPost]) {
    posts.sort_by(|a, b| b.analysis.total_score.cmp(&a.analysis.total_score));
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub count: usize,
    /// Posts classified Recommend or better.
    pub recommended: usize,
    pub average_score: f64,
    pub top_score: Option<u8>,
}

impl RankingSummary {
    pub fn from_posts(posts: &[AnalyzedPost]) -> Self {
        let count = posts.len();
        let recommended = posts
            .iter()
            .filter(|p| {
                p.analysis.recommendation_tier.priority() >= RecommendationTier::Recommend.priority()
            })
            .count();
        let sum: u64 = posts.iter().map(|p| u64::from(p.analysis.total_score)).sum();
        let average_score = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };
        let top_score = posts.iter().map(|p| p.analysis.total_score).max();

        Self {
            count,
            recommended,
            average_score,
            top_score,
        }
    }
}
