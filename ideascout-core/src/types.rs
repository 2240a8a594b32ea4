use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BRACKET_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").expect("Invalid tag regex"));

/// A post as produced by one of the ingestion sources.
///
/// Every field defaults when absent so that posts from the Reddit listing and
/// from search results share one shape before they reach the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPost {
    pub title: String,
    #[serde(alias = "selftext")]
    pub snippet: String,
    pub url: String,
    pub subreddit: String,
    pub score: i64,
    #[serde(alias = "num_comments")]
    pub num_comments: u64,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Search-engine date text such as "3 days ago". Not parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RawPost {
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            ..Default::default()
        }
    }

    /// Title with bracketed tags such as `[Request]` stripped.
    /// Each `[` is closed by the nearest `]`; an unclosed `[` is kept.
    pub fn display_title(&self) -> String {
        BRACKET_TAG.replace_all(&self.title, "").trim().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Simple,
    Medium,
    Complex,
}

impl DifficultyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Simple => "简单",
            DifficultyLevel::Medium => "中等",
            DifficultyLevel::Complex => "复杂",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentType {
    Web,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSize {
    Mass,
    Professional,
    Vertical,
    Niche,
}

impl MarketSize {
    pub fn label(&self) -> &'static str {
        match self {
            MarketSize::Mass => "大众市场",
            MarketSize::Professional => "专业市场",
            MarketSize::Vertical => "垂直市场",
            MarketSize::Niche => "小众市场",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationTier {
    StronglyRecommend,
    Recommend,
    Consider,
    NeedsEvaluation,
}

impl RecommendationTier {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::StronglyRecommend => "🔥 强烈推荐",
            RecommendationTier::Recommend => "✅ 推荐",
            RecommendationTier::Consider => "🤔 考虑",
            RecommendationTier::NeedsEvaluation => "⚠️ 需评估",
        }
    }

    /// Higher is better; used to compare tiers.
    pub fn priority(&self) -> u8 {
        match self {
            RecommendationTier::StronglyRecommend => 3,
            RecommendationTier::Recommend => 2,
            RecommendationTier::Consider => 1,
            RecommendationTier::NeedsEvaluation => 0,
        }
    }
}

/// Which scoring path produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreSource {
    Heuristic,
    ExternalModel,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessModel {
    pub types: Vec<String>,
    pub profitability: i32,
    pub monetization: Vec<String>,
}

impl BusinessModel {
    /// Comma-joined model names, or "待确定" when none was detected.
    pub fn summary(&self) -> String {
        if self.types.is_empty() {
            "待确定".to_string()
        } else {
            self.types.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpAnalysis {
    pub features: Vec<String>,
    pub innovation_score: i32,
    pub suggested_features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechAnalysis {
    /// Higher means simpler. Not clamped; may exceed 10 or go negative.
    pub difficulty_score: i32,
    pub difficulty_level: DifficultyLevel,
    pub stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentAnalysis {
    pub plan: Vec<String>,
    #[serde(rename = "type")]
    pub deployment_type: DeploymentType,
    pub estimated_duration: String,
    /// Server-side hosting hints. Not part of the plan.
    #[serde(default)]
    pub signals: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub dev: u32,
    pub features: u32,
    pub hosting: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysis {
    pub mvp_cost: u32,
    pub monthly_cost: u32,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionAnalysis {
    pub has_competition: bool,
    pub competitors: Vec<String>,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub size: MarketSize,
    pub score: i32,
    /// Market keyword groups that matched. Informational only.
    #[serde(default)]
    pub signals: Vec<String>,
}

/// The seven inputs of the weighted composite. `None` marks a missing input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub user_demand: Option<i32>,
    pub business_value: Option<i32>,
    pub technical_difficulty: Option<i32>,
    pub innovation: Option<i32>,
    pub market_competition: Option<i32>,
    pub profitability: Option<i32>,
    pub market_size: Option<i32>,
}

impl SubScores {
    pub fn uniform(value: i32) -> Self {
        Self {
            user_demand: Some(value),
            business_value: Some(value),
            technical_difficulty: Some(value),
            innovation: Some(value),
            market_competition: Some(value),
            profitability: Some(value),
            market_size: Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelNotes {
    pub product_concept: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub target_users: Vec<String>,
    pub business_model: BusinessModel,
    pub mvp: MvpAnalysis,
    pub tech: TechAnalysis,
    pub deployment: DeploymentAnalysis,
    pub cost: CostAnalysis,
    pub competition: CompetitionAnalysis,
    pub market: MarketAnalysis,
    pub sub_scores: SubScores,
    pub total_score: u8,
    pub recommendation_tier: RecommendationTier,
    pub source: ScoreSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_notes: Option<ModelNotes>,
}

/// A post together with its analysis, the unit handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedPost {
    #[serde(flatten)]
    pub post: RawPost,
    pub analysis: AnalysisResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_post_defaults_missing_fields() {
        let post: RawPost = serde_json::from_str(r#"{"title":"Need an app"}"#).unwrap();
        assert_eq!(post.title, "Need an app");
        assert_eq!(post.snippet, "");
        assert_eq!(post.score, 0);
        assert_eq!(post.num_comments, 0);
        assert!(post.created_at.is_none());
    }

    #[test]
    fn test_raw_post_accepts_reddit_field_names() {
        let post: RawPost = serde_json::from_str(
            r#"{"title":"t","selftext":"body","num_comments":7,"subreddit":"AppIdeas"}"#,
        )
        .unwrap();
        assert_eq!(post.snippet, "body");
        assert_eq!(post.num_comments, 7);
        assert_eq!(post.subreddit, "AppIdeas");
    }

    #[test]
    fn test_display_title_strips_tags() {
        let post = RawPost::new("[Request] [iOS] Habit tracker for nurses ", "");
        assert_eq!(post.display_title(), "Habit tracker for nurses");
    }

    #[test]
    fn test_display_title_keeps_unclosed_bracket() {
        let post = RawPost::new("Need an app [beta", "");
        assert_eq!(post.display_title(), "Need an app [beta");
    }

    #[test]
    fn test_display_title_nested_brackets_close_at_first_match() {
        let post = RawPost::new("[a [b] c] d", "");
        assert_eq!(post.display_title(), "c] d");
    }

    #[test]
    fn test_tier_priority_order() {
        assert!(
            RecommendationTier::StronglyRecommend.priority()
                > RecommendationTier::Recommend.priority()
        );
        assert!(RecommendationTier::Recommend.priority() > RecommendationTier::Consider.priority());
        assert!(
            RecommendationTier::Consider.priority()
                > RecommendationTier::NeedsEvaluation.priority()
        );
    }

    #[test]
    fn test_business_model_summary() {
        let model = BusinessModel {
            types: vec![],
            profitability: 3,
            monetization: vec!["广告/免费增值".to_string()],
        };
        assert_eq!(model.summary(), "待确定");
    }
}
