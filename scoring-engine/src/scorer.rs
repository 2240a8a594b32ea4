use crate::aggregate::composite_score;
use crate::analyzers::{
    analyze_business, analyze_competition, analyze_cost, analyze_deployment, analyze_market,
    analyze_mvp, analyze_tech, analyze_users, business_value, competition_from_score, level_for,
    market_from_score, stack_for,
};
use crate::keywords::KeywordConfig;
use crate::legacy::{legacy_score, LegacyScore};
use crate::text::NormalizedText;
use crate::tier::classify;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use ideascout_core::{
    AnalysisResult, AnalyzedPost, CoreError, RawPost, ScoreSource, ScoreWeights, ScoringConfig,
    SubScores, TechAnalysis,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Something that turns a post into an analysis.
///
/// Implementations never fail: a scorer that depends on an outside service
/// returns a fallback analysis instead of an error, so one post can never
/// abort a batch.
#[async_trait]
pub trait Scorer: Send + Sync {
    fn name(&self) -> &str;

    async fn score(&self, post: &RawPost) -> AnalysisResult;
}

/// Keyword-heuristic scorer. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    keywords: Arc<KeywordConfig>,
    weights: ScoreWeights,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(KeywordConfig::default(), ScoreWeights::default())
    }
}

impl HeuristicScorer {
    pub fn new(keywords: KeywordConfig, weights: ScoreWeights) -> Self {
        Self {
            keywords: Arc::new(keywords),
            weights,
        }
    }

    /// Uses the keyword file named in the config, or the built-in tables.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, CoreError> {
        let keywords = match &config.keywords_file {
            Some(path) => KeywordConfig::load(path)?,
            None => KeywordConfig::default(),
        };
        Ok(Self::new(keywords, config.weights))
    }

    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn analyze(&self, post: &RawPost) -> AnalysisResult {
        let text = NormalizedText::from_post(post);
        let keywords = &*self.keywords;

        let users = analyze_users(&text, &keywords.users);
        let business_model = analyze_business(&text, &keywords.business);
        let mvp = analyze_mvp(&text, &keywords.mvp, &users.users);
        let tech = analyze_tech(&text, &keywords.tech);
        let deployment = analyze_deployment(&text, &keywords.deployment);
        let cost = analyze_cost(&mvp.features, tech.difficulty_score, &keywords.cost);
        let competition = analyze_competition(&text, &keywords.competition);
        let market = analyze_market(&text, &keywords.market, &users.users);

        let sub_scores = SubScores {
            user_demand: Some(users.score),
            business_value: Some(business_value(&text, &keywords.business)),
            technical_difficulty: Some(tech.difficulty_score),
            innovation: Some(mvp.innovation_score),
            market_competition: Some(competition.score),
            profitability: Some(business_model.profitability),
            market_size: Some(market.score),
        };
        let total_score = composite_score(&sub_scores, &self.weights);

        debug!(
            "Scored '{}': total {} (users {}, tech {})",
            post.title, total_score, users.score, tech.difficulty_score
        );

        AnalysisResult {
            target_users: users.users,
            business_model,
            mvp,
            tech,
            deployment,
            cost,
            competition,
            market,
            sub_scores,
            total_score,
            recommendation_tier: classify(total_score),
            source: ScoreSource::Heuristic,
            model_notes: None,
        }
    }

    /// Builds an analysis around sub-scores supplied from elsewhere.
    ///
    /// Descriptive fields still come from the keyword tables; every present
    /// score replaces the matching heuristic one and the dependent records
    /// (tech level, cost, competition, market) are rebuilt from it. Missing
    /// scores keep their heuristic record but still count as missing in the
    /// total.
    pub fn analyze_with_scores(
        &self,
        post: &RawPost,
        scores: SubScores,
        source: ScoreSource,
    ) -> AnalysisResult {
        let mut result = self.analyze(post);
        let keywords = &*self.keywords;

        if let Some(profitability) = scores.profitability {
            result.business_model.profitability = profitability.clamp(0, 10);
        }
        if let Some(innovation) = scores.innovation {
            result.mvp.innovation_score = innovation.clamp(0, 10);
        }
        if let Some(difficulty_score) = scores.technical_difficulty {
            let difficulty_level = level_for(difficulty_score);
            result.tech = TechAnalysis {
                difficulty_score,
                difficulty_level,
                stack: stack_for(difficulty_level, &keywords.tech),
            };
            result.cost = analyze_cost(&result.mvp.features, difficulty_score, &keywords.cost);
        }
        if let Some(competition) = scores.market_competition {
            result.competition = competition_from_score(competition, &keywords.competition);
        }
        if let Some(size) = scores.market_size {
            result.market = market_from_score(size);
        }

        result.sub_scores = scores;
        result.total_score = composite_score(&scores, &self.weights);
        result.recommendation_tier = classify(result.total_score);
        result.source = source;
        result
    }

    pub fn legacy(&self, post: &RawPost) -> LegacyScore {
        legacy_score(&NormalizedText::from_post(post), &self.keywords.legacy)
    }
}

#[async_trait]
impl Scorer for HeuristicScorer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn score(&self, post: &RawPost) -> AnalysisResult {
        self.analyze(post)
    }
}

/// Scores every post with at most `concurrency` in flight, keeping input order.
pub async fn score_batch<S>(scorer: &S, posts: Vec<RawPost>, concurrency: usize) -> Vec<AnalyzedPost>
where
    S: Scorer + ?Sized,
{
    let total = posts.len();
    info!(
        "Scoring {} posts with the {} scorer (concurrency {})",
        total,
        scorer.name(),
        concurrency.max(1)
    );

    let analyzed: Vec<AnalyzedPost> = stream::iter(posts)
        .map(|post| async move {
            let analysis = scorer.score(&post).await;
            AnalyzedPost { post, analysis }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let fallbacks = analyzed
        .iter()
        .filter(|p| p.analysis.source == ScoreSource::Fallback)
        .count();
    info!("Scored {} posts ({} fallbacks)", analyzed.len(), fallbacks);
    analyzed
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideascout_core::{DifficultyLevel, MarketSize, RecommendationTier};

    #[test]
    fn test_analyze_fills_every_sub_score() {
        let scorer = HeuristicScorer::default();
        let result = scorer.analyze(&RawPost::new("X", ""));
        let s = result.sub_scores;
        assert!(s.user_demand.is_some());
        assert!(s.business_value.is_some());
        assert!(s.technical_difficulty.is_some());
        assert!(s.innovation.is_some());
        assert!(s.market_competition.is_some());
        assert!(s.profitability.is_some());
        assert!(s.market_size.is_some());
        assert_eq!(result.source, ScoreSource::Heuristic);
    }

    #[test]
    fn test_analyze_with_scores_rebuilds_dependent_records() {
        let scorer = HeuristicScorer::default();
        let post = RawPost::new("Simple habit tracker", "");
        let scores = SubScores {
            technical_difficulty: Some(3),
            market_size: Some(9),
            ..SubScores::uniform(6)
        };

        let result = scorer.analyze_with_scores(&post, scores, ScoreSource::ExternalModel);
        assert_eq!(result.tech.difficulty_level, DifficultyLevel::Complex);
        assert_eq!(result.cost.mvp_cost, 6000);
        assert_eq!(result.market.size, MarketSize::Mass);
        assert_eq!(result.competition.score, 6);
        assert!(result.competition.has_competition);
        assert_eq!(result.source, ScoreSource::ExternalModel);
        assert_eq!(result.sub_scores, scores);
    }

    #[test]
    fn test_uniform_five_is_consider() {
        let scorer = HeuristicScorer::default();
        let result = scorer.analyze_with_scores(
            &RawPost::new("anything", ""),
            SubScores::uniform(5),
            ScoreSource::Fallback,
        );
        assert_eq!(result.total_score, 50);
        assert_eq!(result.recommendation_tier, RecommendationTier::Consider);
    }

    #[tokio::test]
    async fn test_score_batch_preserves_order() {
        let scorer = HeuristicScorer::default();
        let posts: Vec<RawPost> = (0..9)
            .map(|i| RawPost {
                url: format!("https://reddit.com/r/AppIdeas/comments/{}", i),
                ..RawPost::new(format!("Idea {}", i), "")
            })
            .collect();

        let analyzed = score_batch(&scorer, posts.clone(), 3).await;
        let urls: Vec<&str> = analyzed.iter().map(|p| p.post.url.as_str()).collect();
        let expected: Vec<&str> = posts.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, expected);
    }

    #[tokio::test]
    async fn test_score_batch_through_trait_object() {
        let scorer: Arc<dyn Scorer> = Arc::new(HeuristicScorer::default());
        let analyzed = score_batch(scorer.as_ref(), vec![RawPost::new("one", "")], 0).await;
        assert_eq!(analyzed.len(), 1);
    }
}
