use crate::pacing::RequestPacer;
use crate::prompt::{build_prompt, parse_verdict, SYSTEM_PROMPT};
use crate::provider::{LlmProvider, OpenAiCompatibleProvider};
use async_trait::async_trait;
use ideascout_core::{
    AnalysisResult, CoreError, ErrorExt, LlmConfig, ModelNotes, RawPost, ScoreSource,
    ScoringConfig, SubScores,
};
use scoring_engine::{HeuristicScorer, Scorer};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const FALLBACK_SCORE: i32 = 5;
const FALLBACK_SUMMARY: &str = "AI 分析暂时不可用";
const FALLBACK_RISK: &str = "分析失败";

/// Scores posts with an external model.
///
/// The model supplies the seven sub-scores and a short write-up; the
/// descriptive records (stack, deployment, cost) still come from the keyword
/// tables. On any provider or parse error the post gets neutral scores of 5
/// and `ScoreSource::Fallback`.
///
/// Requests are unpaced unless an interval is set with
/// [`ExternalModelScorer::with_request_interval`].
pub struct ExternalModelScorer {
    provider: Arc<dyn LlmProvider>,
    heuristic: HeuristicScorer,
    pacer: RequestPacer,
}

impl ExternalModelScorer {
    pub fn new(provider: Arc<dyn LlmProvider>, heuristic: HeuristicScorer) -> Self {
        Self {
            provider,
            heuristic,
            pacer: RequestPacer::default(),
        }
    }

    pub fn from_config(llm: &LlmConfig, scoring: &ScoringConfig) -> Result<Self, CoreError> {
        let provider = OpenAiCompatibleProvider::from_config(llm)?;
        let heuristic = HeuristicScorer::from_config(scoring)?;
        Ok(Self::new(Arc::new(provider), heuristic)
            .with_request_interval(Duration::from_millis(llm.request_interval_ms)))
    }

    /// Minimum gap between two model requests, shared by concurrent calls.
    pub fn with_request_interval(mut self, interval: Duration) -> Self {
        self.pacer = RequestPacer::new(interval);
        self
    }

    pub fn request_interval(&self) -> Duration {
        self.pacer.interval()
    }

    async fn try_score(&self, post: &RawPost) -> Result<AnalysisResult, CoreError> {
        self.pacer.wait().await;
        let prompt = build_prompt(post);
        let raw = self.provider.complete(Some(SYSTEM_PROMPT), &prompt).await?;
        let verdict = parse_verdict(&raw, self.provider.name())?;

        let scores = verdict.scores.to_sub_scores();
        let mut result =
            self.heuristic
                .analyze_with_scores(post, scores, ScoreSource::ExternalModel);

        if !verdict.target_users.is_empty() {
            result.target_users = verdict.target_users;
        }
        if !verdict.monetization.is_empty() {
            result.business_model.monetization = verdict.monetization;
        }
        if !verdict.key_features.is_empty() {
            result.mvp.suggested_features = verdict.key_features;
        }
        result.model_notes = Some(ModelNotes {
            product_concept: verdict.product_concept,
            summary: verdict.summary,
            risks: verdict.risks,
        });
        Ok(result)
    }

    fn fallback(&self, post: &RawPost) -> AnalysisResult {
        let mut result = self.heuristic.analyze_with_scores(
            post,
            SubScores::uniform(FALLBACK_SCORE),
            ScoreSource::Fallback,
        );
        result.model_notes = Some(ModelNotes {
            product_concept: Some(post.title.clone()),
            summary: Some(FALLBACK_SUMMARY.to_string()),
            risks: vec![FALLBACK_RISK.to_string()],
        });
        result
    }
}

#[async_trait]
impl Scorer for ExternalModelScorer {
    fn name(&self) -> &str {
        "external-model"
    }

    async fn score(&self, post: &RawPost) -> AnalysisResult {
        match self.try_score(post).await {
            Ok(result) => {
                debug!("Model scored '{}': {}", post.title, result.total_score);
                result
            }
            Err(error) => {
                warn!(
                    "Model analysis failed for '{}' [{}]: {}",
                    post.title,
                    error.error_code(),
                    error
                );
                self.fallback(post)
            }
        }
    }
}
