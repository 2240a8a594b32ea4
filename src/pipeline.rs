//! Glue between configuration and the collect / analyze / report stages.

use async_trait::async_trait;
use chrono::NaiveDate;
use ideascout_core::{AnalysisResult, AnalyzedPost, AppConfig, CoreError, RawPost, ScorerKind};
use llm_interface::ExternalModelScorer;
use reddit_client::{CollectionStats, Collector};
use report::{ReportFiles, ReportWriter};
use scoring_engine::{rank, score_batch, HeuristicScorer, RankingSummary, Scorer};
use tracing::info;

/// The scorer selected by `[scoring] scorer`.
pub enum AnyScorer {
    Heuristic(HeuristicScorer),
    External(ExternalModelScorer),
}

impl AnyScorer {
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        Ok(match config.scoring.scorer {
            ScorerKind::Heuristic => Self::Heuristic(HeuristicScorer::from_config(&config.scoring)?),
            ScorerKind::ExternalModel => {
                Self::External(ExternalModelScorer::from_config(&config.llm, &config.scoring)?)
            }
        })
    }
}

#[async_trait]
impl Scorer for AnyScorer {
    fn name(&self) -> &str {
        match self {
            Self::Heuristic(scorer) => scorer.name(),
            Self::External(scorer) => scorer.name(),
        }
    }

    async fn score(&self, post: &RawPost) -> AnalysisResult {
        match self {
            Self::Heuristic(scorer) => scorer.score(post).await,
            Self::External(scorer) => scorer.score(post).await,
        }
    }
}

pub async fn collect(config: &AppConfig, target: usize) -> Result<Vec<RawPost>, CoreError> {
    let collector = Collector::from_config(&config.collector)?;
    let posts = collector.collect(target).await?;

    let stats = CollectionStats::from_posts(&posts);
    info!(
        "Collected {} posts from {} subreddits (avg score {:.1}, avg comments {:.1})",
        stats.count,
        stats.subreddits.len(),
        stats.average_score,
        stats.average_comments
    );
    Ok(posts)
}

/// Scores and ranks a batch. Scoring never fails per post.
pub async fn analyze(config: &AppConfig, posts: Vec<RawPost>) -> Result<Vec<AnalyzedPost>, CoreError> {
    let scorer = AnyScorer::from_config(config)?;
    info!("Scoring {} posts with the {} scorer", posts.len(), scorer.name());

    let mut analyzed = score_batch(&scorer, posts, config.scoring.concurrency).await;
    rank(&mut analyzed);

    let summary = RankingSummary::from_posts(&analyzed);
    info!(
        "Ranked {} posts: {} recommended, average {:.1}, top {}",
        summary.count,
        summary.recommended,
        summary.average_score,
        summary.top_score.map_or_else(|| "-".to_string(), |s| s.to_string())
    );
    Ok(analyzed)
}

pub fn report(
    config: &AppConfig,
    posts: &[AnalyzedPost],
    date: NaiveDate,
) -> Result<ReportFiles, CoreError> {
    let mut writer = ReportWriter::from_config(&config.report);
    if config.report.legacy_scale {
        writer = writer.with_legacy_scale(HeuristicScorer::from_config(&config.scoring)?);
    }
    writer.write(posts, date)
}
