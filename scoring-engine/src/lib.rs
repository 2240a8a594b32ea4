//! Heuristic scoring of startup-idea posts.
//!
//! A post's title and snippet are lower-cased into a [`NormalizedText`], run
//! through one analyzer per dimension, and combined into a 0–100 composite
//! that maps onto a [`RecommendationTier`](ideascout_core::RecommendationTier).

pub mod aggregate;
pub mod analyzers;
pub mod keywords;
pub mod legacy;
pub mod ranking;
pub mod scorer;
pub mod text;
pub mod tier;

pub use aggregate::{composite_score, round_half_up};
pub use keywords::KeywordConfig;
pub use legacy::{legacy_score, LegacyScore};
pub use ranking::{rank, RankingSummary};
pub use scorer::{score_batch, HeuristicScorer, Scorer};
pub use text::NormalizedText;
pub use tier::{classify, TierThresholds};
