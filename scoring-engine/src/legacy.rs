//! The 0–50 legacy scale: five equally weighted dimensions, each capped at 10.
//!
//! Kept as an export format only; it is never mixed with the composite scale.

use crate::keywords::LegacyKeywords;
use crate::text::NormalizedText;
use crate::tier::TierThresholds;
use ideascout_core::RecommendationTier;
use serde::{Deserialize, Serialize};

const COMPETITION_SCORE: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyScore {
    pub business_value: i32,
    pub technical_difficulty: i32,
    pub user_demand: i32,
    pub innovation: i32,
    pub market_competition: i32,
    pub total: u8,
}

impl LegacyScore {
    pub fn tier(&self) -> RecommendationTier {
        TierThresholds::LEGACY.classify(self.total)
    }
}

fn capped(value: i32) -> i32 {
    value.clamp(0, 10)
}

pub fn legacy_score(text: &NormalizedText, keywords: &LegacyKeywords) -> LegacyScore {
    let count = |list: &[String]| text.count_matches(list) as i32;

    let business_value = capped(5 + count(&keywords.business));
    let technical_difficulty = capped(8 - count(&keywords.complex) + count(&keywords.simple));
    let user_demand = capped(6 + count(&keywords.demand));
    let innovation = capped(5 + count(&keywords.innovation));
    let market_competition = COMPETITION_SCORE;

    let total = business_value + technical_difficulty + user_demand + innovation + market_competition;

    LegacyScore {
        business_value,
        technical_difficulty,
        user_demand,
        innovation,
        market_competition,
        total: total as u8,
    }
}
