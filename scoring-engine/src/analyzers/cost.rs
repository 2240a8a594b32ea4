use crate::aggregate::round_half_up;
use crate::keywords::CostTable;
use ideascout_core::{CostAnalysis, CostBreakdown};

/// Estimates MVP and monthly cost from the MVP feature labels and the
/// technical difficulty score.
pub fn analyze_cost(features: &[String], difficulty_score: i32, table: &CostTable) -> CostAnalysis {
    let feature_cost: u32 = table
        .feature_costs
        .iter()
        .filter(|entry| features.iter().any(|f| f == &entry.feature))
        .fold(0u32, |acc, entry| acc.saturating_add(entry.cost));

    let tech_cost = if difficulty_score >= 8 {
        0
    } else if difficulty_score >= 6 {
        table.medium_tech_cost
    } else {
        table.complex_tech_cost
    };

    // Hosting is reported in the breakdown but not part of the MVP total.
    // Table values come from user TOML, so the sum saturates.
    let mvp_cost = table.base.saturating_add(feature_cost).saturating_add(tech_cost);
    let monthly_cost = round_half_up(f64::from(mvp_cost) * table.monthly_ratio).max(0.0) as u32;

    CostAnalysis {
        mvp_cost,
        monthly_cost,
        breakdown: CostBreakdown {
            dev: tech_cost,
            features: feature_cost,
            hosting: table.hosting,
        },
    }
}
