//! Weighted composite of the seven sub-scores.

use ideascout_core::{ScoreWeights, SubScores};

/// Rounds halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Composite score on the 0–100 scale.
///
/// Each present input is clamped to `[0, 10]`; technical difficulty enters
/// inverted. A missing input, or a non-finite sum, yields 0.
pub fn composite_score(scores: &SubScores, weights: &ScoreWeights) -> u8 {
    let term = |value: Option<i32>| value.map(|v| f64::from(v.clamp(0, 10)));

    let (
        Some(user_demand),
        Some(business_value),
        Some(technical_difficulty),
        Some(innovation),
        Some(market_competition),
        Some(profitability),
        Some(market_size),
    ) = (
        term(scores.user_demand),
        term(scores.business_value),
        term(scores.technical_difficulty),
        term(scores.innovation),
        term(scores.market_competition),
        term(scores.profitability),
        term(scores.market_size),
    )
    else {
        return 0;
    };

    // Summation order is fixed so that totals are reproducible bit for bit.
    let total = (user_demand * weights.user_demand
        + business_value * weights.business_value
        + (10.0 - technical_difficulty) * weights.technical_difficulty
        + innovation * weights.innovation
        + market_competition * weights.market_competition
        + profitability * weights.profitability
        + market_size * weights.market_size)
        * 10.0;

    if !total.is_finite() {
        return 0;
    }
    round_half_up(total).clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
    }

    #[test]
    fn test_uniform_five() {
        // Inverted difficulty keeps the uniform case at the midpoint.
        assert_eq!(composite_score(&SubScores::uniform(5), &ScoreWeights::default()), 50);
    }

    #[test]
    fn test_extremes() {
        let weights = ScoreWeights::default();
        let best = SubScores {
            technical_difficulty: Some(0),
            ..SubScores::uniform(10)
        };
        assert_eq!(composite_score(&best, &weights), 100);

        let worst = SubScores {
            technical_difficulty: Some(10),
            ..SubScores::uniform(0)
        };
        assert_eq!(composite_score(&worst, &weights), 0);
    }

    #[test]
    fn test_inputs_are_clamped() {
        let weights = ScoreWeights::default();
        let wild = SubScores {
            technical_difficulty: Some(-7),
            ..SubScores::uniform(25)
        };
        assert_eq!(composite_score(&wild, &weights), 100);
    }

    #[test]
    fn test_missing_input_degrades_to_zero() {
        let scores = SubScores {
            business_value: None,
            ..SubScores::uniform(9)
        };
        assert_eq!(composite_score(&scores, &ScoreWeights::default()), 0);
        assert_eq!(composite_score(&SubScores::default(), &ScoreWeights::default()), 0);
    }

    #[test]
    fn test_non_finite_weights_degrade_to_zero() {
        let weights = ScoreWeights {
            innovation: f64::NAN,
            ..ScoreWeights::default()
        };
        assert_eq!(composite_score(&SubScores::uniform(7), &weights), 0);
    }
}
