use ideascout_core::RecommendationTier;

/// Lower bounds of the three upper tiers on one score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub strongly_recommend: u8,
    pub recommend: u8,
    pub consider: u8,
}

impl TierThresholds {
    /// The canonical 0–100 composite scale.
    pub const COMPOSITE: TierThresholds = TierThresholds {
        strongly_recommend: 70,
        recommend: 60,
        consider: 50,
    };

    /// The 0–50 legacy scale.
    pub const LEGACY: TierThresholds = TierThresholds {
        strongly_recommend: 40,
        recommend: 35,
        consider: 30,
    };

    pub fn classify(&self, total: u8) -> RecommendationTier {
        if total >= self.strongly_recommend {
            RecommendationTier::StronglyRecommend
        } else if total >= self.recommend {
            RecommendationTier::Recommend
        } else if total >= self.consider {
            RecommendationTier::Consider
        } else {
            RecommendationTier::NeedsEvaluation
        }
    }

    /// One-line legend, e.g. for report footers.
    pub fn legend(&self) -> String {
        format!(
            "{}({}+) | {}({}+) | {}({}+) | {}(<{})",
            RecommendationTier::StronglyRecommend.label(),
            self.strongly_recommend,
            RecommendationTier::Recommend.label(),
            self.recommend,
            RecommendationTier::Consider.label(),
            self.consider,
            RecommendationTier::NeedsEvaluation.label(),
            self.consider
        )
    }
}

/// Classifies a composite total.
pub fn classify(total: u8) -> RecommendationTier {
    TierThresholds::COMPOSITE.classify(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_boundaries() {
        assert_eq!(classify(100), RecommendationTier::StronglyRecommend);
        assert_eq!(classify(70), RecommendationTier::StronglyRecommend);
        assert_eq!(classify(69), RecommendationTier::Recommend);
        assert_eq!(classify(60), RecommendationTier::Recommend);
        assert_eq!(classify(59), RecommendationTier::Consider);
        assert_eq!(classify(50), RecommendationTier::Consider);
        assert_eq!(classify(49), RecommendationTier::NeedsEvaluation);
        assert_eq!(classify(0), RecommendationTier::NeedsEvaluation);
    }

    #[test]
    fn test_legacy_boundaries() {
        let legacy = TierThresholds::LEGACY;
        assert_eq!(legacy.classify(40), RecommendationTier::StronglyRecommend);
        assert_eq!(legacy.classify(39), RecommendationTier::Recommend);
        assert_eq!(legacy.classify(35), RecommendationTier::Recommend);
        assert_eq!(legacy.classify(30), RecommendationTier::Consider);
        assert_eq!(legacy.classify(29), RecommendationTier::NeedsEvaluation);
    }

    #[test]
    fn test_legend_mentions_thresholds() {
        let legend = TierThresholds::COMPOSITE.legend();
        assert!(legend.contains("(70+)"));
        assert!(legend.contains("(<50)"));
    }
}
