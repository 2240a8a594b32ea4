use crate::keywords::MarketKeywords;
use crate::text::NormalizedText;
use ideascout_core::{MarketAnalysis, MarketSize};

/// Sizes the market from the detected user segments.
///
/// The global/large/specific keyword groups are only reported as signals;
/// they do not move the size or score.
pub fn analyze_market(text: &NormalizedText, keywords: &MarketKeywords, users: &[String]) -> MarketAnalysis {
    let signals = [&keywords.global, &keywords.large, &keywords.specific]
        .into_iter()
        .filter(|group| text.contains_any(&group.keywords))
        .map(|group| group.label.clone())
        .collect();

    let is_mass = users.iter().any(|u| keywords.mass_segments.contains(u));
    let is_professional = users.iter().any(|u| {
        keywords
            .professional_markers
            .iter()
            .any(|marker| !marker.is_empty() && u.contains(marker.as_str()))
    });

    let (size, score) = if is_mass {
        (MarketSize::Mass, 9)
    } else if is_professional {
        (MarketSize::Professional, 7)
    } else {
        (MarketSize::Vertical, 6)
    };

    MarketAnalysis {
        size,
        score,
        signals,
    }
}

/// Market record for an externally supplied 0–10 size score.
pub fn market_from_score(score: i32) -> MarketAnalysis {
    let score = score.clamp(0, 10);
    let size = match score {
        9..=10 => MarketSize::Mass,
        7..=8 => MarketSize::Professional,
        6 => MarketSize::Vertical,
        _ => MarketSize::Niche,
    };
    MarketAnalysis {
        size,
        score,
        signals: Vec::new(),
    }
}
