use crate::keywords::CompetitionKeywords;
use crate::text::NormalizedText;
use ideascout_core::CompetitionAnalysis;

pub fn analyze_competition(text: &NormalizedText, keywords: &CompetitionKeywords) -> CompetitionAnalysis {
    let has_competition = text.contains_any(&keywords.existing);
    build(has_competition, keywords)
}

/// Competition record for an externally supplied score, where higher means a
/// less crowded market.
pub fn competition_from_score(score: i32, keywords: &CompetitionKeywords) -> CompetitionAnalysis {
    let mut analysis = build(score < keywords.open_score, keywords);
    analysis.score = score.clamp(0, 10);
    analysis
}

fn build(has_competition: bool, keywords: &CompetitionKeywords) -> CompetitionAnalysis {
    let (note, score) = if has_competition {
        (&keywords.crowded_note, keywords.crowded_score)
    } else {
        (&keywords.open_note, keywords.open_score)
    };
    CompetitionAnalysis {
        has_competition,
        competitors: vec![note.clone()],
        score,
    }
}
