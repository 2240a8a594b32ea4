use crate::keywords::TechKeywords;
use crate::text::NormalizedText;
use ideascout_core::{DifficultyLevel, TechAnalysis};

pub fn level_for(difficulty_score: i32) -> DifficultyLevel {
    if difficulty_score >= 8 {
        DifficultyLevel::Simple
    } else if difficulty_score >= 6 {
        DifficultyLevel::Medium
    } else {
        DifficultyLevel::Complex
    }
}

pub fn stack_for(level: DifficultyLevel, keywords: &TechKeywords) -> Vec<String> {
    match level {
        DifficultyLevel::Simple => keywords.simple_stack.clone(),
        DifficultyLevel::Medium => keywords.medium_stack.clone(),
        DifficultyLevel::Complex => keywords.complex_stack.clone(),
    }
}

/// `difficulty_score` is left unclamped; the aggregator clamps it.
pub fn analyze_tech(text: &NormalizedText, keywords: &TechKeywords) -> TechAnalysis {
    let simple = text.count_matches(&keywords.simple) as i32;
    let complex = text.count_matches(&keywords.complex) as i32;
    let difficulty_score = 10 - complex + simple;
    let difficulty_level = level_for(difficulty_score);

    TechAnalysis {
        difficulty_score,
        difficulty_level,
        stack: stack_for(difficulty_level, keywords),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(raw: &str) -> TechAnalysis {
        analyze_tech(&NormalizedText::new(raw), &TechKeywords::default())
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for(8), DifficultyLevel::Simple);
        assert_eq!(level_for(7), DifficultyLevel::Medium);
        assert_eq!(level_for(6), DifficultyLevel::Medium);
        assert_eq!(level_for(5), DifficultyLevel::Complex);
        assert_eq!(level_for(-3), DifficultyLevel::Complex);
    }

    #[test]
    fn test_simple_keywords_push_above_ten() {
        let tech = analyze("simple, quick, minimal");
        assert_eq!(tech.difficulty_score, 13);
        assert_eq!(tech.difficulty_level, DifficultyLevel::Simple);
        assert_eq!(tech.stack, vec!["React/Vue", "Supabase", "Vercel"]);
    }

    #[test]
    fn test_complex_keywords() {
        let tech = analyze("crypto backend and database");
        assert_eq!(tech.difficulty_score, 7);
        assert_eq!(tech.difficulty_level, DifficultyLevel::Medium);
        assert_eq!(tech.stack, vec!["Next.js", "Firebase", "Vercel"]);
    }

    #[test]
    fn test_blockchain_also_counts_ai() {
        let tech = analyze("blockchain");
        assert_eq!(tech.difficulty_score, 8);
    }

    #[test]
    fn test_ai_matches_inside_words() {
        // "ai" is a substring of "daily" and "mail".
        let tech = analyze("daily mail digest");
        assert_eq!(tech.difficulty_score, 9);
    }
}
