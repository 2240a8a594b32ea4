use crate::keywords::UserKeywords;
use crate::text::NormalizedText;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAnalysis {
    /// Segment labels in detection order, without duplicates.
    pub users: Vec<String>,
    pub score: i32,
}

impl UserAnalysis {
    fn push(&mut self, label: &str) {
        if !self.users.iter().any(|u| u == label) {
            self.users.push(label.to_string());
        }
    }
}

pub fn analyze_users(text: &NormalizedText, keywords: &UserKeywords) -> UserAnalysis {
    let mut analysis = UserAnalysis {
        users: Vec::new(),
        score: 5,
    };

    if text.contains_any(&keywords.general.keywords) {
        analysis.push(&keywords.general.label);
        analysis.score += 2;
    }
    if text.contains_any(&keywords.young.keywords) {
        analysis.push(&keywords.young.label);
        analysis.score += 1;
    }
    if text.contains_any(&keywords.professional.keywords) {
        analysis.push(&keywords.professional.label);
        analysis.score += 1;
    }

    // Specific and niche segments list every matching keyword but score once.
    let specific: Vec<&String> = text.matching(&keywords.specific).collect();
    if !specific.is_empty() {
        for label in specific {
            analysis.push(label);
        }
        analysis.score += 2;
    }
    let niche: Vec<&String> = text.matching(&keywords.niche).collect();
    if !niche.is_empty() {
        for label in niche {
            analysis.push(label);
        }
        analysis.score += 1;
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(raw: &str) -> UserAnalysis {
        analyze_users(&NormalizedText::new(raw), &UserKeywords::default())
    }

    #[test]
    fn test_baseline_without_segments() {
        let analysis = analyze("a calculator");
        assert!(analysis.users.is_empty());
        assert_eq!(analysis.score, 5);
    }

    #[test]
    fn test_young_segment() {
        let analysis = analyze("Note app for teens");
        assert_eq!(analysis.users, vec!["年轻人".to_string()]);
        assert_eq!(analysis.score, 6);
    }

    #[test]
    fn test_specific_matches_listed_but_scored_once() {
        let analysis = analyze("for parents and gamers");
        assert_eq!(analysis.users, vec!["parents".to_string(), "gamers".to_string()]);
        assert_eq!(analysis.score, 7);
    }

    #[test]
    fn test_all_groups() {
        // "students" hits both the young group (via "student") and the specific list.
        let analysis = analyze("everyone: students at work who travel");
        assert_eq!(
            analysis.users,
            vec!["普通大众", "年轻人", "专业人士", "students", "travel"]
        );
        assert_eq!(analysis.score, 5 + 2 + 1 + 1 + 2 + 1);
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let keywords = UserKeywords {
            niche: vec!["fitness".to_string(), "fitness".to_string()],
            ..UserKeywords::default()
        };
        let analysis = analyze_users(&NormalizedText::new("fitness log"), &keywords);
        assert_eq!(analysis.users, vec!["fitness".to_string()]);
        assert_eq!(analysis.score, 6);
    }
}
