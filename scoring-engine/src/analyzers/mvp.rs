use crate::keywords::MvpKeywords;
use crate::text::NormalizedText;
use ideascout_core::MvpAnalysis;

/// `users` is the output of the user analyzer; its first segment picks the
/// suggested feature set.
pub fn analyze_mvp(text: &NormalizedText, keywords: &MvpKeywords, users: &[String]) -> MvpAnalysis {
    let features = keywords
        .features
        .iter()
        .filter(|trigger| text.contains(&trigger.keyword))
        .map(|trigger| trigger.feature.clone())
        .collect();

    let hits = text.count_matches(&keywords.innovation) as i32;
    let innovation_score = (5 + hits * 2).min(10);

    let suggested_features = users
        .first()
        .and_then(|segment| keywords.suggestions.get(&segment.to_lowercase()))
        .unwrap_or(&keywords.default_suggestions)
        .clone();

    MvpAnalysis {
        features,
        innovation_score,
        suggested_features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_features_in_table_order() {
        let text = NormalizedText::new("login, then search and share");
        let mvp = analyze_mvp(&text, &MvpKeywords::default(), &[]);
        assert_eq!(mvp.features, vec!["分享功能", "搜索功能", "用户登录"]);
        assert_eq!(mvp.innovation_score, 5);
    }

    #[test]
    fn test_innovation_is_capped() {
        let text = NormalizedText::new("a unique, novel, innovative and different tool");
        let mvp = analyze_mvp(&text, &MvpKeywords::default(), &[]);
        assert_eq!(mvp.innovation_score, 10);
    }

    #[test]
    fn test_suggestions_follow_first_segment() {
        let text = NormalizedText::new("dating helper for adhd");
        let keywords = MvpKeywords::default();

        let mvp = analyze_mvp(&text, &keywords, &segments(&["adhd", "dating"]));
        assert_eq!(mvp.suggested_features[0], "思维倾倒");

        let mvp = analyze_mvp(&text, &keywords, &segments(&["年轻人", "adhd"]));
        assert_eq!(mvp.suggested_features, keywords.default_suggestions);
    }

    #[test]
    fn test_default_suggestions_without_users() {
        let mvp = analyze_mvp(&NormalizedText::new(""), &MvpKeywords::default(), &[]);
        assert_eq!(mvp.suggested_features, vec!["基础功能", "用户管理", "核心流程"]);
        assert!(mvp.features.is_empty());
    }
}
