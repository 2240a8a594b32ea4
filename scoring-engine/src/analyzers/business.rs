use crate::keywords::BusinessKeywords;
use crate::text::NormalizedText;
use ideascout_core::BusinessModel;

pub fn analyze_business(text: &NormalizedText, keywords: &BusinessKeywords) -> BusinessModel {
    let types: Vec<String> = keywords
        .models
        .iter()
        .filter(|group| text.contains_any(&group.keywords))
        .map(|group| group.label.clone())
        .collect();

    let profitability = match types.len() {
        0 => 3,
        1 => 6,
        _ => 8,
    };
    let monetization = if types.is_empty() {
        keywords.fallback_monetization.clone()
    } else {
        types.clone()
    };

    BusinessModel {
        types,
        profitability,
        monetization,
    }
}

/// Commercial-intent score: 5 plus one per value signal, capped at 10.
pub fn business_value(text: &NormalizedText, keywords: &BusinessKeywords) -> i32 {
    let hits = text.count_matches(&keywords.value_signals) as i32;
    (5 + hits).min(10)
}
