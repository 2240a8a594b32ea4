use crate::keywords::DeploymentKeywords;
use crate::text::NormalizedText;
use ideascout_core::{DeploymentAnalysis, DeploymentType};

pub fn analyze_deployment(text: &NormalizedText, keywords: &DeploymentKeywords) -> DeploymentAnalysis {
    let mut plan = Vec::new();
    let mut deployment_type = DeploymentType::Web;

    if text.contains_any(&keywords.web.keywords) {
        plan.push(keywords.web.label.clone());
    }
    if text.contains_any(&keywords.mobile.keywords) {
        plan.push(keywords.mobile.label.clone());
        deployment_type = DeploymentType::Mobile;
    }
    if text.contains_any(&keywords.hybrid.keywords) {
        plan.push(keywords.hybrid.label.clone());
        deployment_type = DeploymentType::Mobile;
    }
    // The backend group is reported only; it never adds a plan entry.
    let signals = if text.contains_any(&keywords.backend.keywords) {
        vec![keywords.backend.label.clone()]
    } else {
        Vec::new()
    };

    let (suggestion, duration) = match deployment_type {
        DeploymentType::Web => (&keywords.web_suggestion, &keywords.web_duration),
        DeploymentType::Mobile => (&keywords.mobile_suggestion, &keywords.mobile_duration),
    };
    plan.push(suggestion.clone());

    DeploymentAnalysis {
        plan,
        deployment_type,
        estimated_duration: duration.clone(),
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(raw: &str) -> DeploymentAnalysis {
        analyze_deployment(&NormalizedText::new(raw), &DeploymentKeywords::default())
    }

    #[test]
    fn test_defaults_to_web() {
        let deployment = analyze("a tool");
        assert_eq!(deployment.deployment_type, DeploymentType::Web);
        assert_eq!(deployment.plan, vec!["Vercel + Stripe"]);
        assert_eq!(deployment.estimated_duration, "1-2周");
    }

    #[test]
    fn test_hybrid_implies_mobile() {
        let deployment = analyze("flutter tool");
        assert_eq!(deployment.deployment_type, DeploymentType::Mobile);
        assert_eq!(deployment.plan, vec!["跨平台打包", "React Native + Firebase"]);
        assert_eq!(deployment.estimated_duration, "4-6周");
    }

    #[test]
    fn test_mobile_wins_over_web() {
        let deployment = analyze("website and ios");
        assert_eq!(deployment.deployment_type, DeploymentType::Mobile);
        assert_eq!(
            deployment.plan,
            vec!["Vercel/Netlify部署", "App Store/Google Play", "React Native + Firebase"]
        );
    }

    #[test]
    fn test_backend_is_a_signal_not_a_plan_entry() {
        let deployment = analyze("server side tool");
        assert_eq!(deployment.deployment_type, DeploymentType::Web);
        assert_eq!(deployment.plan, vec!["Vercel + Stripe"]);
        assert_eq!(deployment.signals, vec!["API/数据库托管"]);
    }

    #[test]
    fn test_ai_inside_words_does_not_touch_plan() {
        // "ai" matches inside "daily" and "email".
        let deployment = analyze("daily email digest");
        assert_eq!(deployment.plan, vec!["Vercel + Stripe"]);
        assert_eq!(deployment.signals, vec!["API/数据库托管"]);
    }
}
