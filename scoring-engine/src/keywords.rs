//! Keyword tables driving the heuristic analyzers.
//!
//! The tables are plain data handed to each analyzer, so tests and
//! localized deployments can swap them. `KeywordConfig::default()` carries the
//! built-in English tables; a TOML file may replace any section.

use ideascout_core::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A labelled set of trigger keywords. The group is present when any keyword
/// occurs in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub label: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: words(keywords),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub users: UserKeywords,
    pub business: BusinessKeywords,
    pub mvp: MvpKeywords,
    pub tech: TechKeywords,
    pub deployment: DeploymentKeywords,
    pub cost: CostTable,
    pub competition: CompetitionKeywords,
    pub market: MarketKeywords,
    pub legacy: LegacyKeywords,
}

impl KeywordConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        info!("Loaded keyword tables from {}", path.display());
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserKeywords {
    pub general: KeywordGroup,
    pub young: KeywordGroup,
    pub professional: KeywordGroup,
    /// Each matching keyword becomes a segment label of its own.
    pub specific: Vec<String>,
    pub niche: Vec<String>,
}

impl Default for UserKeywords {
    fn default() -> Self {
        Self {
            general: KeywordGroup::new(
                "普通大众",
                &["everyone", "anyone", "all users", "general", "everyone needs"],
            ),
            young: KeywordGroup::new(
                "年轻人",
                &[
                    "teen",
                    "youth",
                    "college",
                    "student",
                    "young adult",
                    "millennial",
                    "gen z",
                ],
            ),
            professional: KeywordGroup::new(
                "专业人士",
                &[
                    "professional",
                    "business",
                    "work",
                    "employee",
                    "boss",
                    "manager",
                ],
            ),
            specific: words(&[
                "women", "men", "parents", "senior", "elderly", "students", "gamers",
            ]),
            niche: words(&[
                "adhd", "autism", "fitness", "cooking", "travel", "finance", "dating",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessKeywords {
    /// Revenue models, checked in order; the label is the model name.
    pub models: Vec<KeywordGroup>,
    /// Used as monetization when no model is detected.
    pub fallback_monetization: Vec<String>,
    /// Signals of commercial intent feeding the business-value term.
    pub value_signals: Vec<String>,
}

impl Default for BusinessKeywords {
    fn default() -> Self {
        Self {
            models: vec![
                KeywordGroup::new(
                    "subscription",
                    &[
                        "subscription",
                        "monthly fee",
                        "paid",
                        "premium",
                        "freemium",
                        "membership",
                    ],
                ),
                KeywordGroup::new(
                    "advertising",
                    &["advertising", "ads", "monetize", "ad revenue", "sponsor"],
                ),
                KeywordGroup::new(
                    "transaction",
                    &["transaction", "fee", "commission", "marketplace", "sell"],
                ),
                KeywordGroup::new("product", &["product", "sell", "ecommerce", "shop", "store"]),
                KeywordGroup::new("service", &["service", "consulting", "agency", "help"]),
                KeywordGroup::new("data", &["data", "analytics", "insights", "report"]),
            ],
            fallback_monetization: words(&["广告/免费增值"]),
            value_signals: words(&[
                "monetize", "revenue", "business", "market", "sell", "profit", "startup",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTrigger {
    pub keyword: String,
    pub feature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MvpKeywords {
    pub features: Vec<FeatureTrigger>,
    pub innovation: Vec<String>,
    /// Suggested MVP feature sets keyed by lower-cased user segment.
    pub suggestions: BTreeMap<String, Vec<String>>,
    pub default_suggestions: Vec<String>,
}

impl Default for MvpKeywords {
    fn default() -> Self {
        let features = [
            ("capture", "内容捕捉"),
            ("organize", "内容整理"),
            ("share", "分享功能"),
            ("notify", "通知提醒"),
            ("search", "搜索功能"),
            ("profile", "个人资料"),
            ("login", "用户登录"),
        ]
        .iter()
        .map(|(keyword, feature)| FeatureTrigger {
            keyword: keyword.to_string(),
            feature: feature.to_string(),
        })
        .collect();

        let mut suggestions = BTreeMap::new();
        suggestions.insert(
            "adhd".to_string(),
            words(&["思维倾倒", "分类标签", "提醒功能", "简洁界面"]),
        );
        suggestions.insert(
            "dating".to_string(),
            words(&["资料展示", "匹配算法", "即时通讯", "兴趣标签"]),
        );
        suggestions.insert(
            "fitness".to_string(),
            words(&["运动追踪", "数据记录", "目标设置", "社交挑战"]),
        );
        suggestions.insert(
            "finance".to_string(),
            words(&["记账功能", "分析图表", "预算设置", "提醒功能"]),
        );

        Self {
            features,
            innovation: words(&["unique", "innovative", "novel", "different", "new", "first"]),
            suggestions,
            default_suggestions: words(&["基础功能", "用户管理", "核心流程"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechKeywords {
    pub simple: Vec<String>,
    pub complex: Vec<String>,
    pub simple_stack: Vec<String>,
    pub medium_stack: Vec<String>,
    pub complex_stack: Vec<String>,
}

impl Default for TechKeywords {
    fn default() -> Self {
        Self {
            simple: words(&[
                "simple", "basic", "easy", "quick", "minimal", "no-code", "low-code",
            ]),
            complex: words(&[
                "ai",
                "ml",
                "machine learning",
                "blockchain",
                "crypto",
                "api integration",
                "backend",
                "database",
                "real-time",
                "live",
            ]),
            simple_stack: words(&["React/Vue", "Supabase", "Vercel"]),
            medium_stack: words(&["Next.js", "Firebase", "Vercel"]),
            complex_stack: words(&["Node.js", "PostgreSQL", "AWS"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentKeywords {
    /// Web, mobile and hybrid labels are the plan entries appended when the
    /// group matches. The backend label is only reported as a signal.
    pub web: KeywordGroup,
    pub mobile: KeywordGroup,
    pub hybrid: KeywordGroup,
    pub backend: KeywordGroup,
    pub web_suggestion: String,
    pub mobile_suggestion: String,
    pub web_duration: String,
    pub mobile_duration: String,
}

impl Default for DeploymentKeywords {
    fn default() -> Self {
        Self {
            web: KeywordGroup::new(
                "Vercel/Netlify部署",
                &["web", "website", "browser", "online", "cloud"],
            ),
            mobile: KeywordGroup::new(
                "App Store/Google Play",
                &["mobile", "app", "ios", "android", "native"],
            ),
            hybrid: KeywordGroup::new(
                "跨平台打包",
                &[
                    "hybrid",
                    "cross-platform",
                    "flutter",
                    "react native",
                    "capacitor",
                ],
            ),
            backend: KeywordGroup::new(
                "API/数据库托管",
                &["ai", "api", "backend", "server", "database"],
            ),
            web_suggestion: "Vercel + Stripe".to_string(),
            mobile_suggestion: "React Native + Firebase".to_string(),
            web_duration: "1-2周".to_string(),
            mobile_duration: "4-6周".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCost {
    pub feature: String,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    pub base: u32,
    pub hosting: u32,
    /// Extra cost per MVP feature label.
    pub feature_costs: Vec<FeatureCost>,
    pub medium_tech_cost: u32,
    pub complex_tech_cost: u32,
    pub monthly_ratio: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        let feature_costs = [("即时通讯", 2000), ("匹配算法", 5000), ("实时数据", 3000)]
            .iter()
            .map(|(feature, cost)| FeatureCost {
                feature: feature.to_string(),
                cost: *cost,
            })
            .collect();

        Self {
            base: 1000,
            hosting: 500,
            feature_costs,
            medium_tech_cost: 2000,
            complex_tech_cost: 5000,
            monthly_ratio: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitionKeywords {
    pub existing: Vec<String>,
    pub crowded_note: String,
    pub open_note: String,
    pub crowded_score: i32,
    pub open_score: i32,
}

impl Default for CompetitionKeywords {
    fn default() -> Self {
        Self {
            existing: words(&[
                "existing",
                "compete",
                "market",
                "similar",
                "already",
                "competing",
                "rival",
            ]),
            crowded_note: "有竞品，需差异化".to_string(),
            open_note: "市场空白".to_string(),
            crowded_score: 5,
            open_score: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketKeywords {
    pub global: KeywordGroup,
    pub large: KeywordGroup,
    pub specific: KeywordGroup,
    /// User segments that make a mass market.
    pub mass_segments: Vec<String>,
    /// Substrings of a user segment that make a professional market.
    pub professional_markers: Vec<String>,
}

impl Default for MarketKeywords {
    fn default() -> Self {
        Self {
            global: KeywordGroup::new("global", &["global", "world", "international"]),
            large: KeywordGroup::new("large", &["large", "huge", "massive", "big"]),
            specific: KeywordGroup::new(
                "specific",
                &["local", "niche", "specialized", "specific"],
            ),
            mass_segments: words(&["普通大众", "年轻人"]),
            professional_markers: words(&["专业人士", "business", "work"]),
        }
    }
}

/// Keyword lists of the 0–50 legacy scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyKeywords {
    pub business: Vec<String>,
    pub simple: Vec<String>,
    pub complex: Vec<String>,
    pub demand: Vec<String>,
    pub innovation: Vec<String>,
}

impl Default for LegacyKeywords {
    fn default() -> Self {
        Self {
            business: words(&[
                "monetize", "revenue", "business", "market", "sell", "profit", "startup",
            ]),
            simple: words(&["simple", "basic", "easy", "quick", "minimal"]),
            complex: words(&["ai", "ml", "blockchain", "complex", "advanced"]),
            demand: words(&[
                "need",
                "want",
                "wish",
                "looking for",
                "should exist",
                "missing",
            ]),
            innovation: words(&["new", "innovative", "unique", "novel", "different"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_lowercase() {
        let config = KeywordConfig::default();
        let all = config
            .tech
            .simple
            .iter()
            .chain(config.tech.complex.iter())
            .chain(config.users.specific.iter())
            .chain(config.competition.existing.iter());
        for keyword in all {
            assert_eq!(keyword, &keyword.to_lowercase());
        }
    }

    #[test]
    fn test_business_models_in_declared_order() {
        let config = KeywordConfig::default();
        let labels: Vec<&str> = config
            .business
            .models
            .iter()
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["subscription", "advertising", "transaction", "product", "service", "data"]
        );
    }

    #[test]
    fn test_partial_toml_override() {
        let config = KeywordConfig::from_toml_str(
            r#"
            [tech]
            simple = ["tiny"]

            [competition]
            existing = ["incumbent"]
            "#,
        )
        .unwrap();

        assert_eq!(config.tech.simple, vec!["tiny".to_string()]);
        // Unlisted fields in an overridden section keep their defaults.
        assert_eq!(config.tech.complex.len(), 10);
        assert_eq!(config.competition.open_score, 8);
        assert_eq!(config.users, UserKeywords::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = KeywordConfig::load(Path::new("/nonexistent/keywords.toml")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.toml");
        std::fs::write(&path, "[mvp]\ninnovation = [\"moonshot\"]\n").unwrap();

        let config = KeywordConfig::load(&path).unwrap();
        assert_eq!(config.mvp.innovation, vec!["moonshot".to_string()]);
        assert_eq!(config.mvp.features.len(), 7);
    }
}
