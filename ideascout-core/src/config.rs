//! Application configuration loaded from TOML with environment overrides.

use crate::error::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const SERPER_API_KEY_ENV: &str = "SERPER_API_KEY";
pub const LLM_API_KEY_ENV: &str = "LLM_API_KEY";
pub const LLM_BASE_URL_ENV: &str = "LLM_BASE_URL";
pub const LLM_MODEL_ENV: &str = "LLM_MODEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Reddit,
    Serper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorerKind {
    Heuristic,
    ExternalModel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub collector: CollectorConfig,
    pub scoring: ScoringConfig,
    pub llm: LlmConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub source: SourceKind,
    pub subreddits: Vec<String>,
    pub queries: Vec<String>,
    pub target_count: usize,
    /// Pause between two sources, in milliseconds.
    pub request_delay_ms: u64,
    pub user_agent: String,
    pub reddit_base_url: String,
    pub serper_base_url: String,
    pub serper_api_key: Option<String>,
    pub results_per_query: u32,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Reddit,
            subreddits: [
                "SomebodyMakeThis",
                "AppIdeas",
                "Entrepreneur",
                "startups",
                "SideProject",
                "indiehackers",
                "ProductManagement",
                "webdev",
                "technology",
                "Futurology",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            queries: [
                r#"site:reddit.com/r/SomebodyMakeThis "app idea""#,
                "site:reddit.com/r/AppIdeas",
                r#"site:reddit.com/r/Entrepreneur "startup idea""#,
                r#"site:reddit.com/r/SideProject "looking for""#,
                r#"site:reddit.com "need an app for""#,
                r#"site:reddit.com "someone should make""#,
                r#"site:reddit.com "wish there was an app""#,
                r#"site:reddit.com/r/indiehackers "project idea""#,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            target_count: 20,
            request_delay_ms: 1000,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            reddit_base_url: "https://old.reddit.com".to_string(),
            serper_base_url: "https://google.serper.dev".to_string(),
            serper_api_key: None,
            results_per_query: 10,
        }
    }
}

/// Weights of the seven composite terms. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub user_demand: f64,
    pub business_value: f64,
    pub technical_difficulty: f64,
    pub innovation: f64,
    pub market_competition: f64,
    pub profitability: f64,
    pub market_size: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            user_demand: 0.20,
            business_value: 0.20,
            technical_difficulty: 0.15,
            innovation: 0.15,
            market_competition: 0.10,
            profitability: 0.10,
            market_size: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.user_demand
            + self.business_value
            + self.technical_difficulty
            + self.innovation
            + self.market_competition
            + self.profitability
            + self.market_size
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub scorer: ScorerKind,
    pub weights: ScoreWeights,
    /// Optional TOML file replacing the built-in keyword tables.
    pub keywords_file: Option<PathBuf>,
    /// Posts scored in flight at once.
    pub concurrency: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Heuristic,
            weights: ScoreWeights::default(),
            keywords_file: None,
            concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Minimum gap between two model requests. Zero disables pacing.
    pub request_interval_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 60,
            request_interval_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub top_n: usize,
    pub translate: bool,
    pub legacy_scale: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            top_n: 5,
            translate: false,
            legacy_scale: false,
        }
    }
}

impl AppConfig {
    /// Reads a TOML file, applies environment overrides and validates.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&raw)?;
        info!("Loaded configuration from {}", path.display());
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for runs without a config file.
    pub fn from_env() -> Result<Self, CoreError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(SERPER_API_KEY_ENV).filter(|v| !v.is_empty()) {
            debug!("Using {} from environment", SERPER_API_KEY_ENV);
            self.collector.serper_api_key = Some(key);
        }
        if let Some(key) = lookup(LLM_API_KEY_ENV).filter(|v| !v.is_empty()) {
            debug!("Using {} from environment", LLM_API_KEY_ENV);
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup(LLM_BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup(LLM_MODEL_ENV).filter(|v| !v.is_empty()) {
            self.llm.model = model;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collector.target_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collector.target_count".to_string(),
                value: "0".to_string(),
            });
        }
        if self.scoring.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.concurrency".to_string(),
                value: "0".to_string(),
            });
        }

        let sum = self.scoring.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("scoring weights must sum to 1.0, got {:.3}", sum),
            });
        }

        match self.collector.source {
            SourceKind::Reddit if self.collector.subreddits.is_empty() => {
                return Err(ConfigError::MissingField {
                    field: "collector.subreddits".to_string(),
                });
            }
            SourceKind::Serper if self.collector.queries.is_empty() => {
                return Err(ConfigError::MissingField {
                    field: "collector.queries".to_string(),
                });
            }
            _ => {}
        }

        Ok(())
    }

    /// Serper key, required only when the Serper source is used.
    pub fn serper_api_key(&self) -> Result<&str, ConfigError> {
        self.collector
            .serper_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvironmentVariable {
                var_name: SERPER_API_KEY_ENV.to_string(),
            })
    }

    /// LLM key, required only when the external-model scorer is used.
    pub fn llm_api_key(&self) -> Result<&str, ConfigError> {
        self.llm
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvironmentVariable {
                var_name: LLM_API_KEY_ENV.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.collector.subreddits.len(), 10);
        assert_eq!(config.collector.queries.len(), 8);
        assert_eq!(config.scoring.scorer, ScorerKind::Heuristic);
    }

    #[test]
    fn test_example_config_parses() {
        let config =
            AppConfig::from_toml_str(include_str!("../../ideascout.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.collector.subreddits.len(), 3);
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.llm.request_interval_ms, 2000);
    }

    #[test]
    fn test_llm_request_interval_can_be_disabled() {
        let config = AppConfig::from_toml_str("[llm]\nrequest_interval_ms = 0").unwrap();
        assert_eq!(config.llm.request_interval_ms, 0);
        assert_eq!(config.llm.timeout_secs, 60);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoreWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [collector]
            source = "serper"
            target_count = 5

            [scoring]
            scorer = "external-model"
            "#,
        )
        .unwrap();

        assert_eq!(config.collector.source, SourceKind::Serper);
        assert_eq!(config.collector.target_count, 5);
        assert_eq!(config.collector.queries.len(), 8);
        assert_eq!(config.scoring.scorer, ScorerKind::ExternalModel);
        assert_eq!(config.report.top_n, 5);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let config = AppConfig::from_toml_str(
            r#"
            [scoring.weights]
            user_demand = 0.9
            "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_zero_target_count_rejected() {
        let mut config = AppConfig::default();
        config.collector.target_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (SERPER_API_KEY_ENV, "serper-key"),
            (LLM_API_KEY_ENV, "llm-key"),
            (LLM_MODEL_ENV, "qwen3-max"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.serper_api_key().unwrap(), "serper-key");
        assert_eq!(config.llm_api_key().unwrap(), "llm-key");
        assert_eq!(config.llm.model, "qwen3-max");
        assert_eq!(config.llm.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_missing_keys_reported() {
        let config = AppConfig::default();
        assert!(matches!(
            config.serper_api_key(),
            Err(ConfigError::MissingEnvironmentVariable { .. })
        ));
        assert!(config.llm_api_key().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ntop_n = 3\nlegacy_scale = true").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.report.top_n, 3);
        assert!(config.report.legacy_scale);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/ideascout.toml")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
