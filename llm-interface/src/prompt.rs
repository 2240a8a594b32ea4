//! Prompt construction and parsing of the model's JSON verdict.

use ideascout_core::{CoreError, LlmError, RawPost, SubScores};
use serde::Deserialize;

pub const SYSTEM_PROMPT: &str = "你是一名资深的产品经理和创业顾问，只用 JSON 回答。";

/// User prompt for one post. Asks for seven 0–10 scores and a short
/// qualitative write-up.
pub fn build_prompt(post: &RawPost) -> String {
    let snippet = if post.snippet.trim().is_empty() {
        "无详细描述"
    } else {
        post.snippet.as_str()
    };

    format!(
        r#"分析以下 Reddit 创意/需求，评估其作为网站产品的可行性：

标题: {title}
描述: {snippet}
来源: r/{subreddit}
热度: {score} 分，{comments} 评论

请从以下维度分析并打分（0-10分）：

1. **商业价值** (0-10): 市场需求、变现潜力
2. **技术难度** (0-10): 实现复杂度（分数越低越容易）
3. **市场竞争** (0-10): 竞争激烈程度（分数越低竞争越小）
4. **创新性** (0-10): 创意独特性
5. **用户需求** (0-10): 真实用户痛点
6. **盈利能力** (0-10): 付费意愿与收入规模
7. **市场规模** (0-10): 潜在用户群体大小

请以 JSON 格式返回：
{{
  "scores": {{
    "business_value": 数字,
    "technical_difficulty": 数字,
    "market_competition": 数字,
    "innovation": 数字,
    "user_demand": 数字,
    "profitability": 数字,
    "market_size": 数字
  }},
  "product_concept": "产品概念(一句话)",
  "key_features": ["核心功能1", "核心功能2", "核心功能3"],
  "target_users": ["目标用户群"],
  "monetization": ["变现方式建议"],
  "risks": ["风险1", "风险2"],
  "summary": "简短分析总结(50字内)"
}}

只返回 JSON，不要其他内容。"#,
        title = post.title,
        snippet = snippet,
        subreddit = post.subreddit,
        score = post.score,
        comments = post.num_comments,
    )
}

/// Scores as the model reports them. Difficulty and competition are
/// "lower is easier / less crowded".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelScores {
    pub user_demand: Option<f64>,
    pub business_value: Option<f64>,
    pub technical_difficulty: Option<f64>,
    pub innovation: Option<f64>,
    pub market_competition: Option<f64>,
    pub profitability: Option<f64>,
    pub market_size: Option<f64>,
}

impl ModelScores {
    /// Converts to the heuristic orientation: difficulty and competition are
    /// inverted so that higher means simpler and more open.
    pub fn to_sub_scores(&self) -> SubScores {
        SubScores {
            user_demand: to_score(self.user_demand),
            business_value: to_score(self.business_value),
            technical_difficulty: to_score(self.technical_difficulty).map(|v| 10 - v),
            innovation: to_score(self.innovation),
            market_competition: to_score(self.market_competition).map(|v| 10 - v),
            profitability: to_score(self.profitability),
            market_size: to_score(self.market_size),
        }
    }
}

fn to_score(value: Option<f64>) -> Option<i32> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, 10.0) as i32)
}

/// Models answer either `"x"` or `["x", "y"]` for list-like fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<OneOrMany>::deserialize(deserializer)?;
    let list = match value {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(list)) => list,
    };
    Ok(list
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModelVerdict {
    pub scores: ModelScores,
    pub product_concept: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub key_features: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub target_users: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub monetization: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub risks: Vec<String>,
    pub summary: Option<String>,
}

/// Parses a completion into a verdict. Markdown code fences and any prose
/// around the outermost JSON object are ignored.
pub fn parse_verdict(raw: &str, provider: &str) -> Result<ModelVerdict, CoreError> {
    let invalid = |details: String| {
        CoreError::Llm(LlmError::InvalidResponseFormat {
            provider: provider.to_string(),
            details,
        })
    };

    let start = raw.find('{');
    let end = raw.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => return Err(invalid("no JSON object in completion".to_string())),
    };

    serde_json::from_str(json).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_post_and_all_scores() {
        let mut post = RawPost::new("Chore app", "");
        post.subreddit = "AppIdeas".to_string();
        post.score = 12;
        let prompt = build_prompt(&post);
        assert!(prompt.contains("标题: Chore app"));
        assert!(prompt.contains("描述: 无详细描述"));
        assert!(prompt.contains("来源: r/AppIdeas"));
        for key in [
            "business_value",
            "technical_difficulty",
            "market_competition",
            "innovation",
            "user_demand",
            "profitability",
            "market_size",
        ] {
            assert!(prompt.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn test_parse_fenced_verdict() {
        let raw = "```json\n{\"scores\": {\"user_demand\": 8}, \"target_users\": \"学生\"}\n```";
        let verdict = parse_verdict(raw, "test").unwrap();
        assert_eq!(verdict.scores.user_demand, Some(8.0));
        assert_eq!(verdict.target_users, vec!["学生"]);
        assert!(verdict.risks.is_empty());
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_verdict("I cannot help with that.", "test").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Llm(LlmError::InvalidResponseFormat { .. })
        ));
    }

    #[test]
    fn test_inversion_and_rounding() {
        let scores = ModelScores {
            user_demand: Some(7.6),
            business_value: Some(12.0),
            technical_difficulty: Some(2.0),
            innovation: Some(-1.0),
            market_competition: Some(9.0),
            profitability: None,
            market_size: Some(f64::NAN),
        };
        let sub = scores.to_sub_scores();
        assert_eq!(sub.user_demand, Some(8));
        assert_eq!(sub.business_value, Some(10));
        assert_eq!(sub.technical_difficulty, Some(8));
        assert_eq!(sub.innovation, Some(0));
        assert_eq!(sub.market_competition, Some(1));
        assert_eq!(sub.profitability, None);
        assert_eq!(sub.market_size, None);
    }
}
