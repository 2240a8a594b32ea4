//! Phrase dictionary for rendering English titles and snippets in Chinese.

use ideascout_core::AnalyzedPost;
use regex::{Regex, RegexBuilder};
use tracing::debug;

const DICTIONARY: &[(&str, &str)] = &[
    ("App idea", "应用创意"),
    ("Capture random ideas quickly", "快速捕捉随机想法"),
    ("Software/App-Idea", "软件/应用创意"),
    ("Useful app ideas", "有用的应用创意"),
    ("Golden App Ideas", "黄金应用创意"),
    ("ADHD app", "注意力管理应用"),
    ("brain dump", "思维倾倒"),
    ("organize them", "整理它们"),
    ("When I have a random thought", "当我有一个随机想法时"),
    ("note down", "记下来"),
    ("current approach", "当前方法"),
    ("would probably be", "可能是"),
    ("but we both have no idea of coding", "但我们都不懂编程"),
    ("Do you have tips on how to start", "你有关于如何开始的建议吗"),
    ("with such an idea", "这样的想法"),
    ("Those who make side money", "那些通过副业赚钱的人"),
    ("with their own mobile apps", "用他们自己的移动应用"),
    ("what are your best tips", "你最好的建议是什么"),
    ("to come up with a great app idea", "想出一个好的应用创意"),
    ("I have a million dollar app idea here", "我这里有一个百万美元的应用创意"),
    ("clearly validated", "明确验证过"),
    ("huge spike in downloads", "下载量大幅增长"),
    ("engagement but", "参与度但是"),
    ("lets you brain dump all your thoughts", "让你倾倒所有想法"),
    ("to automatically organize them", "自动整理它们"),
    ("Hi everyone", "大家好"),
    ("I had this thought", "我有这个想法"),
];

/// Case-insensitive phrase replacement. Longer phrases are applied first so
/// that a phrase is never split by one of its own substrings.
#[derive(Debug, Clone)]
pub struct Translator {
    rules: Vec<(Regex, String)>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DICTIONARY.iter().copied())
    }
}

impl Translator {
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut pairs: Vec<(&str, &str)> = pairs
            .into_iter()
            .filter(|(phrase, _)| !phrase.trim().is_empty())
            .collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let rules = pairs
            .into_iter()
            .filter_map(|(phrase, replacement)| {
                RegexBuilder::new(&regex::escape(phrase))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, replacement.to_string()))
            })
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn translate(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (pattern, replacement) in &self.rules {
            if pattern.is_match(&out) {
                out = pattern
                    .replace_all(&out, regex::NoExpand(replacement))
                    .into_owned();
            }
        }
        out
    }

    /// Translates titles and snippets in place. Scores are left untouched.
    pub fn translate_posts(&self, posts: &mut [AnalyzedPost]) {
        for item in posts.iter_mut() {
            item.post.title = self.translate(&item.post.title);
            item.post.snippet = self.translate(&item.post.snippet);
        }
        debug!("Translated {} posts with {} phrases", posts.len(), self.len());
    }
}
