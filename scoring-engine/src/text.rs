use ideascout_core::RawPost;

/// Lower-cased text that every analyzer matches keywords against.
///
/// Matching is plain substring containment: case-insensitive, but with no
/// tokenization or stemming, so "organize" does not match "organizing" and
/// "ai" matches inside "maintain".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn from_post(post: &RawPost) -> Self {
        Self::new(&format!("{} {}", post.title, post.snippet))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty keyword never matches.
    pub fn contains(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }
        if keyword.chars().any(char::is_uppercase) {
            self.0.contains(&keyword.to_lowercase())
        } else {
            self.0.contains(keyword)
        }
    }

    pub fn contains_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.contains(k))
    }

    pub fn count_matches(&self, keywords: &[String]) -> usize {
        keywords.iter().filter(|k| self.contains(k)).count()
    }

    pub fn matching<'a>(&'a self, keywords: &'a [String]) -> impl Iterator<Item = &'a String> + 'a {
        keywords.iter().filter(move |k| self.contains(k))
    }
}
