//! Scoring through an external chat-completion model.

pub mod pacing;
pub mod prompt;
pub mod provider;
pub mod scorer;

pub use pacing::RequestPacer;
pub use prompt::{build_prompt, parse_verdict, ModelScores, ModelVerdict, SYSTEM_PROMPT};
pub use provider::{LlmProvider, OpenAiCompatibleProvider};
pub use scorer::ExternalModelScorer;
