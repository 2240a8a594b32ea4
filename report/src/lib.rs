//! Rendering of ranked analyses into Markdown, HTML and JSON files.

pub mod html;
pub mod markdown;
pub mod translate;
pub mod view;
pub mod writer;

pub use html::{render_html, render_index};
pub use markdown::{render_legacy_markdown, render_markdown};
pub use translate::Translator;
pub use view::{legacy_entries, legacy_scores, pair_legacy_scores, LegacyEntry};
pub use writer::{read_json, write_json, ReportFiles, ReportWriter};
