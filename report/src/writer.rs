use crate::html::{render_html, render_index};
use crate::markdown::{render_legacy_markdown, render_markdown};
use crate::translate::Translator;
use crate::view::{legacy_scores, pair_legacy_scores};
use chrono::NaiveDate;
use ideascout_core::{AnalyzedPost, CoreError, ReportConfig, ReportError};
use scoring_engine::{rank, HeuristicScorer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths of everything one `ReportWriter::write` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub markdown: PathBuf,
    pub html: PathBuf,
    pub index: PathBuf,
    pub json: PathBuf,
}

/// Writes the dated report set into one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    top_n: usize,
    translator: Option<Translator>,
    legacy: Option<HeuristicScorer>,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            top_n: ReportConfig::default().top_n,
            translator: None,
            legacy: None,
        }
    }

    /// Directory, top-N and translation from config. Legacy mode needs a
    /// scorer and is set separately with [`ReportWriter::with_legacy_scale`].
    pub fn from_config(config: &ReportConfig) -> Self {
        let writer = Self::new(&config.output_dir).with_top_n(config.top_n);
        if config.translate {
            writer.with_translator(Translator::default())
        } else {
            writer
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Renders the Markdown report on the 0–50 scale computed by `scorer`.
    pub fn with_legacy_scale(mut self, scorer: HeuristicScorer) -> Self {
        self.legacy = Some(scorer);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write(&self, posts: &[AnalyzedPost], date: NaiveDate) -> Result<ReportFiles, CoreError> {
        if posts.is_empty() {
            return Err(ReportError::EmptyInput {
                reason: "no analyzed posts".to_string(),
            }
            .into());
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| ReportError::OutputDirUnavailable {
            path: format!("{} ({})", self.output_dir.display(), e),
        })?;

        let mut ranked = posts.to_vec();
        rank(&mut ranked);

        let files = ReportFiles {
            markdown: self.output_dir.join(format!("report-{}.md", date)),
            html: self.output_dir.join(format!("ideas-{}.html", date)),
            index: self.output_dir.join("index.html"),
            json: self.output_dir.join(format!("analyzed-{}.json", date)),
        };

        write_json(&files.json, &ranked)?;

        // Legacy scores read the original text; translation is display only.
        let legacy = self.legacy.as_ref().map(|scorer| legacy_scores(&ranked, scorer));

        if let Some(translator) = &self.translator {
            translator.translate_posts(&mut ranked);
        }

        let markdown = match legacy {
            Some(scores) => render_legacy_markdown(&pair_legacy_scores(&ranked, scores), date, self.top_n),
            None => render_markdown(&ranked, date, self.top_n),
        };
        write_text(&files.markdown, &markdown)?;
        write_text(&files.html, &render_html(&ranked, date, self.top_n))?;

        let page = format!("ideas-{}.html", date);
        write_text(&files.index, &render_index(date, ranked.len(), &page))?;

        info!(
            "Wrote report for {} posts to {}",
            ranked.len(),
            self.output_dir.display()
        );
        Ok(files)
    }
}

fn write_text(path: &Path, contents: &str) -> Result<(), CoreError> {
    fs::write(path, contents).map_err(|e| {
        ReportError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Pretty-printed JSON, creating parent directories as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReportError::OutputDirUnavailable {
            path: format!("{} ({})", parent.display(), e),
        })?;
    }
    let json = serde_json::to_string_pretty(value)?;
    write_text(path, &json)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
