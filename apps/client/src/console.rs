//! Terminal presentation: prints notices and saves exported résumés to a directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::models::{AnalysisResult, ExportArtifact};
use crate::workflow::{Notice, Presenter};

pub struct ConsolePresenter {
    output_dir: PathBuf,
    /// Keeps stdout free for machine-readable output.
    stderr_only: bool,
}

impl ConsolePresenter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            stderr_only: false,
        }
    }

    pub fn notices_on_stderr(mut self, stderr_only: bool) -> Self {
        self.stderr_only = stderr_only;
        self
    }
}

#[async_trait]
impl Presenter for ConsolePresenter {
    fn notify(&self, notice: Notice) {
        let mark = if notice.is_error() { '✗' } else { '✓' };
        if notice.is_error() || self.stderr_only {
            eprintln!("{mark} {}", notice.message);
        } else {
            println!("{mark} {}", notice.message);
        }
    }

    async fn deliver(&self, artifact: &ExportArtifact) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Saved {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(())
    }
}

/// Plain-text rendering of an analysis, one block per category.
pub fn render_analysis(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    render_list(
        &mut out,
        "Missing sections",
        &analysis.missing_sections,
        "All sections present!",
    );
    render_list(
        &mut out,
        "Weak areas",
        &analysis.weak_areas,
        "No weak areas detected!",
    );
    render_list(
        &mut out,
        "Suggestions",
        &analysis.improvement_suggestions,
        "Resume looks great!",
    );
    out.push_str("\nImproved resume\n");
    out.push_str(&analysis.improved_resume);
    out.push('\n');
    out
}

fn render_list(out: &mut String, title: &str, items: &[String], when_empty: &str) {
    out.push_str(title);
    out.push('\n');
    if items.is_empty() {
        out.push_str("  ");
        out.push_str(when_empty);
        out.push('\n');
    }
    for item in items {
        out.push_str("  - ");
        out.push_str(item);
        out.push('\n');
    }
}
