//! Workflow state: one tagged enum, each variant carrying only the data valid in it.
//!
//! Idle → FileSelected → Uploading → Extracted → Analyzing → Analyzed ⇄ Exporting

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{AnalysisResult, Document, SelectedFile};

/// A stage that issues a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Upload,
    Analysis,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Upload => "upload",
            Stage::Analysis => "analysis",
            Stage::Export => "export",
        })
    }
}

/// Inputs of the analysis stage: the extracted document plus the user's
/// working copy of its text and the optional target role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisDraft {
    pub document: Document,
    pub resume_text: String,
    pub target_role: Option<String>,
}

impl From<Document> for AnalysisDraft {
    fn from(document: Document) -> Self {
        Self {
            resume_text: document.extracted_text.clone(),
            document,
            target_role: None,
        }
    }
}

/// One analysis result and the edit buffer seeded from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub analysis: AnalysisResult,
    pub edited_resume: String,
}

impl Revision {
    /// The edit buffer starts as an exact copy of the improved résumé.
    pub fn seed(analysis: AnalysisResult) -> Self {
        Self {
            edited_resume: analysis.improved_resume.clone(),
            analysis,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    FileSelected {
        file: SelectedFile,
    },
    Uploading {
        file: SelectedFile,
    },
    Extracted(AnalysisDraft),
    Analyzing {
        draft: AnalysisDraft,
        /// Restored if a re-analysis fails.
        prior: Option<Revision>,
    },
    Analyzed {
        draft: AnalysisDraft,
        revision: Revision,
    },
    Exporting {
        draft: AnalysisDraft,
        revision: Revision,
    },
}

/// Variant name of a [`WorkflowState`], for display and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    FileSelected,
    Uploading,
    Extracted,
    Analyzing,
    Analyzed,
    Exporting,
}

/// Per-stage busy flags. At most one is ever set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BusyFlags {
    pub uploading: bool,
    pub analyzing: bool,
    pub exporting: bool,
}

impl BusyFlags {
    pub fn any(&self) -> bool {
        self.uploading || self.analyzing || self.exporting
    }
}

impl WorkflowState {
    pub fn phase(&self) -> Phase {
        match self {
            WorkflowState::Idle => Phase::Idle,
            WorkflowState::FileSelected { .. } => Phase::FileSelected,
            WorkflowState::Uploading { .. } => Phase::Uploading,
            WorkflowState::Extracted(_) => Phase::Extracted,
            WorkflowState::Analyzing { .. } => Phase::Analyzing,
            WorkflowState::Analyzed { .. } => Phase::Analyzed,
            WorkflowState::Exporting { .. } => Phase::Exporting,
        }
    }

    pub fn busy(&self) -> BusyFlags {
        BusyFlags {
            uploading: matches!(self, WorkflowState::Uploading { .. }),
            analyzing: matches!(self, WorkflowState::Analyzing { .. }),
            exporting: matches!(self, WorkflowState::Exporting { .. }),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy().any()
    }

    /// The file picked but not yet extracted.
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            WorkflowState::FileSelected { file } | WorkflowState::Uploading { file } => Some(file),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&AnalysisDraft> {
        match self {
            WorkflowState::Extracted(draft)
            | WorkflowState::Analyzing { draft, .. }
            | WorkflowState::Analyzed { draft, .. }
            | WorkflowState::Exporting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.draft().map(|d| &d.document)
    }

    pub fn revision(&self) -> Option<&Revision> {
        match self {
            WorkflowState::Analyzed { revision, .. } | WorkflowState::Exporting { revision, .. } => {
                Some(revision)
            }
            _ => None,
        }
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.revision().map(|r| &r.analysis)
    }

    pub fn edited_resume(&self) -> Option<&str> {
        self.revision().map(|r| r.edited_resume.as_str())
    }

    /// Draft that may be edited right now. Not available while it is being analyzed.
    pub(crate) fn editable_draft(&mut self) -> Option<&mut AnalysisDraft> {
        match self {
            WorkflowState::Extracted(draft)
            | WorkflowState::Analyzed { draft, .. }
            | WorkflowState::Exporting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub(crate) fn editable_revision(&mut self) -> Option<&mut Revision> {
        match self {
            WorkflowState::Analyzed { revision, .. } | WorkflowState::Exporting { revision, .. } => {
                Some(revision)
            }
            _ => None,
        }
    }

    pub fn summary(&self) -> StateSummary<'_> {
        let (document_id, filename) = match (self.selected_file(), self.document()) {
            (Some(file), _) => (Some(file.document_id), Some(file.name.as_str())),
            (None, Some(doc)) => (Some(doc.id), doc.filename.as_deref()),
            (None, None) => (None, None),
        };
        StateSummary {
            phase: self.phase(),
            busy: self.busy(),
            document_id,
            filename,
            target_role: self.draft().and_then(|d| d.target_role.as_deref()),
            analysis: self.analysis(),
            edited_resume: self.edited_resume(),
        }
    }
}

/// Machine-readable view of a [`WorkflowState`], printed by `--json`.
#[derive(Debug, Serialize)]
pub struct StateSummary<'a> {
    pub phase: Phase,
    pub busy: BusyFlags,
    pub document_id: Option<Uuid>,
    pub filename: Option<&'a str>,
    pub target_role: Option<&'a str>,
    pub analysis: Option<&'a AnalysisResult>,
    pub edited_resume: Option<&'a str>,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::FileSelected => "file selected",
            Phase::Uploading => "uploading",
            Phase::Extracted => "extracted",
            Phase::Analyzing => "analyzing",
            Phase::Analyzed => "analyzed",
            Phase::Exporting => "exporting",
        };
        f.write_str(name)
    }
}
