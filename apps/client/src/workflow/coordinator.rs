//! Workflow Coordinator: owns the résumé state machine and sequences the backend calls.
//!
//! Flow: select_file → upload → open_analysis → analyze → (edit) → export.
//!
//! Every trigger is a no-op while another call is in flight. A failure reverts to the
//! last-known-good state and is surfaced as a notice; there is no failed state.
//! The state lock is never held across an `.await` or while calling the presenter.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend_client::{
    AnalysisClient, ExportClient, UploadClient, ANALYSIS_FAILED, EXPORT_FAILED, UPLOAD_FAILED,
};
use crate::errors::WorkflowError;
use crate::models::{
    AnalysisResult, Document, ExportArtifact, ExportFormat, ExtractionHandoff, SelectedFile,
    TemplateStyle,
};
use crate::workflow::presenter::{Notice, NoticeKind, Presenter};
use crate::workflow::state::{AnalysisDraft, Phase, Revision, Stage, WorkflowState};
use crate::workflow::validator;

pub const NO_FILE_SELECTED: &str = "no file selected";
pub const NO_RESUME_DATA: &str = "no résumé data found";
pub const RESUME_TEXT_EMPTY: &str = "resume text is empty";
pub const NOTHING_TO_EXPORT: &str = "no resume content to export";
pub const ANALYSIS_REQUIRED: &str = "analyze the résumé before exporting";
pub const NOTHING_TO_EDIT: &str = "no improved résumé to edit";

/// Outcome of a trigger that was not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<T> {
    Done(T),
    /// Another call was in flight; nothing happened.
    Suppressed,
}

impl<T> Dispatch<T> {
    pub fn done(self) -> Option<T> {
        match self {
            Dispatch::Done(value) => Some(value),
            Dispatch::Suppressed => None,
        }
    }
}

pub struct WorkflowCoordinator {
    uploader: Arc<dyn UploadClient>,
    analyzer: Arc<dyn AnalysisClient>,
    exporter: Arc<dyn ExportClient>,
    presenter: Arc<dyn Presenter>,
    state: Mutex<WorkflowState>,
}

impl WorkflowCoordinator {
    /// Uses one backend for all three stages.
    pub fn new<B>(backend: Arc<B>, presenter: Arc<dyn Presenter>) -> Self
    where
        B: UploadClient + AnalysisClient + ExportClient + 'static,
    {
        Self {
            uploader: backend.clone(),
            analyzer: backend.clone(),
            exporter: backend,
            presenter,
            state: Mutex::new(WorkflowState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        // Transitions are single assignments, so a poisoned lock still holds a valid state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WorkflowState {
        self.lock().clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    fn fail(&self, err: WorkflowError) -> WorkflowError {
        self.presenter.notify(Notice::from(&err));
        err
    }

    fn succeed(&self, kind: NoticeKind, message: impl Into<String>) {
        self.presenter.notify(Notice::new(kind, message));
    }

    // ────────────────────────────────────────────────────────────────────────
    // Selection & upload
    // ────────────────────────────────────────────────────────────────────────

    /// Makes `file` the active document. A rejected file leaves the state untouched;
    /// an accepted one replaces whatever document was active.
    pub fn select_file(&self, file: SelectedFile) -> Result<Dispatch<()>, WorkflowError> {
        let file_name = file.name.clone();
        let accepted = {
            let mut state = self.lock();
            if state.is_busy() {
                debug!("Ignoring file selection while {}", state.phase());
                return Ok(Dispatch::Suppressed);
            }
            match validator::validate(&file) {
                Ok(()) => {
                    info!(
                        document_id = %file.document_id,
                        "Selected {} ({} bytes)",
                        file.name,
                        file.bytes.len()
                    );
                    *state = WorkflowState::FileSelected { file };
                    Ok(())
                }
                Err(err) => Err(err),
            }
        };

        match accepted {
            Ok(()) => {
                self.succeed(NoticeKind::FileSelected, "file selected");
                Ok(Dispatch::Done(()))
            }
            Err(err) => {
                warn!("Rejected {file_name}: {err}");
                Err(self.fail(err))
            }
        }
    }

    /// FileSelected → Uploading → Extracted. On failure the file stays selected.
    /// The returned handoff is what [`open_analysis`](Self::open_analysis) consumes.
    pub async fn upload(&self) -> Result<Dispatch<ExtractionHandoff>, WorkflowError> {
        let file = match self.begin_upload() {
            Ok(Some(file)) => file,
            Ok(None) => return Ok(Dispatch::Suppressed),
            Err(err) => return Err(self.fail(err)),
        };
        info!(document_id = %file.document_id, "Uploading {}", file.name);

        let result = self.uploader.upload(&file).await;
        match result {
            Ok(uploaded) => {
                let handoff = ExtractionHandoff {
                    document_id: file.document_id,
                    extracted_text: uploaded.extracted_text,
                    filename: Some(uploaded.filename).filter(|f| !f.trim().is_empty()),
                };
                info!(
                    document_id = %handoff.document_id,
                    "Extracted {} chars",
                    handoff.extracted_text.len()
                );
                *self.lock() = WorkflowState::Extracted(AnalysisDraft::from(Document::from(
                    handoff.clone(),
                )));
                self.succeed(NoticeKind::UploadSucceeded, "resume uploaded");
                Ok(Dispatch::Done(handoff))
            }
            Err(e) => {
                warn!(document_id = %file.document_id, "Upload failed: {e}");
                let message = e.user_message(UPLOAD_FAILED);
                *self.lock() = WorkflowState::FileSelected { file };
                Err(self.fail(WorkflowError::Transport {
                    stage: Stage::Upload,
                    message,
                }))
            }
        }
    }

    fn begin_upload(&self) -> Result<Option<SelectedFile>, WorkflowError> {
        let mut state = self.lock();
        if state.is_busy() {
            debug!("Ignoring upload while {}", state.phase());
            return Ok(None);
        }
        match std::mem::take(&mut *state) {
            WorkflowState::FileSelected { file } => {
                *state = WorkflowState::Uploading { file: file.clone() };
                Ok(Some(file))
            }
            other => {
                *state = other;
                Err(WorkflowError::validation(NO_FILE_SELECTED))
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Analysis stage
    // ────────────────────────────────────────────────────────────────────────

    /// Entry guard of the analysis stage. Without a handoff the workflow goes back
    /// to `Idle`. Re-opening for the document already loaded keeps its edits.
    pub fn open_analysis(
        &self,
        handoff: Option<ExtractionHandoff>,
    ) -> Result<Dispatch<()>, WorkflowError> {
        let outcome = {
            let mut state = self.lock();
            if state.is_busy() {
                debug!("Ignoring analysis entry while {}", state.phase());
                return Ok(Dispatch::Suppressed);
            }
            match handoff {
                None => {
                    *state = WorkflowState::Idle;
                    Err(WorkflowError::missing(NO_RESUME_DATA))
                }
                Some(handoff) => {
                    if state
                        .document()
                        .is_some_and(|doc| doc.id == handoff.document_id)
                    {
                        debug!(document_id = %handoff.document_id, "Analysis stage already open");
                    } else {
                        info!(document_id = %handoff.document_id, "Opening analysis stage");
                        *state =
                            WorkflowState::Extracted(AnalysisDraft::from(Document::from(handoff)));
                    }
                    Ok(())
                }
            }
        };

        match outcome {
            Ok(()) => Ok(Dispatch::Done(())),
            Err(err) => {
                warn!("Analysis stage entered without résumé data");
                Err(self.fail(err))
            }
        }
    }

    /// Sets the role the analysis is tailored to. Blank clears it.
    pub fn set_target_role(&self, role: Option<&str>) -> Result<Dispatch<()>, WorkflowError> {
        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        self.edit_draft(|draft| draft.target_role = role)
    }

    /// Replaces the working copy of the résumé text that analysis will send.
    pub fn set_resume_text(&self, text: impl Into<String>) -> Result<Dispatch<()>, WorkflowError> {
        let text = text.into();
        self.edit_draft(|draft| draft.resume_text = text)
    }

    fn edit_draft(
        &self,
        edit: impl FnOnce(&mut AnalysisDraft),
    ) -> Result<Dispatch<()>, WorkflowError> {
        let outcome = {
            let mut state = self.lock();
            if state.busy().analyzing {
                return Ok(Dispatch::Suppressed);
            }
            match state.editable_draft() {
                Some(draft) => {
                    edit(draft);
                    Ok(())
                }
                None => Err(WorkflowError::missing(NO_RESUME_DATA)),
            }
        };
        outcome
            .map(Dispatch::Done)
            .map_err(|err| self.fail(err))
    }

    /// Extracted/Analyzed → Analyzing → Analyzed.
    ///
    /// Success replaces the previous analysis and re-seeds the edit buffer, discarding
    /// manual edits. Failure restores the state the call started from.
    pub async fn analyze(&self) -> Result<Dispatch<AnalysisResult>, WorkflowError> {
        let (draft, prior) = match self.begin_analysis() {
            Ok(Some(inputs)) => inputs,
            Ok(None) => return Ok(Dispatch::Suppressed),
            Err(err) => return Err(self.fail(err)),
        };
        let document_id = draft.document.id;
        info!(
            %document_id,
            target_role = draft.target_role.as_deref().unwrap_or("-"),
            "Analyzing {} chars",
            draft.resume_text.len()
        );

        let result = self
            .analyzer
            .analyze(&draft.resume_text, draft.target_role.as_deref())
            .await;
        match result {
            Ok(analysis) => {
                info!(
                    %document_id,
                    "Analysis complete: {} missing sections, {} weak areas",
                    analysis.missing_sections.len(),
                    analysis.weak_areas.len()
                );
                *self.lock() = WorkflowState::Analyzed {
                    draft,
                    revision: Revision::seed(analysis.clone()),
                };
                self.succeed(NoticeKind::AnalysisSucceeded, "analysis complete");
                Ok(Dispatch::Done(analysis))
            }
            Err(e) => {
                warn!(%document_id, "Analysis failed: {e}");
                let message = e.user_message(ANALYSIS_FAILED);
                *self.lock() = settle(draft, prior);
                Err(self.fail(WorkflowError::Transport {
                    stage: Stage::Analysis,
                    message,
                }))
            }
        }
    }

    fn begin_analysis(&self) -> Result<Option<(AnalysisDraft, Option<Revision>)>, WorkflowError> {
        let mut state = self.lock();
        if state.is_busy() {
            debug!("Ignoring analysis while {}", state.phase());
            return Ok(None);
        }
        let (draft, prior) = match std::mem::take(&mut *state) {
            WorkflowState::Extracted(draft) => (draft, None),
            WorkflowState::Analyzed { draft, revision } => (draft, Some(revision)),
            other => {
                *state = other;
                return Err(WorkflowError::missing(NO_RESUME_DATA));
            }
        };
        if draft.resume_text.trim().is_empty() {
            *state = settle(draft, prior);
            return Err(WorkflowError::validation(RESUME_TEXT_EMPTY));
        }
        *state = WorkflowState::Analyzing {
            draft: draft.clone(),
            prior: prior.clone(),
        };
        Ok(Some((draft, prior)))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Editing & export
    // ────────────────────────────────────────────────────────────────────────

    /// Replaces the edit buffer. Purely local, no call is made.
    pub fn edit_resume(&self, text: impl Into<String>) -> Result<Dispatch<()>, WorkflowError> {
        let outcome = {
            let mut state = self.lock();
            if state.busy().analyzing {
                return Ok(Dispatch::Suppressed);
            }
            match state.editable_revision() {
                Some(revision) => {
                    revision.edited_resume = text.into();
                    Ok(())
                }
                None => Err(WorkflowError::missing(NOTHING_TO_EDIT)),
            }
        };
        outcome
            .map(Dispatch::Done)
            .map_err(|err| self.fail(err))
    }

    /// Analyzed → Exporting → Analyzed, on success and on failure alike.
    /// The artifact is handed to the presenter before the stage is released.
    pub async fn export(
        &self,
        template_style: TemplateStyle,
        format: ExportFormat,
    ) -> Result<Dispatch<ExportArtifact>, WorkflowError> {
        let (document_id, text) = match self.begin_export() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(Dispatch::Suppressed),
            Err(err) => return Err(self.fail(err)),
        };
        info!(
            %document_id,
            %template_style,
            %format,
            "Exporting {} chars",
            text.len()
        );

        let outcome = match self.exporter.export(&text, template_style, format).await {
            Ok(artifact) => {
                let delivered = self.presenter.deliver(&artifact).await;
                match delivered {
                    Ok(()) => Ok(artifact),
                    Err(e) => {
                        warn!(%document_id, "Could not deliver {}: {e:#}", artifact.filename);
                        Err(EXPORT_FAILED.to_string())
                    }
                }
            }
            Err(e) => {
                warn!(%document_id, "Export failed: {e}");
                Err(e.user_message(EXPORT_FAILED))
            }
        };
        self.finish_export();

        match outcome {
            Ok(artifact) => {
                info!(%document_id, "Exported {}", artifact.filename);
                self.succeed(
                    NoticeKind::ExportSucceeded,
                    format!("resume exported as {}", format.extension().to_uppercase()),
                );
                Ok(Dispatch::Done(artifact))
            }
            Err(message) => Err(self.fail(WorkflowError::Transport {
                stage: Stage::Export,
                message,
            })),
        }
    }

    fn begin_export(&self) -> Result<Option<(Uuid, String)>, WorkflowError> {
        let mut state = self.lock();
        if state.is_busy() {
            debug!("Ignoring export while {}", state.phase());
            return Ok(None);
        }
        match std::mem::take(&mut *state) {
            WorkflowState::Analyzed { draft, revision } => {
                if revision.edited_resume.trim().is_empty() {
                    *state = WorkflowState::Analyzed { draft, revision };
                    return Err(WorkflowError::validation(NOTHING_TO_EXPORT));
                }
                let snapshot = (draft.document.id, revision.edited_resume.clone());
                *state = WorkflowState::Exporting { draft, revision };
                Ok(Some(snapshot))
            }
            other => {
                *state = other;
                Err(WorkflowError::missing(ANALYSIS_REQUIRED))
            }
        }
    }

    fn finish_export(&self) {
        let mut state = self.lock();
        *state = match std::mem::take(&mut *state) {
            WorkflowState::Exporting { draft, revision } => {
                WorkflowState::Analyzed { draft, revision }
            }
            other => other,
        };
    }

    /// Back to the start ("back to upload"). Ignored while a call is in flight.
    pub fn reset(&self) -> Dispatch<()> {
        let mut state = self.lock();
        if state.is_busy() {
            return Dispatch::Suppressed;
        }
        info!("Workflow reset from {}", state.phase());
        *state = WorkflowState::Idle;
        Dispatch::Done(())
    }
}

/// The resting state for a draft: `Analyzed` if it has a revision, `Extracted` otherwise.
fn settle(draft: AnalysisDraft, revision: Option<Revision>) -> WorkflowState {
    match revision {
        Some(revision) => WorkflowState::Analyzed { draft, revision },
        None => WorkflowState::Extracted(draft),
    }
}
