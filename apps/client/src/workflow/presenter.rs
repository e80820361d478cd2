//! The seam between the coordinator and whatever renders it.
//! The coordinator emits notices and hands over export artifacts; it never draws anything.

use async_trait::async_trait;

use crate::errors::WorkflowError;
use crate::models::ExportArtifact;
use crate::workflow::state::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    FileSelected,
    UploadSucceeded,
    AnalysisSucceeded,
    ExportSucceeded,
    ValidationError,
    UploadError,
    AnalysisError,
    ExportError,
    MissingData,
}

/// A short, non-fatal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            NoticeKind::ValidationError
                | NoticeKind::UploadError
                | NoticeKind::AnalysisError
                | NoticeKind::ExportError
                | NoticeKind::MissingData
        )
    }
}

impl From<&WorkflowError> for Notice {
    fn from(err: &WorkflowError) -> Self {
        let kind = match err {
            WorkflowError::Validation(_) => NoticeKind::ValidationError,
            WorkflowError::MissingPrecondition(_) => NoticeKind::MissingData,
            WorkflowError::Transport { stage, .. } => match stage {
                Stage::Upload => NoticeKind::UploadError,
                Stage::Analysis => NoticeKind::AnalysisError,
                Stage::Export => NoticeKind::ExportError,
            },
        };
        Notice::new(kind, err.to_string())
    }
}

/// Implemented by the presentation layer.
///
/// Called without any coordinator lock held, so implementations may read
/// the coordinator back.
#[async_trait]
pub trait Presenter: Send + Sync {
    fn notify(&self, notice: Notice);

    /// Saves an exported résumé for the user (e.g. writes it to disk).
    async fn deliver(&self, artifact: &ExportArtifact) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_route_by_stage() {
        let err = WorkflowError::Transport {
            stage: Stage::Upload,
            message: "Could not read file".to_string(),
        };
        let notice = Notice::from(&err);
        assert_eq!(notice.kind, NoticeKind::UploadError);
        assert_eq!(notice.message, "Could not read file");
        assert!(notice.is_error());
    }

    #[test]
    fn test_missing_precondition_is_missing_data() {
        let notice = Notice::from(&WorkflowError::missing("no résumé data found"));
        assert_eq!(notice.kind, NoticeKind::MissingData);
    }

    #[test]
    fn test_success_notices_are_not_errors() {
        assert!(!Notice::new(NoticeKind::ExportSucceeded, "resume exported as PDF").is_error());
    }
}
