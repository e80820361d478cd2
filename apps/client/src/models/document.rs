use std::path::Path;

use bytes::Bytes;
use uuid::Uuid;

/// A file picked by the user, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Correlates log lines for one document across every stage.
    pub document_id: Uuid,
    pub name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            document_id: Uuid::new_v4(),
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk. The file name (not the full path) becomes `name`.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

/// The value a successful upload hands to the analysis stage.
/// Entering analysis without one is a missing-precondition error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionHandoff {
    pub document_id: Uuid,
    pub extracted_text: String,
    pub filename: Option<String>,
}

/// The active résumé after extraction. Never mutated; a re-upload replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: Uuid,
    pub filename: Option<String>,
    pub extracted_text: String,
}

impl From<ExtractionHandoff> for Document {
    fn from(handoff: ExtractionHandoff) -> Self {
        Self {
            id: handoff.document_id,
            filename: handoff.filename,
            extracted_text: handoff.extracted_text,
        }
    }
}
