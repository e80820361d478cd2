pub mod analysis;
pub mod document;
pub mod export;

pub use analysis::AnalysisResult;
pub use document::{Document, ExtractionHandoff, SelectedFile};
pub use export::{ExportArtifact, ExportFormat, ExportRequest, TemplateStyle};
