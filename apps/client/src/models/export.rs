use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

/// Named formatting preset applied by the export service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    #[default]
    Professional,
    Modern,
    Classic,
    Creative,
}

impl TemplateStyle {
    pub const ALL: [TemplateStyle; 4] = [
        TemplateStyle::Professional,
        TemplateStyle::Modern,
        TemplateStyle::Classic,
        TemplateStyle::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateStyle::Professional => "professional",
            TemplateStyle::Modern => "modern",
            TemplateStyle::Classic => "classic",
            TemplateStyle::Creative => "creative",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for TemplateStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseOptionError {
                kind: "template style",
                value: s.to_string(),
                expected: "professional, modern, classic, creative",
            })
    }
}

impl FromStr for ExportFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            _ => Err(ParseOptionError {
                kind: "format",
                value: s.to_string(),
                expected: "pdf, docx",
            }),
        }
    }
}

impl fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Body of `POST /api/export`. Built fresh for every export, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest<'a> {
    pub resume_text: &'a str,
    pub template_style: TemplateStyle,
    pub format: ExportFormat,
}

/// A rendered résumé ready to be saved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Bytes,
    pub filename: String,
}

/// `resume_<style>.<format>`, the name offered for download.
pub fn suggested_filename(style: TemplateStyle, format: ExportFormat) -> String {
    format!("resume_{}.{}", style.as_str(), format.extension())
}
