//! File selection gate. The extension is the only signal; content is never sniffed.

use crate::errors::WorkflowError;
use crate::models::SelectedFile;

pub const SUPPORTED_EXTENSIONS: &[&str] = &[".pdf", ".docx"];
pub const UNSUPPORTED_FILE_TYPE: &str = "unsupported file type";

pub fn has_supported_extension(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Accepts `.pdf` and `.docx` files (any case), rejects everything else.
pub fn validate(file: &SelectedFile) -> Result<(), WorkflowError> {
    if has_supported_extension(&file.name) {
        Ok(())
    } else {
        Err(WorkflowError::validation(UNSUPPORTED_FILE_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::new(name, Vec::new())
    }

    #[test]
    fn test_accepts_pdf_and_docx_any_case() {
        for name in ["resume.pdf", "resume.PDF", "Resume.Docx", "cv.final.docx", "a.pDf"] {
            assert!(validate(&file(name)).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_rejects_everything_else() {
        for name in [
            "notes.txt",
            "resume.doc",
            "resume.pdf.txt",
            "resume",
            "resume.pdfx",
            "docx",
            "",
        ] {
            assert_eq!(
                validate(&file(name)),
                Err(WorkflowError::validation(UNSUPPORTED_FILE_TYPE)),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_content_is_ignored() {
        let pdf_bytes_with_txt_name = SelectedFile::new("notes.txt", b"%PDF-1.7".to_vec());
        assert!(validate(&pdf_bytes_with_txt_name).is_err());
        let junk_with_pdf_name = SelectedFile::new("resume.pdf", b"not a pdf".to_vec());
        assert!(validate(&junk_with_pdf_name).is_ok());
    }
}
