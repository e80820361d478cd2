use serde::{Deserialize, Serialize};

/// Structured output of one analysis call. Replaced wholesale by the next call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub missing_sections: Vec<String>,
    pub weak_areas: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub improved_resume: String,
}
