//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/terminal types here — adapters map into these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME types accepted for report uploads.
pub const ALLOWED_UPLOAD_TYPES: &[&str] = &["image/jpeg", "application/pdf"];

/// One of the three mutually exclusive input workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Report,
    Symptoms,
    Medicine,
}

impl InputMode {
    /// All modes in tab order.
    pub const ALL: [InputMode; 3] = [InputMode::Report, InputMode::Symptoms, InputMode::Medicine];

    pub fn label(self) -> &'static str {
        match self {
            InputMode::Report => "Report",
            InputMode::Symptoms => "Symptoms",
            InputMode::Medicine => "Medicine",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scanned report to upload. `file` is `None` when the user picked nothing.
#[derive(Debug, Clone, Default)]
pub struct UploadPayload {
    pub file: Option<Vec<u8>>,
    pub file_name: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomsPayload {
    pub text: String,
}

/// Tablets per time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dosage {
    pub morning: u32,
    pub evening: u32,
    pub night: u32,
}

impl Dosage {
    pub fn is_all_zero(&self) -> bool {
        self.morning == 0 && self.evening == 0 && self.night == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patient {
    /// `None` when the field was left blank.
    pub age: Option<u32>,
    /// Empty string when no gender was selected.
    pub gender: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicinePayload {
    pub name: String,
    pub dosage: Dosage,
    pub patient: Patient,
}

/// Narrative analysis returned by the backend, plus its on-demand translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Markdown. Never changes once the result exists.
    pub english: String,
    /// Markdown. Absent until a translation succeeds.
    pub bangla: Option<String>,
}

impl AnalysisResult {
    /// A fresh result always starts without a translation.
    pub fn new(english: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            bangla: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    English,
    Bangla,
}

impl fmt::Display for DisplayLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLanguage::English => f.write_str("English"),
            DisplayLanguage::Bangla => f.write_str("বাংলা"),
        }
    }
}

/// Kind of request a ticket was issued for. Used in logs and staleness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Upload,
    Symptoms,
    Medicine,
    Translation,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionKind::Upload => "upload",
            SubmissionKind::Symptoms => "symptoms",
            SubmissionKind::Medicine => "medicine",
            SubmissionKind::Translation => "translation",
        };
        f.write_str(s)
    }
}
