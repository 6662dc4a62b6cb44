//! Current analysis and the language it is shown in.

use super::entities::{AnalysisResult, DisplayLanguage};
use super::errors::SessionError;

/// Holds at most one `AnalysisResult`. Replaced wholesale by each new result;
/// a translation, once attached, stays until then.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    result: Option<AnalysisResult>,
    language: DisplayLanguage,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any prior result. Language goes back to English and the
    /// incoming result starts untranslated.
    pub fn set_result(&mut self, result: AnalysisResult) {
        self.result = Some(AnalysisResult {
            bangla: None,
            ..result
        });
        self.language = DisplayLanguage::English;
    }

    /// Drop the current result (a new submission started).
    pub fn clear(&mut self) {
        self.result = None;
        self.language = DisplayLanguage::English;
    }

    pub fn attach_translation(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        let result = self
            .result
            .as_mut()
            .ok_or(SessionError::NoActiveAnalysis)?;
        result.bangla = Some(text.into());
        Ok(())
    }

    pub fn set_display_language(&mut self, lang: DisplayLanguage) -> Result<(), SessionError> {
        if lang == DisplayLanguage::Bangla && !self.has_translation() {
            return Err(SessionError::TranslationUnavailable);
        }
        self.language = lang;
        Ok(())
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn has_translation(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.bangla.is_some())
    }

    pub fn display_language(&self) -> DisplayLanguage {
        self.language
    }

    /// Markdown for the active language. Renderers that cannot format
    /// markdown show it as-is.
    pub fn display_text(&self) -> Option<&str> {
        let result = self.result.as_ref()?;
        match self.language {
            DisplayLanguage::English => Some(result.english.as_str()),
            DisplayLanguage::Bangla => result.bangla.as_deref(),
        }
    }
}
