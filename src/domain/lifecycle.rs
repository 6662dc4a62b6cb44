//! Request lifecycle state machine.
//!
//! `Idle -> Loading -> Result | Error`, and back to `Loading` on every new
//! submission. Each submission bumps a generation counter and hands out a
//! `Ticket`; an outcome is applied only if its ticket is still current, so a
//! slow response for a superseded request never overwrites newer state.
//!
//! Translation is a side-action on the current result: it never enters
//! `Loading`, and a failed translation keeps the result for a retry.

use super::entities::{AnalysisResult, DisplayLanguage, SubmissionKind};
use super::errors::{GatewayError, SessionError, ValidationError};
use super::session::AnalysisSession;

/// Which region of the page is visible. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading,
    /// The session holds a result to display.
    Result,
    Error(String),
}

/// Stamp for an in-flight request. Only `RequestLifecycle` creates these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    kind: SubmissionKind,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }
}

/// What happened to an outcome handed back to the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Superseded by a later user action; nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct RequestLifecycle {
    state: LifecycleState,
    session: AnalysisSession,
    generation: u64,
    /// Generation the pending translation was started for.
    pending_translation: Option<u64>,
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_translating(&self) -> bool {
        self.pending_translation.is_some()
    }

    /// Start a validated submission. Discards the previous result and
    /// invalidates everything still in flight.
    pub fn begin_submission(&mut self, kind: SubmissionKind) -> Ticket {
        self.generation += 1;
        self.pending_translation = None;
        self.session.clear();
        self.state = LifecycleState::Loading;
        Ticket {
            generation: self.generation,
            kind,
        }
    }

    /// Input was rejected before any request went out. Goes straight to
    /// `Error`; any in-flight request is superseded. A held result is kept.
    pub fn reject_input(&mut self, error: &ValidationError) {
        self.generation += 1;
        self.pending_translation = None;
        self.state = LifecycleState::Error(error.to_string());
    }

    pub fn complete_submission(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, GatewayError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            return Completion::Stale;
        }
        match outcome {
            Ok(result) => {
                self.session.set_result(result);
                self.state = LifecycleState::Result;
            }
            Err(e) => self.state = LifecycleState::Error(e.to_string()),
        }
        Completion::Applied
    }

    /// Start translating the current result. Returns the ticket and the
    /// English text to send.
    pub fn begin_translation(&mut self) -> Result<(Ticket, String), SessionError> {
        let english = self
            .session
            .result()
            .map(|r| r.english.clone())
            .ok_or(SessionError::NoActiveAnalysis)?;
        if self.pending_translation.is_some() {
            return Err(SessionError::TranslationInProgress);
        }
        if self.session.has_translation() {
            return Err(SessionError::AlreadyTranslated);
        }
        self.pending_translation = Some(self.generation);
        let ticket = Ticket {
            generation: self.generation,
            kind: SubmissionKind::Translation,
        };
        Ok((ticket, english))
    }

    pub fn complete_translation(
        &mut self,
        ticket: Ticket,
        outcome: Result<String, GatewayError>,
    ) -> Completion {
        if ticket.generation != self.generation || self.pending_translation != Some(ticket.generation)
        {
            return Completion::Stale;
        }
        self.pending_translation = None;
        match outcome {
            Ok(text) => {
                if self.session.attach_translation(text).is_err() {
                    return Completion::Stale;
                }
                // attached just above, cannot be unavailable
                let _ = self.session.set_display_language(DisplayLanguage::Bangla);
                self.state = LifecycleState::Result;
            }
            Err(e) => self.state = LifecycleState::Error(e.to_string()),
        }
        Completion::Applied
    }

    pub fn set_display_language(&mut self, lang: DisplayLanguage) -> Result<(), SessionError> {
        self.session.set_display_language(lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(text: &str) -> Result<AnalysisResult, GatewayError> {
        Ok(AnalysisResult::new(text))
    }

    #[test]
    fn test_starts_idle() {
        let lc = RequestLifecycle::new();
        assert_eq!(lc.state(), &LifecycleState::Idle);
        assert_eq!(lc.generation(), 0);
        assert!(!lc.session().has_result());
    }

    #[test]
    fn test_submission_to_result() {
        let mut lc = RequestLifecycle::new();
        let ticket = lc.begin_submission(SubmissionKind::Symptoms);
        assert_eq!(lc.state(), &LifecycleState::Loading);
        assert_eq!(ticket.kind(), SubmissionKind::Symptoms);

        assert_eq!(
            lc.complete_submission(ticket, analysis("## Likely cold")),
            Completion::Applied
        );
        assert_eq!(lc.state(), &LifecycleState::Result);
        assert_eq!(lc.session().display_text(), Some("## Likely cold"));
        assert_eq!(lc.session().display_language(), DisplayLanguage::English);
    }

    #[test]
    fn test_gateway_error_surfaces_verbatim() {
        let mut lc = RequestLifecycle::new();
        let ticket = lc.begin_submission(SubmissionKind::Upload);
        lc.complete_submission(ticket, Err(GatewayError::Backend("No selected file".into())));
        assert_eq!(lc.state(), &LifecycleState::Error("No selected file".into()));

        // errors are never terminal
        let ticket = lc.begin_submission(SubmissionKind::Upload);
        assert_eq!(lc.state(), &LifecycleState::Loading);
        lc.complete_submission(ticket, analysis("ok"));
        assert_eq!(lc.state(), &LifecycleState::Result);
    }

    #[test]
    fn test_latest_submission_wins() {
        let mut lc = RequestLifecycle::new();
        let symptoms = lc.begin_submission(SubmissionKind::Symptoms);
        let medicine = lc.begin_submission(SubmissionKind::Medicine);

        assert_eq!(
            lc.complete_submission(medicine, analysis("medicine")),
            Completion::Applied
        );
        assert_eq!(
            lc.complete_submission(symptoms, analysis("symptoms")),
            Completion::Stale
        );
        assert_eq!(lc.session().display_text(), Some("medicine"));
        assert_eq!(lc.state(), &LifecycleState::Result);
    }

    #[test]
    fn test_stale_error_does_not_clobber_loading() {
        let mut lc = RequestLifecycle::new();
        let first = lc.begin_submission(SubmissionKind::Symptoms);
        let _second = lc.begin_submission(SubmissionKind::Symptoms);
        assert_eq!(
            lc.complete_submission(first, Err(GatewayError::Transport("timeout".into()))),
            Completion::Stale
        );
        assert_eq!(lc.state(), &LifecycleState::Loading);
    }

    #[test]
    fn test_new_submission_discards_result() {
        let mut lc = RequestLifecycle::new();
        let t = lc.begin_submission(SubmissionKind::Symptoms);
        lc.complete_submission(t, analysis("old"));
        lc.begin_submission(SubmissionKind::Medicine);
        assert!(!lc.session().has_result());
    }

    #[test]
    fn test_validation_failure_skips_loading() {
        let mut lc = RequestLifecycle::new();
        lc.reject_input(&ValidationError::AllDosagesZero);
        assert_eq!(
            lc.state(),
            &LifecycleState::Error("Please enter at least one dosage value".into())
        );
    }

    #[test]
    fn test_validation_failure_supersedes_in_flight() {
        let mut lc = RequestLifecycle::new();
        let ticket = lc.begin_submission(SubmissionKind::Symptoms);
        lc.reject_input(&ValidationError::EmptyInput);
        assert_eq!(lc.complete_submission(ticket, analysis("late")), Completion::Stale);
        assert!(matches!(lc.state(), LifecycleState::Error(_)));
    }

    #[test]
    fn test_translation_keeps_result_visible() {
        let mut lc = RequestLifecycle::new();
        let t = lc.begin_submission(SubmissionKind::Symptoms);
        lc.complete_submission(t, analysis("## Likely cold"));

        let (ticket, english) = lc.begin_translation().unwrap();
        assert_eq!(english, "## Likely cold");
        assert_eq!(ticket.kind(), SubmissionKind::Translation);
        assert_eq!(lc.state(), &LifecycleState::Result);
        assert!(lc.is_translating());
        assert_eq!(
            lc.begin_translation().unwrap_err(),
            SessionError::TranslationInProgress
        );

        assert_eq!(
            lc.complete_translation(ticket, Ok("## সম্ভাব্য সর্দি".into())),
            Completion::Applied
        );
        assert!(!lc.is_translating());
        assert_eq!(lc.session().display_language(), DisplayLanguage::Bangla);
        assert_eq!(lc.session().display_text(), Some("## সম্ভাব্য সর্দি"));
    }

    #[test]
    fn test_translation_without_result() {
        let mut lc = RequestLifecycle::new();
        assert_eq!(lc.begin_translation().unwrap_err(), SessionError::NoActiveAnalysis);
        assert_eq!(lc.state(), &LifecycleState::Idle);

        lc.begin_submission(SubmissionKind::Symptoms);
        assert_eq!(lc.begin_translation().unwrap_err(), SessionError::NoActiveAnalysis);
        assert_eq!(lc.state(), &LifecycleState::Loading);
    }

    #[test]
    fn test_failed_translation_keeps_result_for_retry() {
        let mut lc = RequestLifecycle::new();
        let t = lc.begin_submission(SubmissionKind::Medicine);
        lc.complete_submission(t, analysis("english"));

        let (ticket, _) = lc.begin_translation().unwrap();
        lc.complete_translation(ticket, Err(GatewayError::Backend("Translation failed".into())));
        assert_eq!(lc.state(), &LifecycleState::Error("Translation failed".into()));
        assert_eq!(lc.session().result().unwrap().english, "english");

        let (retry, english) = lc.begin_translation().unwrap();
        assert_eq!(english, "english");
        lc.complete_translation(retry, Ok("বাংলা".into()));
        assert_eq!(lc.state(), &LifecycleState::Result);
        assert!(lc.session().has_translation());
    }

    #[test]
    fn test_submission_invalidates_pending_translation() {
        let mut lc = RequestLifecycle::new();
        let t = lc.begin_submission(SubmissionKind::Symptoms);
        lc.complete_submission(t, analysis("first"));
        let (translation, _) = lc.begin_translation().unwrap();

        let t = lc.begin_submission(SubmissionKind::Medicine);
        assert!(!lc.is_translating());
        assert_eq!(
            lc.complete_translation(translation, Ok("পুরনো".into())),
            Completion::Stale
        );
        lc.complete_submission(t, analysis("second"));
        assert!(!lc.session().has_translation());
        assert_eq!(lc.session().display_language(), DisplayLanguage::English);
    }

    #[test]
    fn test_translated_result_is_not_translated_again() {
        let mut lc = RequestLifecycle::new();
        let t = lc.begin_submission(SubmissionKind::Symptoms);
        lc.complete_submission(t, analysis("english"));
        let (ticket, _) = lc.begin_translation().unwrap();
        lc.complete_translation(ticket, Ok("বাংলা".into()));
        let generation = lc.generation();

        assert_eq!(lc.begin_translation().unwrap_err(), SessionError::AlreadyTranslated);
        assert!(!lc.is_translating());
        assert_eq!(lc.generation(), generation);
        assert_eq!(lc.state(), &LifecycleState::Result);
        assert_eq!(lc.session().display_text(), Some("বাংলা"));
    }
}
