//! Analysis service. Orchestrates validation, backend calls and the request lifecycle.
//!
//! Flow for every submission:
//! 1. Validate input (failure goes straight to `Error`, no request is sent)
//! 2. Stamp a new generation and enter `Loading`
//! 3. Await the gateway
//! 4. Apply the outcome only if its generation is still current
//!
//! State sits behind a `std::sync::Mutex` that is never held across an
//! `.await`, so overlapping submissions and translations can run as
//! concurrent futures on one thread.

use crate::domain::validation::{validate_medicine, validate_symptoms, validate_upload};
use crate::domain::{
    AnalysisResult, AnalysisSession, Completion, DisplayLanguage, DomainError, GatewayError,
    InputMode, InputModeController, LifecycleState, MedicinePayload, RenderHints,
    RequestLifecycle, SubmissionKind, SymptomsPayload, Ticket, UploadPayload, ValidationError,
    project,
};
use crate::ports::{AnalysisGateway, RenderPort};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct ClientState {
    mode: InputModeController,
    lifecycle: RequestLifecycle,
}

impl ClientState {
    fn project(&self) -> RenderHints {
        project(self.mode.active(), &self.lifecycle)
    }
}

/// Client-side use case for one page session.
pub struct AnalysisService {
    gateway: Arc<dyn AnalysisGateway>,
    renderer: Arc<dyn RenderPort>,
    state: Mutex<ClientState>,
}

impl AnalysisService {
    pub fn new(gateway: Arc<dyn AnalysisGateway>, renderer: Arc<dyn RenderPort>) -> Self {
        Self {
            gateway,
            renderer,
            state: Mutex::new(ClientState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClientState> {
        // state stays consistent even if a renderer panicked elsewhere
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mutate state, then push the new projection to the renderer (outside the lock).
    fn update<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        let (out, hints) = {
            let mut state = self.lock();
            let out = f(&mut state);
            (out, state.project())
        };
        self.renderer.render(&hints);
        out
    }

    /// Switch input mode. In-flight requests and the current result are untouched.
    pub fn select_mode(&self, mode: InputMode) {
        debug!(%mode, "mode selected");
        self.update(|s| s.mode.select_mode(mode));
    }

    pub async fn submit_upload(&self, payload: &UploadPayload) -> Result<Completion, DomainError> {
        let payload = self.check(validate_upload(payload))?;
        let ticket = self.begin(SubmissionKind::Upload);
        let outcome = self.gateway.submit_upload(payload).await;
        self.complete(ticket, outcome)
    }

    pub async fn submit_symptoms(
        &self,
        payload: &SymptomsPayload,
    ) -> Result<Completion, DomainError> {
        let payload = self.check(validate_symptoms(payload))?;
        let ticket = self.begin(SubmissionKind::Symptoms);
        let outcome = self.gateway.submit_symptoms(&payload).await;
        self.complete(ticket, outcome)
    }

    pub async fn submit_medicine(
        &self,
        payload: &MedicinePayload,
    ) -> Result<Completion, DomainError> {
        let payload = self.check(validate_medicine(payload))?;
        let ticket = self.begin(SubmissionKind::Medicine);
        let outcome = self.gateway.submit_medicine(&payload).await;
        self.complete(ticket, outcome)
    }

    /// Translate the current result to Bangla. The result stays visible while
    /// the request runs; on success the display switches to Bangla.
    ///
    /// Fails with `NoActiveAnalysis` (state unchanged) when there is nothing
    /// to translate.
    pub async fn translate(&self) -> Result<Completion, DomainError> {
        let (ticket, english) = self.update(|s| s.lifecycle.begin_translation())?;
        info!(generation = ticket.generation(), "translation started");

        let outcome = self.gateway.translate(&english).await;
        let failure = outcome.as_ref().err().cloned();
        let completion = self.update(|s| s.lifecycle.complete_translation(ticket, outcome));
        self.finish(ticket, completion, failure)
    }

    pub fn set_display_language(&self, lang: DisplayLanguage) -> Result<(), DomainError> {
        self.update(|s| s.lifecycle.set_display_language(lang))?;
        Ok(())
    }

    pub fn snapshot(&self) -> RenderHints {
        self.lock().project()
    }

    pub fn active_mode(&self) -> InputMode {
        self.lock().mode.active()
    }

    pub fn state(&self) -> LifecycleState {
        self.lock().lifecycle.state().clone()
    }

    pub fn session(&self) -> AnalysisSession {
        self.lock().lifecycle.session().clone()
    }

    fn check<T>(&self, validated: Result<T, ValidationError>) -> Result<T, DomainError> {
        validated.map_err(|e| {
            warn!(error = %e, "input rejected");
            self.update(|s| s.lifecycle.reject_input(&e));
            DomainError::from(e)
        })
    }

    fn begin(&self, kind: SubmissionKind) -> Ticket {
        let ticket = self.update(|s| s.lifecycle.begin_submission(kind));
        info!(%kind, generation = ticket.generation(), "submission started");
        ticket
    }

    fn complete(
        &self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, GatewayError>,
    ) -> Result<Completion, DomainError> {
        let failure = outcome.as_ref().err().cloned();
        let completion = self.update(|s| s.lifecycle.complete_submission(ticket, outcome));
        self.finish(ticket, completion, failure)
    }

    fn finish(
        &self,
        ticket: Ticket,
        completion: Completion,
        failure: Option<GatewayError>,
    ) -> Result<Completion, DomainError> {
        let kind = ticket.kind();
        let generation = ticket.generation();
        match (completion, failure) {
            (Completion::Stale, _) => {
                debug!(%kind, generation, "discarding stale response");
                Ok(Completion::Stale)
            }
            (Completion::Applied, Some(e)) => {
                warn!(%kind, generation, error = %e, "request failed");
                Err(e.into())
            }
            (Completion::Applied, None) => {
                info!(%kind, generation, "response applied");
                Ok(Completion::Applied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::backend::MockGateway;
    use crate::domain::{Dosage, Patient, Region, SessionError};

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Mutex<Vec<RenderHints>>,
    }

    impl RecordingRenderer {
        fn regions(&self) -> Vec<Region> {
            self.frames.lock().unwrap().iter().map(|h| h.region).collect()
        }
    }

    impl RenderPort for RecordingRenderer {
        fn render(&self, hints: &RenderHints) {
            self.frames.lock().unwrap().push(hints.clone());
        }
    }

    fn setup() -> (AnalysisService, Arc<MockGateway>, Arc<RecordingRenderer>) {
        let gw = Arc::new(MockGateway::with_delay(1));
        let renderer = Arc::new(RecordingRenderer::default());
        let svc = AnalysisService::new(gw.clone(), renderer.clone());
        (svc, gw, renderer)
    }

    fn symptoms(text: &str) -> SymptomsPayload {
        SymptomsPayload { text: text.into() }
    }

    fn medicine(dosage: (u32, u32, u32)) -> MedicinePayload {
        MedicinePayload {
            name: "Napa".into(),
            dosage: Dosage {
                morning: dosage.0,
                evening: dosage.1,
                night: dosage.2,
            },
            patient: Patient {
                age: Some(42),
                gender: "male".into(),
            },
        }
    }

    async fn with_result(svc: &AnalysisService, gw: &MockGateway, english: &str) {
        gw.push_analysis(1, Ok(AnalysisResult::new(english)));
        svc.submit_symptoms(&symptoms("fever and cough"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_symptoms_to_result() {
        let (svc, gw, renderer) = setup();
        gw.push_analysis(1, Ok(AnalysisResult::new("## Likely cold")));

        let completion = svc.submit_symptoms(&symptoms("fever and cough")).await;

        assert_eq!(completion, Ok(Completion::Applied));
        assert_eq!(svc.state(), LifecycleState::Result);
        let hints = svc.snapshot();
        assert_eq!(hints.language, DisplayLanguage::English);
        assert_eq!(hints.display_text.as_deref(), Some("## Likely cold"));
        assert_eq!(renderer.regions(), vec![Region::Loading, Region::Result]);
    }

    #[tokio::test]
    async fn test_translate_after_result() {
        let (svc, gw, _) = setup();
        with_result(&svc, &gw, "## Likely cold").await;
        gw.push_translation(1, Ok("## সম্ভাব্য সর্দি".into()));

        assert_eq!(svc.translate().await, Ok(Completion::Applied));

        let session = svc.session();
        assert_eq!(
            session.result().unwrap().bangla.as_deref(),
            Some("## সম্ভাব্য সর্দি")
        );
        assert_eq!(session.display_language(), DisplayLanguage::Bangla);
        assert_eq!(svc.state(), LifecycleState::Result);
    }

    #[tokio::test]
    async fn test_second_translate_is_rejected_without_a_request() {
        let (svc, gw, renderer) = setup();
        with_result(&svc, &gw, "## Likely cold").await;
        gw.push_translation(1, Ok("## সম্ভাব্য সর্দি".into()));
        svc.translate().await.unwrap();
        let before = svc.snapshot();

        let err = svc.translate().await.unwrap_err();

        assert_eq!(err, DomainError::Session(SessionError::AlreadyTranslated));
        assert_eq!(
            gw.calls(),
            vec![SubmissionKind::Symptoms, SubmissionKind::Translation]
        );
        assert_eq!(svc.state(), LifecycleState::Result);
        assert_eq!(svc.session().display_text(), Some("## সম্ভাব্য সর্দি"));
        assert!(!before.translate_button.visible);
        assert_eq!(renderer.frames.lock().unwrap().last(), Some(&before));
    }

    #[tokio::test]
    async fn test_all_zero_dosage_never_loads() {
        let (svc, gw, renderer) = setup();

        let err = svc.submit_medicine(&medicine((0, 0, 0))).await.unwrap_err();

        assert_eq!(err, DomainError::Validation(ValidationError::AllDosagesZero));
        assert!(gw.calls().is_empty());
        assert_eq!(renderer.regions(), vec![Region::Error]);
        assert_eq!(
            svc.state(),
            LifecycleState::Error("Please enter at least one dosage value".into())
        );
    }

    #[tokio::test]
    async fn test_plain_text_upload_rejected() {
        let (svc, gw, _) = setup();
        let payload = UploadPayload {
            file: Some(b"hello".to_vec()),
            file_name: "notes.txt".into(),
            mime_type: "text/plain".into(),
        };

        let err = svc.submit_upload(&payload).await.unwrap_err();

        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidFileType { .. })
        ));
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn test_translate_without_result() {
        let (svc, gw, _) = setup();

        let err = svc.translate().await.unwrap_err();

        assert_eq!(err, DomainError::Session(SessionError::NoActiveAnalysis));
        assert_eq!(svc.state(), LifecycleState::Idle);
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn test_late_response_for_superseded_submission_is_dropped() {
        let (svc, gw, _) = setup();
        // symptoms answers after medicine has already committed
        gw.push_analysis(80, Ok(AnalysisResult::new("symptoms result")));
        gw.push_analysis(5, Ok(AnalysisResult::new("medicine result")));

        let (early, late) = (symptoms("headache"), medicine((1, 0, 1)));
        let (first, second) = tokio::join!(
            svc.submit_symptoms(&early),
            svc.submit_medicine(&late)
        );

        assert_eq!(first, Ok(Completion::Stale));
        assert_eq!(second, Ok(Completion::Applied));
        assert_eq!(
            svc.session().result().unwrap().english,
            "medicine result"
        );
        assert_eq!(
            gw.calls(),
            vec![SubmissionKind::Symptoms, SubmissionKind::Medicine]
        );
    }

    #[tokio::test]
    async fn test_early_stale_error_does_not_surface() {
        let (svc, gw, _) = setup();
        gw.push_analysis(5, Err(GatewayError::Transport("Request failed".into())));
        gw.push_analysis(40, Ok(AnalysisResult::new("latest")));

        let (one, two) = (symptoms("one"), symptoms("two"));
        let (first, second) = tokio::join!(svc.submit_symptoms(&one), svc.submit_symptoms(&two));

        assert_eq!(first, Ok(Completion::Stale));
        assert_eq!(second, Ok(Completion::Applied));
        assert_eq!(svc.state(), LifecycleState::Result);
    }

    #[tokio::test]
    async fn test_submission_invalidates_pending_translation() {
        let (svc, gw, _) = setup();
        with_result(&svc, &gw, "old").await;
        gw.push_translation(60, Ok("পুরনো".into()));
        gw.push_analysis(5, Ok(AnalysisResult::new("fresh")));

        let fresh = medicine((1, 1, 1));
        let (translated, submitted) = tokio::join!(svc.translate(), svc.submit_medicine(&fresh));

        assert_eq!(translated, Ok(Completion::Stale));
        assert_eq!(submitted, Ok(Completion::Applied));
        let session = svc.session();
        assert_eq!(session.result().unwrap().english, "fresh");
        assert!(!session.has_translation());
        assert_eq!(session.display_language(), DisplayLanguage::English);
    }

    #[tokio::test]
    async fn test_translation_failure_allows_retry() {
        let (svc, gw, _) = setup();
        with_result(&svc, &gw, "english").await;
        gw.push_translation(1, Err(GatewayError::Backend("Error during translation".into())));

        let err = svc.translate().await.unwrap_err();
        assert_eq!(
            err,
            DomainError::Gateway(GatewayError::Backend("Error during translation".into()))
        );
        assert_eq!(
            svc.state(),
            LifecycleState::Error("Error during translation".into())
        );

        gw.push_translation(1, Ok("বাংলা".into()));
        assert_eq!(svc.translate().await, Ok(Completion::Applied));
        assert_eq!(svc.state(), LifecycleState::Result);
        assert_eq!(
            gw.calls(),
            vec![
                SubmissionKind::Symptoms,
                SubmissionKind::Translation,
                SubmissionKind::Translation
            ]
        );
    }

    #[tokio::test]
    async fn test_translate_button_disabled_while_translating() {
        let (svc, gw, renderer) = setup();
        with_result(&svc, &gw, "english").await;
        gw.push_translation(1, Ok("বাংলা".into()));

        svc.translate().await.unwrap();

        let frames = renderer.frames.lock().unwrap();
        let during = &frames[frames.len() - 2];
        assert_eq!(during.region, Region::Result);
        assert!(!during.translate_button.enabled);
        let after = frames.last().unwrap();
        assert!(!after.translate_button.visible);
        assert!(after.bangla_button_active);
    }

    #[tokio::test]
    async fn test_display_language_switching() {
        let (svc, gw, _) = setup();
        with_result(&svc, &gw, "english").await;

        assert_eq!(
            svc.set_display_language(DisplayLanguage::Bangla),
            Err(DomainError::Session(SessionError::TranslationUnavailable))
        );

        gw.push_translation(1, Ok("বাংলা".into()));
        svc.translate().await.unwrap();
        svc.set_display_language(DisplayLanguage::English).unwrap();
        assert_eq!(svc.snapshot().display_text.as_deref(), Some("english"));
        svc.set_display_language(DisplayLanguage::Bangla).unwrap();
        assert_eq!(svc.snapshot().display_text.as_deref(), Some("বাংলা"));
    }

    #[tokio::test]
    async fn test_mode_switch_keeps_result() {
        let (svc, gw, _) = setup();
        with_result(&svc, &gw, "english").await;

        svc.select_mode(InputMode::Medicine);

        assert_eq!(svc.active_mode(), InputMode::Medicine);
        assert_eq!(svc.state(), LifecycleState::Result);
        assert!(svc.snapshot().tabs[2].active);
    }

    #[tokio::test]
    async fn test_backend_error_then_resubmit() {
        let (svc, gw, _) = setup();
        gw.push_analysis(1, Err(GatewayError::Backend("Invalid file type".into())));
        let payload = UploadPayload {
            file: Some(vec![0xff, 0xd8]),
            file_name: "scan.jpg".into(),
            mime_type: "image/jpeg".into(),
        };

        assert!(svc.submit_upload(&payload).await.is_err());
        assert_eq!(svc.state(), LifecycleState::Error("Invalid file type".into()));

        assert_eq!(svc.submit_upload(&payload).await, Ok(Completion::Applied));
        assert_eq!(svc.state(), LifecycleState::Result);
    }
}
