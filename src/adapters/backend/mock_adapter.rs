//! Mock backend adapter for running without a server.
//!
//! Returns canned analyses by default. Tests can script per-call outcomes and
//! latencies to reproduce out-of-order responses.

use crate::domain::{
    AnalysisResult, GatewayError, MedicinePayload, SubmissionKind, SymptomsPayload, UploadPayload,
};
use crate::ports::AnalysisGateway;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

struct Scripted<T> {
    delay: Duration,
    outcome: Result<T, GatewayError>,
}

/// Mock gateway.
///
/// Scripted outcomes are consumed in call order (the order in which calls
/// start, not finish). When a queue is empty the canned response is used.
pub struct MockGateway {
    /// Simulated network delay for canned responses.
    delay_ms: u64,
    analyses: Mutex<VecDeque<Scripted<AnalysisResult>>>,
    translations: Mutex<VecDeque<Scripted<String>>>,
    calls: Mutex<Vec<SubmissionKind>>,
}

impl MockGateway {
    /// Create a new mock gateway with default delay (100ms).
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            analyses: Mutex::new(VecDeque::new()),
            translations: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue the outcome of the next submission (any kind).
    pub fn push_analysis(&self, delay_ms: u64, outcome: Result<AnalysisResult, GatewayError>) {
        lock(&self.analyses).push_back(Scripted {
            delay: Duration::from_millis(delay_ms),
            outcome,
        });
    }

    /// Queue the outcome of the next translation.
    pub fn push_translation(&self, delay_ms: u64, outcome: Result<String, GatewayError>) {
        lock(&self.translations).push_back(Scripted {
            delay: Duration::from_millis(delay_ms),
            outcome,
        });
    }

    /// Requests seen so far, in call order.
    pub fn calls(&self) -> Vec<SubmissionKind> {
        lock(&self.calls).clone()
    }

    async fn analysis(
        &self,
        kind: SubmissionKind,
        canned: impl FnOnce() -> String,
    ) -> Result<AnalysisResult, GatewayError> {
        lock(&self.calls).push(kind);
        let scripted = lock(&self.analyses).pop_front();
        info!(%kind, scripted = scripted.is_some(), "[MOCK] Simulating analysis");

        match scripted {
            Some(s) => {
                tokio::time::sleep(s.delay).await;
                s.outcome
            }
            None => {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
                Ok(AnalysisResult::new(canned()))
            }
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Poisoning only happens if a test panicked mid-push; the data is still usable.
fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait::async_trait]
impl AnalysisGateway for MockGateway {
    async fn submit_upload(&self, payload: &UploadPayload) -> Result<AnalysisResult, GatewayError> {
        let size = payload.file.as_ref().map_or(0, Vec::len);
        self.analysis(SubmissionKind::Upload, || {
            format!(
                "## [MOCK] Report analysis\n\n\
                 Simulated analysis of `{}` ({}, {} bytes). Configure `MEDSCAN_BACKEND_URL` \
                 and unset `MEDSCAN_MOCK` to talk to a real backend.",
                payload.file_name, payload.mime_type, size
            )
        })
        .await
    }

    async fn submit_symptoms(
        &self,
        payload: &SymptomsPayload,
    ) -> Result<AnalysisResult, GatewayError> {
        self.analysis(SubmissionKind::Symptoms, || {
            format!(
                "## [MOCK] Symptom analysis\n\n\
                 **Reported:** {}\n\n\
                 - Urgency: Low\n\
                 - Rest, fluids, and see a doctor if symptoms persist.",
                payload.text
            )
        })
        .await
    }

    async fn submit_medicine(
        &self,
        payload: &MedicinePayload,
    ) -> Result<AnalysisResult, GatewayError> {
        self.analysis(SubmissionKind::Medicine, || {
            let d = payload.dosage;
            format!(
                "## [MOCK] Medicine analysis: {}\n\n\
                 Dosage {}-{}-{} for a {} year old {} patient.",
                payload.name,
                d.morning,
                d.evening,
                d.night,
                payload.patient.age.unwrap_or_default(),
                payload.patient.gender
            )
        })
        .await
    }

    async fn translate(&self, text: &str) -> Result<String, GatewayError> {
        lock(&self.calls).push(SubmissionKind::Translation);
        let scripted = lock(&self.translations).pop_front();
        info!(
            text_len = text.len(),
            scripted = scripted.is_some(),
            "[MOCK] Simulating translation"
        );

        match scripted {
            Some(s) => {
                tokio::time::sleep(s.delay).await;
                s.outcome
            }
            None => {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
                Ok(format!("[MOCK বাংলা]\n\n{}", text))
            }
        }
    }
}
