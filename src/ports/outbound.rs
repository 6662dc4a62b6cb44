//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    AnalysisResult, GatewayError, MedicinePayload, RenderHints, SymptomsPayload, UploadPayload,
};

/// Analysis backend. One call per submission endpoint plus translation.
///
/// Implementations never panic or leak transport errors: every failure comes
/// back as a `GatewayError` whose message can be shown to the user as-is.
/// Payloads are already validated.
#[async_trait::async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// `POST /upload` (multipart, field `file`).
    async fn submit_upload(&self, payload: &UploadPayload) -> Result<AnalysisResult, GatewayError>;

    /// `POST /analyze-symptoms`.
    async fn submit_symptoms(
        &self,
        payload: &SymptomsPayload,
    ) -> Result<AnalysisResult, GatewayError>;

    /// `POST /analyze-medicine`.
    async fn submit_medicine(
        &self,
        payload: &MedicinePayload,
    ) -> Result<AnalysisResult, GatewayError>;

    /// `POST /translate`. Returns the Bangla markdown.
    async fn translate(&self, text: &str) -> Result<String, GatewayError>;
}

/// Receives a fresh projection after every state transition.
pub trait RenderPort: Send + Sync {
    fn render(&self, hints: &RenderHints);
}
