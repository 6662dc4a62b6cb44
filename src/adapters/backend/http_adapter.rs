//! HTTP adapter for the analysis backend.
//!
//! Implements `AnalysisGateway` over reqwest. Transport failures, non-2xx
//! statuses and malformed bodies are all folded into `GatewayError`.

use super::wire::{
    self, AnalysisResponse, MedicineRequest, SymptomsRequest, TranslateRequest, TranslateResponse,
};
use crate::domain::{
    AnalysisResult, GatewayError, MedicinePayload, SymptomsPayload, UploadPayload,
};
use crate::ports::AnalysisGateway;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Backend client bound to one base URL (e.g. "http://127.0.0.1:5000").
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway. `timeout` applies to each whole request; analysis
    /// calls run an LLM on the backend and can take minutes.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(|e| {
            warn!(path, error = %e, "backend request failed");
            GatewayError::Transport(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            debug!(path, status = %status, body_len = body.len(), "backend responded");
        } else {
            warn!(
                path,
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "backend returned error status"
            );
        }

        wire::decode(status, &body)
    }

    async fn post_json<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(path, request).await
    }
}

#[async_trait::async_trait]
impl AnalysisGateway for HttpGateway {
    async fn submit_upload(&self, payload: &UploadPayload) -> Result<AnalysisResult, GatewayError> {
        let bytes = payload
            .file
            .clone()
            .ok_or_else(|| GatewayError::Transport("No file to upload".to_string()))?;
        info!(
            file = %payload.file_name,
            mime = %payload.mime_type,
            size = bytes.len(),
            "uploading report"
        );

        let part = Part::bytes(bytes)
            .file_name(payload.file_name.clone())
            .mime_str(&payload.mime_type)
            .map_err(|e| GatewayError::Transport(format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part("file", part);

        let request = self.client.post(self.url("/upload")).multipart(form);
        let response: AnalysisResponse = self.send("/upload", request).await?;
        response.into_result()
    }

    async fn submit_symptoms(
        &self,
        payload: &SymptomsPayload,
    ) -> Result<AnalysisResult, GatewayError> {
        info!(text_len = payload.text.len(), "analyzing symptoms");
        let response: AnalysisResponse = self
            .post_json(
                "/analyze-symptoms",
                &SymptomsRequest {
                    symptoms: &payload.text,
                },
            )
            .await?;
        response.into_result()
    }

    async fn submit_medicine(
        &self,
        payload: &MedicinePayload,
    ) -> Result<AnalysisResult, GatewayError> {
        info!(medicine = %payload.name, "analyzing medicine");
        let response: AnalysisResponse = self
            .post_json("/analyze-medicine", &MedicineRequest::from_payload(payload))
            .await?;
        response.into_result()
    }

    async fn translate(&self, text: &str) -> Result<String, GatewayError> {
        info!(text_len = text.len(), "requesting translation");
        let response: TranslateResponse = self
            .post_json("/translate", &TranslateRequest { text })
            .await?;
        response.into_translation()
    }
}
