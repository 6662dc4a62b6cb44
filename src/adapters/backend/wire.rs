//! Wire format of the analysis backend and response normalization.
//!
//! Every way a response can go wrong ends up as a `GatewayError`.

use crate::domain::{AnalysisResult, Dosage, GatewayError, MedicinePayload};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const TRANSLATION_FAILED: &str = "Translation failed";

#[derive(Serialize)]
pub struct SymptomsRequest<'a> {
    pub symptoms: &'a str,
}

#[derive(Serialize)]
pub struct MedicineRequest<'a> {
    pub medicine: &'a str,
    pub dosage: Dosage,
    pub patient: PatientBody<'a>,
}

#[derive(Serialize)]
pub struct PatientBody<'a> {
    pub age: u32,
    pub gender: &'a str,
}

impl<'a> MedicineRequest<'a> {
    pub fn from_payload(payload: &'a MedicinePayload) -> Self {
        Self {
            medicine: &payload.name,
            dosage: payload.dosage,
            patient: PatientBody {
                age: payload.patient.age.unwrap_or_default(),
                gender: &payload.patient.gender,
            },
        }
    }
}

#[derive(Serialize)]
pub struct TranslateRequest<'a> {
    pub text: &'a str,
}

/// `{success, analysis:{english}, error?}`
#[derive(Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub success: bool,
    pub analysis: Option<WireAnalysis>,
    pub error: Option<String>,
}

/// The backend may send `bangla: null` as well; a fresh result never has one.
#[derive(Deserialize)]
pub struct WireAnalysis {
    pub english: Option<String>,
}

/// `{success, translation?, error?}`
#[derive(Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub success: bool,
    pub translation: Option<String>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Decode a response body. Non-2xx responses carrying `{error}` are backend
/// errors; anything else that does not decode is a transport error.
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, GatewayError> {
    if !status.is_success() {
        let reported = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty());
        return Err(match reported {
            Some(error) => GatewayError::Backend(error),
            None => GatewayError::Transport(format!("Server returned {}", status)),
        });
    }
    serde_json::from_str(body)
        .map_err(|e| GatewayError::Transport(format!("Malformed response: {}", e)))
}

impl AnalysisResponse {
    pub fn into_result(self) -> Result<AnalysisResult, GatewayError> {
        if !self.success {
            return Err(GatewayError::Backend(
                self.error.unwrap_or_else(|| UNEXPECTED_ERROR.to_string()),
            ));
        }
        self.analysis
            .and_then(|a| a.english)
            .map(AnalysisResult::new)
            .ok_or_else(|| GatewayError::Backend(UNEXPECTED_ERROR.to_string()))
    }
}

impl TranslateResponse {
    pub fn into_translation(self) -> Result<String, GatewayError> {
        match (self.success, self.translation) {
            (true, Some(text)) => Ok(text),
            _ => Err(GatewayError::Backend(
                self.error.unwrap_or_else(|| TRANSLATION_FAILED.to_string()),
            )),
        }
    }
}
