//! Input validation. Pure functions, one per input mode.
//!
//! Each validator returns the normalized payload that should be sent.

use super::entities::{ALLOWED_UPLOAD_TYPES, MedicinePayload, SymptomsPayload, UploadPayload};
use super::errors::{Field, ValidationError};

/// Nothing to normalize in an upload; the accepted payload is handed back as-is.
pub fn validate_upload(payload: &UploadPayload) -> Result<&UploadPayload, ValidationError> {
    if payload.file.is_none() {
        return Err(ValidationError::MissingFile);
    }
    if !ALLOWED_UPLOAD_TYPES.contains(&payload.mime_type.as_str()) {
        return Err(ValidationError::InvalidFileType {
            mime_type: payload.mime_type.clone(),
        });
    }
    Ok(payload)
}

pub fn validate_symptoms(payload: &SymptomsPayload) -> Result<SymptomsPayload, ValidationError> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(SymptomsPayload {
        text: text.to_string(),
    })
}

/// Checks name, age, gender in form order, then the dosage.
pub fn validate_medicine(payload: &MedicinePayload) -> Result<MedicinePayload, ValidationError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField(Field::Name));
    }
    // age must be a positive integer
    if !payload.patient.age.is_some_and(|age| age > 0) {
        return Err(ValidationError::MissingField(Field::Age));
    }
    let gender = payload.patient.gender.trim();
    if gender.is_empty() {
        return Err(ValidationError::MissingField(Field::Gender));
    }
    if payload.dosage.is_all_zero() {
        return Err(ValidationError::AllDosagesZero);
    }

    let mut normalized = payload.clone();
    normalized.name = name.to_string();
    normalized.patient.gender = gender.to_string();
    Ok(normalized)
}
