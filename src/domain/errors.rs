//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Display strings are what the
//! user sees in the error region.

use thiserror::Error;

/// Medicine form fields that can be left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Gender,
}

/// Rejected input. Raised before any network call; fixed by correcting input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a file to upload")]
    MissingFile,

    #[error("Please upload a JPG or PDF file")]
    InvalidFileType { mime_type: String },

    #[error("Please describe your symptoms")]
    EmptyInput,

    #[error("{}", .0.prompt())]
    MissingField(Field),

    #[error("Please enter at least one dosage value")]
    AllDosagesZero,
}

impl Field {
    /// Message shown when the field is left blank.
    pub fn prompt(&self) -> &'static str {
        match self {
            Field::Name => "Please enter a medicine name",
            Field::Age => "Please enter patient age",
            Field::Gender => "Please select patient gender",
        }
    }
}

/// Failure reported by the request gateway. Both kinds are recoverable by retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Network failure, timeout, non-2xx status, malformed body.
    #[error("{0}")]
    Transport(String),

    /// The backend answered and reported an `error`.
    #[error("{0}")]
    Backend(String),
}

/// Session operations rejected because of the current state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("No content to translate")]
    NoActiveAnalysis,

    #[error("Translation is not available yet")]
    TranslationUnavailable,

    #[error("A translation is already in progress")]
    TranslationInProgress,

    #[error("This result is already translated")]
    AlreadyTranslated,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Prompt or terminal failure in a front end.
    #[error("Terminal error: {0}")]
    Ui(String),
}
