//! Core domain layer. No external I/O dependencies.
//!
//! Entities, validation, the request lifecycle and its render projection.
//! Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod lifecycle;
pub mod mode;
pub mod render;
pub mod session;
pub mod validation;

pub use entities::{
    ALLOWED_UPLOAD_TYPES, AnalysisResult, DisplayLanguage, Dosage, InputMode, MedicinePayload,
    Patient, SubmissionKind, SymptomsPayload, UploadPayload,
};
pub use errors::{DomainError, Field, GatewayError, SessionError, ValidationError};
pub use lifecycle::{Completion, LifecycleState, RequestLifecycle, Ticket};
pub use mode::InputModeController;
pub use render::{ButtonHint, Region, RenderHints, TabHint, project};
pub use session::AnalysisSession;
