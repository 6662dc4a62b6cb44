//! medscan-client: medical analysis client with Hexagonal Architecture.
//!
//! Submits a scanned report, a symptom description or medicine/dosage data to
//! an analysis backend, tracks each request through its lifecycle and caches
//! the on-demand Bangla translation of the result.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
