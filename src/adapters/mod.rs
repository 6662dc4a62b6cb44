//! Infrastructure adapters. Implement ports.
//!
//! Analysis backend (HTTP and mock) and the terminal front end. Map errors to DomainError.

pub mod backend;
pub mod ui;
