//! Backend adapter module. Implements AnalysisGateway.
//!
//! Provides the HTTP adapter and a mock adapter for offline runs and tests.

pub mod http_adapter;
pub mod mock_adapter;
pub mod wire;

pub use http_adapter::HttpGateway;
pub use mock_adapter::MockGateway;
