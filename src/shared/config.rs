//! Application configuration. Backend location, timeouts, mock mode.

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Analysis runs an LLM on the backend; allow it plenty of time.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_MOCK_DELAY_MS: u64 = 300;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Base URL of the analysis backend. Read from MEDSCAN_BACKEND_URL.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Per-request timeout in seconds. Read from MEDSCAN_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Use the mock backend instead of HTTP. Read from MEDSCAN_MOCK.
    #[serde(default)]
    pub mock: Option<bool>,

    /// Simulated latency of the mock backend. Read from MEDSCAN_MOCK_DELAY_MS.
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,
}

impl AppConfig {
    /// Load from `MEDSCAN_*` env vars (after `.env`), plus the file named by
    /// MEDSCAN_CONFIG if set. File values lose to env values.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("MEDSCAN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("MEDSCAN").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn backend_url_or_default(&self) -> String {
        self.backend_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn is_mock(&self) -> bool {
        self.mock.unwrap_or(false)
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(DEFAULT_MOCK_DELAY_MS)
    }
}
