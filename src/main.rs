//! Wiring & DI. Entry point: bootstrap adapters, inject into the service, run UI.
//! No business logic here.

use dotenv::dotenv;
use medscan_client::adapters::backend::{HttpGateway, MockGateway};
use medscan_client::adapters::ui::renderer::TerminalRenderer;
use medscan_client::adapters::ui::tui::TuiInputPort;
use medscan_client::ports::{AnalysisGateway, InputPort, RenderPort};
use medscan_client::shared::config::AppConfig;
use medscan_client::usecases::AnalysisService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// All work happens on one thread; requests interleave at their await points.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    // logs go to stderr and default to warn so they do not interleave with prompts
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    let gateway: Arc<dyn AnalysisGateway> = if cfg.is_mock() {
        warn!("MEDSCAN_MOCK is set, using mock backend");
        Arc::new(MockGateway::with_delay(cfg.mock_delay_ms_or_default()))
    } else {
        let url = cfg.backend_url_or_default();
        info!(
            url = %url,
            timeout_secs = cfg.request_timeout().as_secs(),
            "using HTTP backend"
        );
        Arc::new(
            HttpGateway::new(url, cfg.request_timeout())
                .map_err(|e| anyhow::anyhow!("HTTP client init failed: {}", e))?,
        )
    };

    medscan_client::adapters::ui::init_ui();

    let renderer: Arc<dyn RenderPort> = Arc::new(TerminalRenderer::new());
    let service = Arc::new(AnalysisService::new(gateway, renderer));
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(service));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
