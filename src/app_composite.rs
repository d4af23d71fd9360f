use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::{
    config::Config,
    logger::{ConsoleLogger, SharedLogger, with_logger},
    pipeline::VoicePipeline,
    session::SessionStore,
    web::{self, AppState},
};

/// Everything the app needs, wired up from the config.
pub struct AppComposite {
    pub state: Arc<AppState>,
    pub logger: SharedLogger,
}

impl AppComposite {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let logger = ConsoleLogger::shared(config.log_level);
        Self::with_shared_logger(config, logger)
    }

    pub fn with_shared_logger(config: &Config, logger: SharedLogger) -> anyhow::Result<Self> {
        let pipeline = VoicePipeline::from_config(config, logger.clone())?;
        let state = Arc::new(AppState {
            pipeline,
            sessions: SessionStore::new(config.session_idle),
            logger: logger.clone(),
        });

        Ok(Self { state, logger })
    }

    pub fn router(&self) -> axum::Router {
        web::router(self.state.clone())
    }

    /// Serves the page until the process gets killed.
    pub async fn serve(self, config: &Config) -> anyhow::Result<()> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .context(format!("Could not bind to {}", config.bind_addr))?;
        with_logger(&self.logger, |l| {
            l.info(&format!("Talk to Mia at http://{}", config.bind_addr));
        });

        axum::serve(listener, self.router())
            .await
            .context("HTTP server stopped unexpectedly")
    }
}
