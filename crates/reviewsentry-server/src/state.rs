//! Shared application state

use crate::config::ServerConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use reviewsentry_core::{Error, Result};
use reviewsentry_mailer::{SendGridMailer, SenderIdentity};
use reviewsentry_oracle::OpenAiOracle;
use reviewsentry_pipeline::Orchestrator;
use std::sync::Arc;

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded server configuration
    pub config: Arc<ServerConfig>,

    /// The classification-and-notification pipeline
    pub orchestrator: Arc<Orchestrator>,

    /// Handle for rendering Prometheus metrics
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Build the application state, validating credentials up front.
    ///
    /// Both API keys must be present and non-empty before the server starts
    /// accepting work; a missing credential is a startup failure, not a
    /// per-request one.
    pub fn new(
        config: ServerConfig,
        openai_api_key: &str,
        sendgrid_api_key: &str,
        metrics_handle: PrometheusHandle,
    ) -> Result<Self> {
        let oracle = OpenAiOracle::new(openai_api_key)?
            .with_models(&config.classify_model, &config.complete_model);

        let mailer = SendGridMailer::new(
            sendgrid_api_key,
            SenderIdentity {
                email: config.sender_email.clone(),
                name: config.sender_name.clone(),
            },
        )?;

        let orchestrator = Orchestrator::new(
            Arc::new(oracle),
            Arc::new(mailer),
            config.sender_name.clone(),
        );

        std::fs::create_dir_all(&config.upload_dir)
            .map_err(|e| Error::config(format!("cannot create upload dir: {}", e)))?;
        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| Error::config(format!("cannot create output dir: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            metrics_handle,
        })
    }
}
