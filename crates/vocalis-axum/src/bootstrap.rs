//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the engine adapter, service state and
//! speech service are wired together for the web adapter.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use vocalis_core::{
    EngineError, ServicePaths, ServiceState, SpeechService, SpeechServiceConfig, SynthesisEngine,
    ensure_output_dir,
};
use vocalis_runtime::{CommandEngine, CommandEngineOptions};

/// Default listen address, matching the container deployment.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server. `0` picks a free port.
    pub port: u16,
    /// Filesystem layout: model assets, reference voice, output directory.
    pub paths: ServicePaths,
    /// How the inference program is launched.
    pub engine: CommandEngineOptions,
    /// Per-request tunables.
    pub speech: SpeechServiceConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths relative to the working directory.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::with_paths(ServicePaths::from_current_dir()?))
    }

    /// Default settings over an explicit layout.
    pub fn with_paths(paths: ServicePaths) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            paths,
            engine: CommandEngineOptions::default(),
            speech: SpeechServiceConfig::default(),
            cors: CorsConfig::default(),
        }
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Per-request orchestration over the engine loaded at startup.
    pub speech: Arc<SpeechService>,
}

/// Bootstrap the service with the command-line engine from `config.engine`.
pub fn bootstrap(config: &ServerConfig) -> AxumContext {
    bootstrap_with_loader(config, CommandEngine::loader(config.engine.clone()))
}

/// Bootstrap the service with an arbitrary engine loader.
///
/// Never fails: an unusable output directory or a failed engine load leaves
/// the service in the failed state, which `/tts` reports as 503.
pub fn bootstrap_with_loader<F>(config: &ServerConfig, load: F) -> AxumContext
where
    F: FnOnce(&Path, &Path) -> Result<Arc<dyn SynthesisEngine>, EngineError>,
{
    let paths = &config.paths;
    info!(
        target: "vocalis.paths",
        root = %paths.root.display(),
        model_dir = %paths.model_dir.display(),
        config_path = %paths.config_path.display(),
        reference_voice = %paths.reference_voice.display(),
        output_dir = %paths.output_dir.display(),
        "Axum bootstrap resolved paths"
    );

    let state = match ensure_output_dir(&paths.output_dir) {
        Ok(()) => ServiceState::initialize(paths, load),
        Err(e) => {
            error!(error = %e, "Output directory unavailable, synthesis disabled");
            ServiceState::failed(format!("Output directory unavailable: {e}"))
        }
    };

    let speech = SpeechService::new(Arc::new(state), paths.clone(), config.speech.clone());
    AxumContext {
        speech: Arc::new(speech),
    }
}

/// Start the web server and serve until Ctrl+C or SIGTERM.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config);
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("vocalis TTS server listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}
