//! Serve command handler.

use anyhow::Result;
use tracing::info;

use crate::commands::ServeArgs;

/// Execute the serve command.
///
/// Blocks until the server shuts down. Engine load failures do not end up
/// here; they leave the server running in the unavailable state.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = args.into_server_config()?;

    info!(
        host = %config.host,
        port = config.port,
        engine_program = %config.engine.program,
        max_concurrent_inferences = config.speech.max_concurrent_inferences,
        inference_timeout_secs = config.speech.inference_timeout.map(|t| t.as_secs()),
        "Starting vocalis TTS server"
    );

    vocalis_axum::start_server(config).await
}
