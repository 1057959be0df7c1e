//! Translation of parsed arguments into server configuration.

use std::time::Duration;

use anyhow::Result;
use vocalis_axum::{CorsConfig, ServerConfig};
use vocalis_core::{ServicePaths, SpeechServiceConfig};
use vocalis_runtime::CommandEngineOptions;

use crate::commands::{LayoutArgs, ServeArgs};

impl LayoutArgs {
    /// Resolve the service layout. Without `--root` the working directory is used.
    pub fn resolve(&self) -> Result<ServicePaths> {
        let mut paths = match &self.root {
            Some(root) => ServicePaths::under(root),
            None => ServicePaths::from_current_dir()?,
        };
        if let Some(dir) = &self.model_dir {
            paths = paths.with_model_dir(dir);
        }
        if let Some(config) = &self.config_path {
            paths = paths.with_config_path(config);
        }
        if let Some(voice) = &self.reference_voice {
            paths = paths.with_reference_voice(voice);
        }
        if let Some(dir) = &self.output_dir {
            paths = paths.with_output_dir(dir);
        }
        Ok(paths)
    }
}

impl ServeArgs {
    /// Build the Axum server configuration.
    pub fn into_server_config(self) -> Result<ServerConfig> {
        let paths = self.layout.resolve()?;

        let cors = if self.cors_origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(self.cors_origins)
        };

        Ok(ServerConfig {
            host: self.host,
            port: self.port,
            paths,
            engine: CommandEngineOptions {
                program: self.engine_program,
                launch_args: self.engine_launch_args,
                extra_args: self.engine_args,
            },
            speech: SpeechServiceConfig {
                max_concurrent_inferences: self.max_concurrent_inferences,
                inference_timeout: self.inference_timeout_secs.map(Duration::from_secs),
                redact_text: self.redact_text,
                ..SpeechServiceConfig::default()
            },
            cors,
        })
    }
}
