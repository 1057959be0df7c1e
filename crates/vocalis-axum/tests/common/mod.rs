//! Shared fixtures for vocalis-axum integration tests.
//!
//! Every test gets its own temp root laid out like a deployment:
//! `checkpoints/`, `checkpoints/config.yaml` and `input.wav`. The output
//! directory is left for `bootstrap` to create.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use tempfile::TempDir;
use vocalis_axum::{AxumContext, CorsConfig, ServerConfig, bootstrap_with_loader, create_router};
use vocalis_core::{EngineError, ServicePaths, SynthesisEngine};

/// Bytes every fake engine starts its output with.
pub const FAKE_WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

/// Peer address injected in place of a real socket.
pub const TEST_PEER: ([u8; 4], u16) = ([10, 0, 0, 7], 40_123);

pub struct Sandbox {
    root: TempDir,
    pub paths: ServicePaths,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let paths = ServicePaths::under(root.path());
        std::fs::create_dir_all(&paths.model_dir).unwrap();
        std::fs::write(&paths.config_path, "dataset: {}\n").unwrap();
        std::fs::write(&paths.reference_voice, FAKE_WAV).unwrap();
        Self { root, paths }
    }

    pub fn without_reference(self) -> Self {
        std::fs::remove_file(&self.paths.reference_voice).unwrap();
        self
    }

    pub fn without_model(self) -> Self {
        std::fs::remove_dir_all(&self.paths.model_dir).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config(&self) -> ServerConfig {
        let mut config = ServerConfig::with_paths(self.paths.clone());
        config.port = 0;
        config
    }

    /// Router over a service whose engine is `engine`.
    pub fn app(&self, engine: impl SynthesisEngine + 'static) -> Router {
        self.app_with(&self.config(), engine)
    }

    pub fn app_with(&self, config: &ServerConfig, engine: impl SynthesisEngine + 'static) -> Router {
        let ctx = bootstrap_with_loader(config, move |_, _| {
            Ok(Arc::new(engine) as Arc<dyn SynthesisEngine>)
        });
        router(ctx, &config.cors)
    }

    /// Files currently in the output directory.
    pub fn output_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(&self.paths.output_dir) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries.map(|e| e.unwrap().path()).collect();
        files.sort();
        files
    }
}

pub fn router(ctx: AxumContext, cors: &CorsConfig) -> Router {
    create_router(ctx, cors).layer(MockConnectInfo(SocketAddr::from(TEST_PEER)))
}

pub fn post_tts(query: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/tts{query}"))
        .body(Body::empty())
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"))
}

/// Writes `FAKE_WAV` followed by the request text.
pub struct WritingEngine;

#[async_trait]
impl SynthesisEngine for WritingEngine {
    async fn infer(&self, _voice: &Path, text: &str, output: &Path) -> Result<(), EngineError> {
        let mut audio = FAKE_WAV.to_vec();
        audio.extend_from_slice(text.as_bytes());
        tokio::fs::write(output, audio).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "writing"
    }
}

/// Fails every call after leaving a partial file behind.
pub struct FailingEngine(pub &'static str);

#[async_trait]
impl SynthesisEngine for FailingEngine {
    async fn infer(&self, _voice: &Path, _text: &str, output: &Path) -> Result<(), EngineError> {
        tokio::fs::write(output, b"RIFF").await?;
        Err(EngineError::Inference(self.0.to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Reports success without writing anything.
pub struct SilentEngine;

#[async_trait]
impl SynthesisEngine for SilentEngine {
    async fn infer(&self, _voice: &Path, _text: &str, _output: &Path) -> Result<(), EngineError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}
