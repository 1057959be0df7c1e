//! Axum handler for `POST /tts`.

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use vocalis_core::{SynthesisFailure, SynthesisRequest, SynthesizedSpeech};

use crate::client::ClientAddr;
use crate::error::HttpError;
use crate::state::AppState;

/// Query parameters of `POST /tts`.
#[derive(Debug, Deserialize)]
pub struct TtsParams {
    pub text: String,
}

/// `POST /tts?text=...`
///
/// Streams the generated WAV back as an attachment.
pub async fn synthesize(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    params: Result<Query<TtsParams>, QueryRejection>,
) -> Result<Response, HttpError> {
    let Query(TtsParams { text }) = params.map_err(|e| HttpError::Validation(e.body_text()))?;

    let speech = state
        .speech
        .synthesize(SynthesisRequest::new(text, client))
        .await?;

    audio_response(&speech).await
}

async fn audio_response(speech: &SynthesizedSpeech) -> Result<Response, HttpError> {
    let path = speech.artifact.path();
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Generated file vanished before streaming");
        HttpError::from(SynthesisFailure::SynthesisIncomplete)
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        speech.download_name.replace('"', "")
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| HttpError::Internal(format!("invalid download name: {e}")))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(speech.artifact.media_type()),
        ),
        (header::CONTENT_DISPOSITION, disposition),
        (header::CONTENT_LENGTH, HeaderValue::from(speech.size_bytes)),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}
