//! Per-request domain types.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::paths::ServicePaths;

/// Media type of every generated artifact.
pub const WAV_MEDIA_TYPE: &str = "audio/wav";

/// Filename offered to callers; unrelated to the storage name.
pub const DEFAULT_DOWNLOAD_NAME: &str = "speech.wav";

/// Identifies the caller of a request in logs. Never used for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Placeholder used when the transport exposes no peer address.
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<SocketAddr> for ClientId {
    fn from(addr: SocketAddr) -> Self {
        Self(addr.ip().to_string())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One inbound synthesis call.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Text to speak, passed to the engine untouched.
    pub text: String,
    /// Caller, for traceability.
    pub client: ClientId,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, client: ClientId) -> Self {
        Self {
            text: text.into(),
            client,
        }
    }
}

/// Storage slot for the audio of a single request.
///
/// The path embeds a freshly generated UUIDv4, so two artifacts never share
/// a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    id: Uuid,
    path: PathBuf,
}

impl OutputArtifact {
    /// Reserve a new unique path in the output directory. Nothing is written.
    pub fn allocate(paths: &ServicePaths) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            path: paths.output_path_for(&id),
        }
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn media_type(&self) -> &'static str {
        WAV_MEDIA_TYPE
    }
}

/// Successful result of a synthesis call.
#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    pub artifact: OutputArtifact,
    /// Size of the file on disk at verification time.
    pub size_bytes: u64,
    /// Name presented to the caller.
    pub download_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn client_id_from_socket_addr_uses_host_only() {
        let addr: SocketAddr = "172.17.0.1:51234".parse().unwrap();
        assert_eq!(ClientId::from(addr).as_str(), "172.17.0.1");
        assert_eq!(ClientId::unknown().to_string(), "unknown");
    }

    #[test]
    fn allocated_artifacts_never_collide() {
        let layout = ServicePaths::under("/srv/tts");
        let paths: HashSet<PathBuf> = (0..256)
            .map(|_| OutputArtifact::allocate(&layout).path().to_path_buf())
            .collect();
        assert_eq!(paths.len(), 256);
    }

    #[test]
    fn artifact_path_is_named_after_its_id() {
        let artifact = OutputArtifact::allocate(&ServicePaths::under("/srv/tts"));
        assert_eq!(
            artifact.path(),
            Path::new(&format!("/srv/tts/output_audios/{}.wav", artifact.id()))
        );
        assert_eq!(artifact.media_type(), "audio/wav");
    }
}
