//! Resolved service layout.

use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use super::error::PathError;

/// Checkpoint directory holding the pre-trained model.
pub const DEFAULT_MODEL_DIR: &str = "checkpoints";

/// Model configuration file passed to the engine alongside the checkpoints.
pub const DEFAULT_CONFIG_FILE: &str = "checkpoints/config.yaml";

/// Reference voice sample used for every request.
pub const DEFAULT_REFERENCE_VOICE: &str = "input.wav";

/// Directory receiving one generated WAV per request.
pub const DEFAULT_OUTPUT_DIR: &str = "output_audios";

/// Absolute locations of every file the service reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePaths {
    /// Directory that relative paths are resolved against.
    pub root: PathBuf,
    /// Model checkpoint directory.
    pub model_dir: PathBuf,
    /// Model configuration file.
    pub config_path: PathBuf,
    /// Reference voice sample.
    pub reference_voice: PathBuf,
    /// Output directory for generated audio.
    pub output_dir: PathBuf,
}

/// Existence report for one entry of the layout, used by diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStatus {
    pub label: &'static str,
    pub path: PathBuf,
    pub exists: bool,
}

impl ServicePaths {
    /// Default layout rooted at `root`.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            model_dir: root.join(DEFAULT_MODEL_DIR),
            config_path: root.join(DEFAULT_CONFIG_FILE),
            reference_voice: root.join(DEFAULT_REFERENCE_VOICE),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            root,
        }
    }

    /// Default layout rooted at the process working directory.
    pub fn from_current_dir() -> Result<Self, PathError> {
        let cwd = std::env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
        Ok(Self::under(cwd))
    }

    #[must_use]
    pub fn with_model_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.model_dir = self.resolve(path.as_ref());
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = self.resolve(path.as_ref());
        self
    }

    #[must_use]
    pub fn with_reference_voice(mut self, path: impl AsRef<Path>) -> Self {
        self.reference_voice = self.resolve(path.as_ref());
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = self.resolve(path.as_ref());
        self
    }

    /// Storage path of the artifact identified by `id`.
    pub fn output_path_for(&self, id: &Uuid) -> PathBuf {
        self.output_dir.join(format!("{id}.wav"))
    }

    /// Whether both startup prerequisites of the engine are present.
    pub fn model_assets_present(&self) -> bool {
        self.model_dir.exists() && self.config_path.exists()
    }

    /// Snapshot of which layout entries currently exist.
    pub fn status(&self) -> Vec<PathStatus> {
        [
            ("model directory", &self.model_dir),
            ("model config", &self.config_path),
            ("reference voice", &self.reference_voice),
            ("output directory", &self.output_dir),
        ]
        .into_iter()
        .map(|(label, path)| PathStatus {
            label,
            path: path.clone(),
            exists: path.exists(),
        })
        .collect()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_well_known_names() {
        let paths = ServicePaths::under("/srv/tts");

        assert_eq!(paths.model_dir, PathBuf::from("/srv/tts/checkpoints"));
        assert_eq!(
            paths.config_path,
            PathBuf::from("/srv/tts/checkpoints/config.yaml")
        );
        assert_eq!(paths.reference_voice, PathBuf::from("/srv/tts/input.wav"));
        assert_eq!(paths.output_dir, PathBuf::from("/srv/tts/output_audios"));
    }

    #[test]
    fn relative_overrides_resolve_against_root() {
        let paths = ServicePaths::under("/srv/tts")
            .with_reference_voice("voices/narrator.wav")
            .with_output_dir("/var/tmp/out");

        assert_eq!(
            paths.reference_voice,
            PathBuf::from("/srv/tts/voices/narrator.wav")
        );
        assert_eq!(paths.output_dir, PathBuf::from("/var/tmp/out"));
    }

    #[test]
    fn output_paths_are_uuid_named_wavs() {
        let paths = ServicePaths::under("/srv/tts");
        let id = Uuid::new_v4();

        let path = paths.output_path_for(&id);

        assert_eq!(path.parent(), Some(paths.output_dir.as_path()));
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("{id}.wav"));
    }

    #[test]
    fn model_assets_require_both_dir_and_config() {
        let root = tempfile::tempdir().unwrap();
        let paths = ServicePaths::under(root.path());
        assert!(!paths.model_assets_present());

        std::fs::create_dir_all(&paths.model_dir).unwrap();
        assert!(!paths.model_assets_present());

        std::fs::write(&paths.config_path, "gpt: {}\n").unwrap();
        assert!(paths.model_assets_present());
    }

    #[test]
    fn status_reports_every_entry() {
        let root = tempfile::tempdir().unwrap();
        let paths = ServicePaths::under(root.path());
        std::fs::write(&paths.reference_voice, b"RIFF").unwrap();

        let status = paths.status();

        assert_eq!(status.len(), 4);
        let reference = status
            .iter()
            .find(|s| s.label == "reference voice")
            .unwrap();
        assert!(reference.exists);
        assert!(status.iter().filter(|s| s.exists).count() == 1);
    }
}
