//! Synthesis engine backed by an external inference program.
//!
//! Every request spawns the program with the reference voice, output path and
//! model assets as arguments, writes the text to its stdin and waits for it to
//! exit. The text never travels through argv, so any string (NUL bytes and
//! newlines included) reaches the program byte for byte. Output is captured
//! and forwarded to tracing at debug level.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};
use vocalis_core::{EngineError, SynthesisEngine};

/// Program launched when none is configured.
pub const DEFAULT_ENGINE_PROGRAM: &str = "indextts";

/// Lines of stderr attached to an inference error.
const STDERR_TAIL_LINES: usize = 5;

/// How to launch the inference program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEngineOptions {
    /// Executable name (looked up on `PATH`) or path.
    pub program: String,
    /// Arguments placed before the engine arguments, e.g. `-m indextts.cli`
    /// when `program` is an interpreter.
    pub launch_args: Vec<String>,
    /// Arguments appended after the engine arguments.
    pub extra_args: Vec<String>,
}

impl Default for CommandEngineOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_ENGINE_PROGRAM.to_string(),
            launch_args: Vec::new(),
            extra_args: Vec::new(),
        }
    }
}

/// A loaded engine: resolved program plus validated model assets.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    launch_args: Vec<String>,
    extra_args: Vec<String>,
    model_dir: PathBuf,
    config_path: PathBuf,
}

impl CommandEngine {
    /// Resolve the program and validate the model assets.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Load`] if the program cannot be found or the
    /// model directory or config file is missing.
    pub fn construct(
        model_dir: &Path,
        config_path: &Path,
        options: &CommandEngineOptions,
    ) -> Result<Self, EngineError> {
        let program = which::which(&options.program).map_err(|e| {
            EngineError::Load(format!(
                "engine program '{}' not found: {e}",
                options.program
            ))
        })?;

        if !model_dir.is_dir() {
            return Err(EngineError::Load(format!(
                "model directory is not a directory: {}",
                model_dir.display()
            )));
        }
        if !config_path.is_file() {
            return Err(EngineError::Load(format!(
                "engine config is not a file: {}",
                config_path.display()
            )));
        }

        debug!(
            program = %program.display(),
            model_dir = %model_dir.display(),
            "Resolved engine program"
        );

        Ok(Self {
            program,
            launch_args: options.launch_args.clone(),
            extra_args: options.extra_args.clone(),
            model_dir: model_dir.to_path_buf(),
            config_path: config_path.to_path_buf(),
        })
    }

    /// Loader suitable for `ServiceState::initialize`.
    pub fn loader(
        options: CommandEngineOptions,
    ) -> impl FnOnce(&Path, &Path) -> Result<Arc<dyn SynthesisEngine>, EngineError> {
        move |model_dir, config_path| {
            let engine = Self::construct(model_dir, config_path, &options)?;
            Ok(Arc::new(engine) as Arc<dyn SynthesisEngine>)
        }
    }

    fn build_command(&self, reference_voice: &Path, output_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.launch_args)
            .arg("--voice")
            .arg(reference_voice)
            .arg("--output_path")
            .arg(output_path)
            .arg("--model_dir")
            .arg(&self.model_dir)
            .arg("--config")
            .arg(&self.config_path)
            .args(&self.extra_args);

        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl SynthesisEngine for CommandEngine {
    async fn infer(
        &self,
        reference_voice: &Path,
        text: &str,
        output_path: &Path,
    ) -> Result<(), EngineError> {
        let mut child = self
            .build_command(reference_voice, output_path)
            .spawn()
            .map_err(|e| {
                EngineError::Spawn(format!(
                    "failed to spawn {}: {e}",
                    self.program.display()
                ))
            })?;

        // Feed stdin while draining stdout/stderr so neither side can block
        // the other. Dropping the handle closes the pipe.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(text.as_bytes()).await?;
            }
            Ok::<(), std::io::Error>(())
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines() {
            debug!(stream = "stdout", "{}", line);
        }
        for line in stderr.lines() {
            debug!(stream = "stderr", "{}", line);
        }

        if output.status.success() {
            return match fed {
                // Exiting without reading stdin is fine.
                Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(EngineError::Inference(
                    format!("failed to write text to engine stdin: {e}"),
                )),
                _ => Ok(()),
            };
        }

        warn!(status = %output.status, "Engine process exited unsuccessfully");
        let mut message = format!("engine exited with {}", output.status);
        let tail = tail_lines(&stderr, STDERR_TAIL_LINES);
        if !tail.is_empty() {
            let _ = write!(message, ": {tail}");
        }
        Err(EngineError::Inference(message))
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Last `n` non-blank lines of `text`, joined with ` | `.
fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join(" | ")
}
