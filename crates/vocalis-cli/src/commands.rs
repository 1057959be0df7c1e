//! Subcommand definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use vocalis_runtime::DEFAULT_ENGINE_PROGRAM;

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP TTS server
    Serve(ServeArgs),

    /// Show the resolved filesystem layout and whether each path exists
    Paths(PathsArgs),
}

/// Filesystem layout overrides shared by `serve` and `paths`.
#[derive(Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Service root; relative paths below resolve against it [default: current directory]
    #[arg(long, env = "VOCALIS_ROOT")]
    pub root: Option<PathBuf>,

    /// Model checkpoint directory [default: checkpoints]
    #[arg(long, env = "VOCALIS_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Engine configuration file [default: checkpoints/config.yaml]
    #[arg(long, env = "VOCALIS_CONFIG_PATH")]
    pub config_path: Option<PathBuf>,

    /// Reference voice sample [default: input.wav]
    #[arg(long, env = "VOCALIS_REFERENCE_VOICE")]
    pub reference_voice: Option<PathBuf>,

    /// Directory receiving generated audio [default: output_audios]
    #[arg(long, env = "VOCALIS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Options for `vocalis paths`.
#[derive(Args, Debug, Clone, Default)]
pub struct PathsArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Print the layout as JSON instead of `label = path` lines
    #[arg(long)]
    pub json: bool,
}

/// Options for `vocalis serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Host to bind to
    #[arg(long, env = "VOCALIS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "VOCALIS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Inference program, looked up on PATH unless given as a path
    #[arg(long, env = "VOCALIS_ENGINE_PROGRAM", default_value = DEFAULT_ENGINE_PROGRAM)]
    pub engine_program: String,

    /// Argument placed before the engine arguments (repeatable)
    #[arg(long = "engine-launch-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub engine_launch_args: Vec<String>,

    /// Argument appended after the engine arguments (repeatable)
    #[arg(long = "engine-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Engine calls allowed to run at the same time
    #[arg(
        long,
        env = "VOCALIS_MAX_CONCURRENT_INFERENCES",
        default_value_t = 1,
        value_parser = parse_positive
    )]
    pub max_concurrent_inferences: usize,

    /// Abort an engine call after this many seconds
    #[arg(long, env = "VOCALIS_INFERENCE_TIMEOUT_SECS", value_parser = parse_positive_u64)]
    pub inference_timeout_secs: Option<u64>,

    /// Log the length of request text instead of the text itself
    #[arg(long, env = "VOCALIS_REDACT_TEXT")]
    pub redact_text: bool,

    /// Allowed CORS origin (repeatable); all origins are allowed when omitted
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_positive_u64(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
