use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Default bounded wait for server exit after shutdown is requested (5 seconds).
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Default cap on non-JSON diagnostic lines skipped per receive.
pub const DEFAULT_LOG_SKIP_LIMIT: usize = 64;

/// Where the audio for `transcribe_audio` comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaptureMode {
    /// Send one second of synthesized silent PCM as the request payload.
    Fixture,
    /// Send no audio argument; the server captures from its own microphone.
    Mic,
}

/// Harness configuration, parsed from the command line and environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "mcp-stt-harness", version, about)]
pub struct HarnessConfig {
    /// Path to the speech-to-text server executable under test.
    #[arg(long, env = "STT_MCP_SERVER")]
    pub server: PathBuf,

    /// Operating-mode flag passed to the server as `--mode <MODE>`.
    #[arg(long, default_value = "mcp")]
    pub mode: String,

    /// Audio source for the transcription step.
    #[arg(long, value_enum, default_value_t = CaptureMode::Fixture)]
    pub capture: CaptureMode,

    /// Model name override for `transcribe_audio` (server default if unset).
    #[arg(long)]
    pub model: Option<String>,

    /// Disable voice-activity detection in the transcription request.
    #[arg(long)]
    pub no_vad: bool,

    /// VAD energy threshold.
    #[arg(long, default_value_t = 0.01)]
    pub vad_threshold: f64,

    /// Seconds of silence before the server finalizes the transcript.
    #[arg(long, default_value_t = 2.0)]
    pub vad_silence_delay: f64,

    /// Seconds to wait for server exit after requesting shutdown.
    #[arg(long, default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    pub shutdown_timeout_secs: u64,

    /// Maximum non-JSON log lines tolerated on stdout before a response.
    #[arg(long, default_value_t = DEFAULT_LOG_SKIP_LIMIT)]
    pub log_skip_limit: usize,
}

impl HarnessConfig {
    /// Arguments the server is launched with.
    pub fn server_args(&self) -> Vec<String> {
        vec!["--mode".into(), self.mode.clone()]
    }

    pub fn vad_enabled(&self) -> bool {
        !self.no_vad
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
