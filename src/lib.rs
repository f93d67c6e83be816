//! Smoke-test harness for speech-to-text MCP servers.
//!
//! Launches the server under test as a subprocess and drives it through a
//! fixed JSON-RPC 2.0 conversation over newline-delimited stdio:
//! `initialize`, `tools/list`, `list_models`, `transcribe_audio`, `ping`.
//! The transcription engine itself lives in the server; this crate only
//! exercises the command interface and reports each round-trip.

pub mod audio;
pub mod client;
pub mod config;
pub mod protocol;
pub mod sequence;

pub mod schema;
