use serde::Serialize;
use tracing::info;

use crate::audio;
use crate::client::{ClientError, McpClient};
use crate::config::{CaptureMode, HarnessConfig};
use crate::protocol::{
    ClientCapabilities, ClientInfo, InitializeParams, ToolCallParams, ToolsCapability,
    TranscribeArgs,
};

/// MCP protocol revision the harness negotiates.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// One completed round-trip.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub id: i64,
    /// False when the server answered with a JSON-RPC error or an `isError`
    /// tool result. Either is still a completed round-trip.
    pub ok: bool,
    pub response: serde_json::Value,
}

/// Drive the fixed conversation, strictly serial, one request in flight.
///
/// Order: `initialize` → `tools/list` → `list_models` → `transcribe_audio` →
/// `ping`. A step that produces no response aborts the remainder; the caller
/// still runs shutdown. No step is ever retried.
pub async fn run(
    client: &mut McpClient,
    config: &HarnessConfig,
) -> Result<Vec<StepReport>, ClientError> {
    let mut reports = Vec::with_capacity(5);

    reports.push(step(client, "initialize", "initialize", Some(initialize_params())).await?);
    reports.push(step(client, "tools/list", "tools/list", None).await?);
    reports.push(
        step(
            client,
            "list_models",
            "tools/call",
            Some(tool_call(ToolCallParams {
                name: "list_models".into(),
                arguments: None,
            })),
        )
        .await?,
    );
    reports.push(
        step(
            client,
            "transcribe_audio",
            "tools/call",
            Some(tool_call(transcribe_call(config))),
        )
        .await?,
    );
    reports.push(step(client, "ping", "ping", None).await?);

    Ok(reports)
}

async fn step(
    client: &mut McpClient,
    label: &'static str,
    method: &str,
    params: Option<serde_json::Value>,
) -> Result<StepReport, ClientError> {
    let id = client.next_request_id();
    let response = client.call(method, params).await?;

    let tool_error = response.tool_result().is_some_and(|t| t.is_error);
    let ok = response.is_success() && !tool_error;
    info!(step = label, id, ok, "round-trip complete");

    let response = serde_json::to_value(&response).map_err(std::io::Error::other)?;
    Ok(StepReport {
        step: label,
        id,
        ok,
        response,
    })
}

fn initialize_params() -> serde_json::Value {
    let params = InitializeParams {
        protocol_version: PROTOCOL_VERSION.into(),
        capabilities: ClientCapabilities {
            tools: ToolsCapability {},
        },
        client_info: ClientInfo {
            name: env!("CARGO_PKG_NAME").into(),
            version: env!("CARGO_PKG_VERSION").into(),
        },
    };
    serde_json::to_value(params).expect("initialize params must serialize")
}

fn tool_call(params: ToolCallParams) -> serde_json::Value {
    serde_json::to_value(params).expect("tool call params must serialize")
}

fn transcribe_call(config: &HarnessConfig) -> ToolCallParams {
    let arguments = match config.capture {
        CaptureMode::Fixture => {
            let args = TranscribeArgs {
                audio: audio::encode(&audio::fixture()),
                model: config.model.clone(),
                vad_enabled: config.vad_enabled(),
                vad_threshold: config.vad_threshold,
                vad_silence_delay: config.vad_silence_delay,
            };
            Some(serde_json::to_value(args).expect("transcribe args must serialize"))
        }
        // No arguments at all: the server captures from its own microphone.
        CaptureMode::Mic => None,
    };

    ToolCallParams {
        name: "transcribe_audio".into(),
        arguments,
    }
}
