use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 ID — may be a number or string per spec.
///
/// The harness always assigns numbers; servers echo whatever they received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope, serialized as one line on the server's stdin.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RpcId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    pub fn new(id: i64, method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id: RpcId::Number(id),
            method: method.into(),
            params,
        }
    }
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Serialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    #[serde(rename = "clientInfo")]
    pub client_info: ClientInfo,
}

/// Capabilities declared during `initialize`. The harness only speaks tools.
#[derive(Debug, Clone, Serialize)]
pub struct ClientCapabilities {
    pub tools: ToolsCapability,
}

/// Serializes to the empty object the handshake expects.
#[derive(Debug, Clone, Serialize)]
pub struct ToolsCapability {}

/// Client identification sent during `initialize`.
#[derive(Debug, Clone, Serialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Parameters for `tools/call`.
///
/// `arguments` is omitted entirely for tools invoked bare — `list_models`,
/// and `transcribe_audio` in microphone-capture mode.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

/// Arguments for the `transcribe_audio` tool when audio is supplied inline.
#[derive(Debug, Clone, Serialize)]
pub struct TranscribeArgs {
    /// Base64-encoded 16 kHz mono 16-bit PCM.
    pub audio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub vad_enabled: bool,
    pub vad_threshold: f64,
    /// Seconds of silence before the server finalizes the transcript.
    pub vad_silence_delay: f64,
}
