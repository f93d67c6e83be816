pub mod request;
pub mod response;

pub use request::{
    ClientCapabilities, ClientInfo, InitializeParams, JsonRpcRequest, RpcId, ToolCallParams,
    ToolsCapability, TranscribeArgs,
};
pub use response::{JsonRpcError, JsonRpcResponse, ToolResult, ToolResultContent};
