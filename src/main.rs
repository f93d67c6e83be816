use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcp_stt_harness::client::{ClientError, McpClient};
use mcp_stt_harness::config::HarnessConfig;
use mcp_stt_harness::sequence;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HarnessConfig::parse();
    if let Err(e) = run(&config).await {
        tracing::error!("mcp-stt-harness: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &HarnessConfig) -> Result<(), ClientError> {
    let mut client = McpClient::spawn(config)?;

    // Shutdown runs regardless of how the sequence ended; the subprocess is
    // never leaked past this function.
    let outcome = sequence::run(&mut client, config).await;
    let shutdown = client.shutdown().await;

    let reports = outcome?;
    for report in &reports {
        let rendered =
            serde_json::to_string_pretty(&report.response).map_err(std::io::Error::other)?;
        let status = if report.ok { "ok" } else { "error" };
        println!("[{}] {} (id {}):\n{}", status, report.step, report.id, rendered);
    }

    shutdown
}
