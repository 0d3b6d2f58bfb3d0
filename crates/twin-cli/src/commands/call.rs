//! `twin-mcp call` command.
//!
//! Runs one `tools/call` through the same dispatcher the servers use.

use clap::Args;

use twin_config::TwinConfig;
use twin_mcp::JsonRpcOutput;
use twin_protocol::mcp::tools::ToolsCallParams;
use twin_protocol::{JsonRpcRequest, RequestId};

use crate::{input, output, shared};

/// Call one tool in-process.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name, e.g. `add_numbers`.
    pub tool: String,
    /// Tool arguments as a JSON object.
    #[arg(short, long, default_value = "{}")]
    pub args: String,
    /// Read the arguments from a file (use "-" for stdin).
    #[arg(short = 'f', long)]
    pub args_file: Option<String>,
}

/// Executes the call command.
pub async fn execute(args: &CallArgs, config: &TwinConfig) -> anyhow::Result<()> {
    let arguments = input::resolve_arguments(&args.args, args.args_file.as_deref())?;
    let handler = shared::build_handler(config).await;

    let params = ToolsCallParams {
        name: args.tool.clone(),
        arguments,
    };
    let request = JsonRpcRequest::new(
        RequestId::from(1),
        "tools/call",
        Some(serde_json::to_value(params)?),
    );
    tracing::debug!(tool = %args.tool, "calling tool");

    match handler
        .dispatch_within(&request, config.server.request_timeout())
        .await
    {
        JsonRpcOutput::Success(response) => {
            for item in response.result["content"].as_array().into_iter().flatten() {
                if let Some(text) = item["text"].as_str() {
                    println!("{text}");
                }
            }
            Ok(())
        }
        JsonRpcOutput::Error(response) => {
            output::print_error(&response.error.message);
            anyhow::bail!("tool call failed with code {}", response.error.code)
        }
    }
}
