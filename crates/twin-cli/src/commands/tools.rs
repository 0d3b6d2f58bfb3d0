//! `twin-mcp tools` command.

use clap::Args;

use twin_mcp::ToolRegistry;

use crate::output;

/// List the tools the server exposes.
#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Print the `tools/list` descriptors as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the tools command. No store is needed to describe the tools.
pub fn execute(args: &ToolsArgs) -> anyhow::Result<()> {
    let registry = ToolRegistry::builtin(None);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(registry.descriptors())?
        );
    } else {
        for tool in registry.descriptors() {
            println!("{}", output::tool_line(tool));
        }
    }
    Ok(())
}
