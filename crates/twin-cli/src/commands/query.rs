//! `twin-mcp query` command.

use clap::Args;

use twin_config::TwinConfig;

use crate::{output, shared};

/// List stored Twin records.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Only show records in this country.
    #[arg(long)]
    pub country: Option<String>,
    /// Print records as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the query command. Records are printed oldest first.
pub async fn execute(args: &QueryArgs, config: &TwinConfig) -> anyhow::Result<()> {
    let Some(store) = shared::open_store(&config.store).await else {
        anyhow::bail!("Cosmos DB not available. Please check configuration.");
    };

    let mut records = store
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("query failed: {e}"))?;
    if let Some(country) = &args.country {
        records.retain(|r| &r.country_id == country);
    }
    records.sort_by_key(|r| r.created_at);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("No Twin records found.");
    }
    for record in &records {
        println!("{}", output::record_line(record));
    }
    tracing::debug!(count = records.len(), "query complete");
    Ok(())
}
