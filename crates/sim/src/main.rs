//! Replays occurrence scripts through the statistic router.
//!
//! Run with: `stattrak-sim <script.json>`
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use runtime::{EventRouter, RuntimeConfig};
use script::Script;

/// Replay occurrence scripts against in-memory items
#[derive(Parser)]
#[command(name = "stattrak-sim")]
#[command(about = "Replay occurrence scripts against in-memory items", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON script with item slots and occurrences
    script: PathBuf,

    /// Print the final items as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RuntimeConfig::from_env_strict()?;
    let router = EventRouter::new(config)?;

    let mut script = Script::load(&cli.script)?;
    script.replay(&router)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&script.items)?);
    } else {
        for (slot, item) in &script.items {
            println!("[{}] {}", slot, item.material);
            match &item.lore {
                Some(lines) => lines.iter().for_each(|line| println!("    {}", line)),
                None => println!("    (no metadata)"),
            }
        }
    }

    let metrics = router.metrics().snapshot();
    tracing::info!(
        routed = metrics.routed,
        duplicates = metrics.duplicates,
        ignored = metrics.ignored,
        objects_updated = metrics.objects_updated,
        "Replay finished"
    );

    Ok(())
}
