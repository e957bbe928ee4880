use analytics::{payload_outcome, success_distribution, AnalyticsContext};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dataset::DEFAULT_DATASET_URL;
use shared::domain::{PayloadRange, SiteSelector};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// CSV location: an http(s) URL or a local path.
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    dataset: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List distinct launch sites and the payload bounds.
    Sites,
    /// Print the success pie data for a site (or ALL).
    Pie {
        #[arg(long, default_value = "ALL")]
        site: String,
    },
    /// Print the payload/outcome scatter data.
    Scatter {
        #[arg(long, default_value = "ALL")]
        site: String,
        #[arg(long, default_value_t = 0.0)]
        low: f64,
        #[arg(long, default_value_t = 10000.0)]
        high: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = dataset::source_from_str(&cli.dataset);
    let loaded = dataset::load(source.as_ref()).await?;
    let ctx = AnalyticsContext::new(loaded.table);

    let output = match cli.command {
        Command::Sites => serde_json::json!({
            "sites": ctx.table.distinct_sites(),
            "records": ctx.table.len(),
            "payload_bounds": ctx.table.payload_bounds(),
        }),
        Command::Pie { site } => {
            serde_json::to_value(success_distribution(&ctx, &SiteSelector::from(site)))?
        }
        Command::Scatter { site, low, high } => serde_json::to_value(payload_outcome(
            &ctx,
            &SiteSelector::from(site),
            PayloadRange::new(low, high),
        ))?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
