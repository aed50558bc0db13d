mod catalogue_cache;
mod export;
mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "wbscrape")]
#[command(about = "Collect Wildberries product listings into CSV datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl a catalogue category, given its exact name or a storefront URL
    Category {
        /// Category name (e.g. "Детективы") or URL of its storefront page
        target: String,

        /// Download the catalogue even if today's cached copy exists
        #[arg(long)]
        refresh_catalogue: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Crawl the results of a keyword search
    Search {
        /// Search words; multiple arguments are joined with spaces
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the categories available for crawling
    Categories {
        /// Only show categories whose name or path contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Download the catalogue even if today's cached copy exists
        #[arg(long)]
        refresh_catalogue: bool,
    },
}

/// Options shared by the crawling commands.
#[derive(Debug, Args)]
pub(crate) struct OutputArgs {
    /// Skip the per-item sales lookups
    #[arg(long)]
    pub no_sales: bool,

    /// Directory for the CSV dataset (defaults to WBSCRAPE_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = wbscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Category {
            target,
            refresh_catalogue,
            output,
        } => run::run_category(&config, &target, refresh_catalogue, &output).await,
        Commands::Search { keyword, output } => {
            run::run_search(&config, &keyword.join(" "), &output).await
        }
        Commands::Categories {
            filter,
            refresh_catalogue,
        } => run::run_list_categories(&config, filter.as_deref(), refresh_catalogue).await,
    }
}

#[cfg(test)]
mod tests;
