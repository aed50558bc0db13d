//! Command handlers: catalogue lookup, crawl, optional sales enrichment and
//! dataset export.

use anyhow::Context;
use chrono::Local;
use wbscrape_core::{AppConfig, CategoryDescriptor, ProductRecord};
use wbscrape_scraper::{
    flatten_catalogue, resolve_category, RecoveryPolicy, TracingProgress, WbClient,
};

use crate::{catalogue_cache, export, OutputArgs};

/// Crawls the category named or linked by `target` and writes its dataset.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded, `target` matches no
/// category, or the crawl, enrichment or export fails.
pub(crate) async fn run_category(
    config: &AppConfig,
    target: &str,
    refresh_catalogue: bool,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let categories = load_categories(&client, config, refresh_catalogue).await?;
    let category = resolve_category(&categories, target)?;
    tracing::info!(
        name = %category.name,
        url_path = %category.url_path,
        "category resolved"
    );

    let records = client
        .crawl_category(category, &mut TracingProgress)
        .await
        .with_context(|| format!("failed to crawl category {}", category.name))?;

    finish(&client, config, records, &category.name, output).await
}

/// Crawls the search results for `keyword` and writes their dataset.
///
/// # Errors
///
/// Returns an error if the keyword is blank, or the crawl, enrichment or
/// export fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    keyword: &str,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let records = client
        .crawl_search(keyword, &mut TracingProgress)
        .await
        .with_context(|| format!("failed to crawl search results for \"{keyword}\""))?;

    finish(&client, config, records, keyword, output).await
}

/// Prints `name<TAB>path` for every crawlable category, optionally narrowed
/// by a case-insensitive substring `filter`.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) async fn run_list_categories(
    config: &AppConfig,
    filter: Option<&str>,
    refresh_catalogue: bool,
) -> anyhow::Result<()> {
    let client = build_client(config)?;
    let categories = load_categories(&client, config, refresh_catalogue).await?;
    let matching = filter_categories(&categories, filter);
    for category in &matching {
        println!("{}\t{}", category.name, category.url_path);
    }
    tracing::info!(
        shown = matching.len(),
        total = categories.len(),
        "categories listed"
    );
    Ok(())
}

fn build_client(config: &AppConfig) -> anyhow::Result<WbClient> {
    WbClient::from_config(config).context("failed to build HTTP client")
}

async fn load_categories(
    client: &WbClient,
    config: &AppConfig,
    refresh_catalogue: bool,
) -> anyhow::Result<Vec<CategoryDescriptor>> {
    let nodes =
        catalogue_cache::load_catalogue(client, &config.catalogue_cache_path, refresh_catalogue)
            .await?;
    let categories = flatten_catalogue(&nodes);
    tracing::debug!(count = categories.len(), "catalogue flattened");
    Ok(categories)
}

fn filter_categories<'a>(
    categories: &'a [CategoryDescriptor],
    filter: Option<&str>,
) -> Vec<&'a CategoryDescriptor> {
    let needle = filter.map(str::to_lowercase);
    categories
        .iter()
        .filter(|c| {
            needle.as_deref().map_or(true, |n| {
                c.name.to_lowercase().contains(n) || c.url_path.to_lowercase().contains(n)
            })
        })
        .collect()
}

async fn finish(
    client: &WbClient,
    config: &AppConfig,
    records: Vec<ProductRecord>,
    label: &str,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let records = if output.no_sales {
        records
    } else {
        client
            .enrich_sales(
                records,
                &RecoveryPolicy::from_config(config),
                &mut TracingProgress,
            )
            .await
            .context("failed to collect sales figures")?
    };

    let output_dir = output.output_dir.as_ref().unwrap_or(&config.output_dir);
    let path = export::export_dataset(output_dir, label, Local::now().date_naive(), &records)?;
    tracing::info!(records = records.len(), path = %path.display(), "dataset written");
    println!("{}", path.display());
    Ok(())
}
