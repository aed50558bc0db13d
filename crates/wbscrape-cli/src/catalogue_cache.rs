//! On-disk cache of the catalogue tree, refreshed once per calendar day.

use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate};
use wbscrape_scraper::{parse_catalogue, CatalogueNode, WbClient};

/// Returns the catalogue tree, from `path` when it was written today (local
/// time) and from the network otherwise.
///
/// A freshly downloaded catalogue is written back to `path`, pretty-printed.
/// Failing to write the cache is logged, not returned.
///
/// # Errors
///
/// Returns an error if the catalogue must be downloaded and the download or
/// its decoding fails.
pub(crate) async fn load_catalogue(
    client: &WbClient,
    path: &Path,
    refresh: bool,
) -> anyhow::Result<Vec<CatalogueNode>> {
    if !refresh && is_current(path, Local::now().date_naive()) {
        match read_cached(path) {
            Ok(nodes) => {
                tracing::info!(path = %path.display(), "using cached catalogue");
                return Ok(nodes);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cached catalogue unreadable, downloading");
            }
        }
    }

    let raw = client
        .fetch_catalogue_raw()
        .await
        .context("failed to download catalogue")?;
    let nodes = parse_catalogue(&raw).context("failed to decode downloaded catalogue")?;

    if let Err(e) = write_cache(path, &raw) {
        tracing::warn!(path = %path.display(), error = %e, "failed to cache catalogue");
    } else {
        tracing::info!(path = %path.display(), "catalogue cached");
    }
    Ok(nodes)
}

/// `true` if `path` exists and was last modified on `today` (local time).
pub(crate) fn is_current(path: &Path, today: NaiveDate) -> bool {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .is_ok_and(|modified| modified_day(modified) == today)
}

fn modified_day(modified: SystemTime) -> NaiveDate {
    DateTime::<Local>::from(modified).date_naive()
}

fn read_cached(path: &Path) -> anyhow::Result<Vec<CatalogueNode>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_catalogue(&raw)?)
}

fn write_cache(path: &Path, raw: &str) -> anyhow::Result<()> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    Ok(())
}
