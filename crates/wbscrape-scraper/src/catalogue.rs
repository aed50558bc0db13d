//! Catalogue flattening: nested category tree to an ordered list of
//! [`CategoryDescriptor`]s.

use wbscrape_core::CategoryDescriptor;

use crate::error::ScraperError;
use crate::types::CatalogueNode;

/// Decodes a raw catalogue body (a top-level JSON array of nodes).
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] if the body is not a JSON array of
/// objects. Individual nodes with missing fields still decode.
pub fn parse_catalogue(body: &str) -> Result<Vec<CatalogueNode>, ScraperError> {
    serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
        context: "catalogue".to_owned(),
        source: e,
    })
}

/// Builds a descriptor from one node, or `None` if any of `name`, `url`,
/// `shard` or `query` is missing.
#[must_use]
pub fn descriptor_from_node(node: &CatalogueNode) -> Option<CategoryDescriptor> {
    Some(CategoryDescriptor {
        name: node.name.clone()?,
        url_path: node.url.clone()?,
        shard_id: node.shard.clone()?,
        query_string: node.query.clone()?,
    })
}

/// Flattens the tree in depth-first pre-order.
///
/// A node that cannot produce a descriptor is skipped, but its children are
/// still visited.
#[must_use]
pub fn flatten_catalogue(roots: &[CatalogueNode]) -> Vec<CategoryDescriptor> {
    let mut flat = Vec::new();
    let mut skipped = 0usize;
    visit(roots, &mut flat, &mut skipped);
    if skipped > 0 {
        tracing::debug!(
            skipped,
            kept = flat.len(),
            "catalogue nodes without routing fields were skipped"
        );
    }
    flat
}

fn visit(nodes: &[CatalogueNode], flat: &mut Vec<CategoryDescriptor>, skipped: &mut usize) {
    for node in nodes {
        match descriptor_from_node(node) {
            Some(descriptor) => flat.push(descriptor),
            None => *skipped += 1,
        }
        if let Some(children) = &node.children {
            visit(children, flat, skipped);
        }
    }
}
