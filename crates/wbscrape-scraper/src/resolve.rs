//! Category lookup from free-form user input.

use wbscrape_core::CategoryDescriptor;

use crate::error::ScraperError;

/// Returns the first category whose `url_path` equals the input's path
/// suffix or whose `name` equals the input verbatim.
///
/// When the input starts with `http://` or `https://` the path suffix is
/// everything after the host, up to any query or fragment; otherwise it is
/// the input itself, so `"/catalog/knigi"` also matches by path. The host is
/// not checked and the path is compared byte for byte.
///
/// # Errors
///
/// Returns [`ScraperError::CategoryNotFound`] when nothing matches.
pub fn resolve_category<'a>(
    catalogue: &'a [CategoryDescriptor],
    input: &str,
) -> Result<&'a CategoryDescriptor, ScraperError> {
    let suffix = path_suffix(input);
    catalogue
        .iter()
        .find(|c| c.url_path == suffix || c.name == input)
        .ok_or_else(|| ScraperError::CategoryNotFound {
            input: input.to_owned(),
        })
}

fn path_suffix(input: &str) -> &str {
    let Some(rest) = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
    else {
        return input;
    };
    let path = rest.find('/').map_or("", |i| &rest[i..]);
    path.split(['?', '#']).next().unwrap_or(path)
}
