use color_eyre::eyre::{Context, Result};
use regex::Regex;
use unaccent::unaccent;

/// Used when a title has no characters that survive slugging (e.g. a title
/// written entirely in a non-Latin script).
const FALLBACK_SLUG: &str = "release";

/// Turn a release title into the human-readable URL segment used in
/// canonical release page URLs.
pub fn slugify(title: &str) -> Result<String> {
    let re_invalid = Regex::new(r"[^a-z0-9\s-]+").wrap_err("Failed to create regex")?;
    let re_separators = Regex::new(r"[\s-]+").wrap_err("Failed to create regex")?;

    let ascii = unaccent(title).to_lowercase();
    let cleaned = re_invalid.replace_all(&ascii, "");
    let dashed = re_separators.replace_all(cleaned.trim(), "-");
    let slug = dashed.trim_matches('-');

    if slug.is_empty() {
        return Ok(FALLBACK_SLUG.to_string());
    }
    Ok(slug.to_string())
}
