use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::quote::Quote;
use crate::store::QuoteStore;

/// Default export file name
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Write the full collection as a pretty-printed JSON array.
pub fn export_all(store: &QuoteStore, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(store.list())
        .context("Failed to serialize quote collection")?;

    fs::write(path, json)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    log::info!("Exported {} quotes to {}", store.len(), path.display());
    Ok(())
}

/// Parse file contents as a JSON array of quotes and append them verbatim.
///
/// Invalid JSON and a non-array top level both fail without touching the
/// store. Individual entries are not validated: missing fields become empty
/// strings, extra fields are dropped. Returns the number of quotes appended.
pub fn import_all(store: &mut QuoteStore, contents: &str) -> Result<usize> {
    let value: Value = serde_json::from_str(contents).context("Error parsing JSON")?;

    if !value.is_array() {
        return Err(anyhow!("Invalid format: expected a JSON array of quotes"));
    }

    let quotes: Vec<Quote> =
        serde_json::from_value(value).context("Invalid format: expected a JSON array of quotes")?;

    store.extend(quotes)
}
