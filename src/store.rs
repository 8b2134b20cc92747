use anyhow::{anyhow, Context, Result};
use rand::seq::SliceRandom;

use crate::quote::{default_quotes, Quote};
use crate::storage::{KeyValueStorage, LAST_QUOTE_KEY, QUOTES_KEY};

/// Sentinel filter value meaning "no category restriction"
pub const ALL_CATEGORIES: &str = "all";

/// The authoritative, ordered quote collection.
///
/// Owns its durable storage handle and writes the full collection through on
/// every mutation. Insertion order is significant: random selection and
/// first-match filtering both depend on it.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    storage: Box<dyn KeyValueStorage>,
}

impl QuoteStore {
    /// Load the collection from durable storage.
    ///
    /// A missing or unparseable `quotes` key yields the three built-in
    /// defaults. Defaults are not written back until the first mutation.
    pub fn load(storage: Box<dyn KeyValueStorage>) -> Self {
        let quotes = storage
            .get(QUOTES_KEY)
            .and_then(|raw| serde_json::from_str::<Vec<Quote>>(&raw).ok())
            .unwrap_or_else(default_quotes);

        QuoteStore { quotes, storage }
    }

    /// Add a quote to the end of the collection and persist.
    ///
    /// Both fields are trimmed first; if either is empty the call fails and
    /// nothing changes, in memory or on disk.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() || category.is_empty() {
            return Err(anyhow!("Please enter both a quote and a category."));
        }

        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());
        self.persist()?;

        log::debug!("Added quote in category '{}'", quote.category);
        Ok(quote)
    }

    /// Write the full collection to durable storage.
    pub fn persist(&mut self) -> Result<()> {
        let raw =
            serde_json::to_string(&self.quotes).context("Failed to serialize quote collection")?;
        self.storage.set(QUOTES_KEY, &raw)
    }

    pub fn list(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Pick a uniformly random quote, optionally restricted to a category.
    ///
    /// Returns `None` when the (possibly restricted) set is empty.
    pub fn pick_random(&self, filter: &str) -> Option<&Quote> {
        let mut rng = rand::thread_rng();

        if filter == ALL_CATEGORIES {
            self.quotes.choose(&mut rng)
        } else {
            let subset: Vec<&Quote> = self
                .quotes
                .iter()
                .filter(|q| q.category == filter)
                .collect();
            subset.choose(&mut rng).copied()
        }
    }

    /// Replace the entire collection and persist. Used by the sync engine's
    /// full-overwrite policy.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) -> Result<()> {
        self.quotes = quotes;
        self.persist()
    }

    /// Append quotes verbatim (no validation, no dedup) and persist.
    /// Used by the import path. Returns the number appended.
    pub fn extend(&mut self, quotes: Vec<Quote>) -> Result<usize> {
        let count = quotes.len();
        self.quotes.extend(quotes);
        self.persist()?;
        Ok(count)
    }

    /// Canonical JSON form of the collection, the comparison baseline used
    /// by the sync engine's conflict check.
    pub fn serialized(&self) -> Result<String> {
        serde_json::to_string(&self.quotes).context("Failed to serialize quote collection")
    }
}

/// Record the most recently viewed quote in session storage.
pub fn record_last_viewed(session: &mut dyn KeyValueStorage, quote: &Quote) -> Result<()> {
    let raw = serde_json::to_string(quote).context("Failed to serialize last viewed quote")?;
    session.set(LAST_QUOTE_KEY, &raw)
}

/// Read back the last viewed quote, if any was recorded this session.
pub fn last_viewed(session: &dyn KeyValueStorage) -> Option<Quote> {
    session
        .get(LAST_QUOTE_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SessionStorage;

    fn memory_store() -> QuoteStore {
        QuoteStore::load(Box::new(SessionStorage::new()))
    }

    #[test]
    fn test_load_defaults_when_storage_empty() {
        let store = memory_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[0].category, "Motivation");
    }

    #[test]
    fn test_load_defaults_when_storage_unparseable() {
        let mut storage = SessionStorage::new();
        storage.set(QUOTES_KEY, "not json at all").unwrap();

        let store = QuoteStore::load(Box::new(storage));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_from_saved_collection() {
        let mut storage = SessionStorage::new();
        storage
            .set(QUOTES_KEY, r#"[{"text":"saved","category":"X"}]"#)
            .unwrap();

        let store = QuoteStore::load(Box::new(storage));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].text, "saved");
    }

    #[test]
    fn test_add_appends_and_trims() {
        let mut store = memory_store();
        let before = store.len();

        let quote = store.add("  spaced out  ", " Calm ").unwrap();
        assert_eq!(quote.text, "spaced out");
        assert_eq!(quote.category, "Calm");
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.list().last().unwrap(), &quote);
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut store = memory_store();
        let before = store.len();

        assert!(store.add("", "x").is_err());
        assert!(store.add("x", "").is_err());
        assert!(store.add("", "").is_err());
        assert!(store.add("   ", "x").is_err());
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_pick_random_membership() {
        let store = memory_store();
        for _ in 0..20 {
            let picked = store.pick_random(ALL_CATEGORIES).unwrap();
            assert!(store.list().contains(picked));
        }
    }

    #[test]
    fn test_pick_random_respects_category() {
        let store = memory_store();
        for _ in 0..20 {
            let picked = store.pick_random("Motivation").unwrap();
            assert_eq!(picked.category, "Motivation");
        }
    }

    #[test]
    fn test_pick_random_empty_subset() {
        let store = memory_store();
        assert!(store.pick_random("NoSuchCategory").is_none());
    }

    #[test]
    fn test_pick_random_empty_store() {
        let mut store = memory_store();
        store.replace_all(Vec::new()).unwrap();
        assert!(store.pick_random(ALL_CATEGORIES).is_none());
    }

    #[test]
    fn test_replace_all() {
        let mut store = memory_store();
        store
            .replace_all(vec![Quote::new("only", "one")])
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].text, "only");
    }

    #[test]
    fn test_last_viewed_roundtrip() {
        let mut session = SessionStorage::new();
        assert!(last_viewed(&session).is_none());

        let quote = Quote::new("remember me", "Memory");
        record_last_viewed(&mut session, &quote).unwrap();
        assert_eq!(last_viewed(&session).unwrap(), quote);
    }
}
