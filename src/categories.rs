use anyhow::Result;

use crate::quote::Quote;
use crate::storage::{KeyValueStorage, LAST_FILTER_KEY};
use crate::store::{QuoteStore, ALL_CATEGORIES};

/// Distinct category values in first-seen order, no duplicates.
///
/// The "all" sentinel is not included here; presentation prepends it.
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = Vec::new();
    for quote in quotes {
        if !seen.contains(&quote.category) {
            seen.push(quote.category.clone());
        }
    }
    seen
}

/// Remembers the last-used category filter across runs.
///
/// Applying a filter shows the FIRST matching quote, deterministically. This
/// is intentionally a different selection policy from
/// [`QuoteStore::pick_random`]; the two stay separate operations.
pub struct CategoryFilter {
    storage: Box<dyn KeyValueStorage>,
}

impl CategoryFilter {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        CategoryFilter { storage }
    }

    /// The persisted filter selection, or "all" if none was ever saved.
    ///
    /// The saved value may name a category that no longer exists in the
    /// store; it is not validated.
    pub fn last_filter(&self) -> String {
        self.storage
            .get(LAST_FILTER_KEY)
            .unwrap_or_else(|| ALL_CATEGORIES.to_string())
    }

    /// Persist the selection and return the first matching quote, if any.
    pub fn apply<'a>(
        &mut self,
        store: &'a QuoteStore,
        category: &str,
    ) -> Result<Option<&'a Quote>> {
        self.storage.set(LAST_FILTER_KEY, category)?;

        if category == ALL_CATEGORIES {
            return Ok(store.list().first());
        }

        Ok(store.list().iter().find(|q| q.category == category))
    }
}
