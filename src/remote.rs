use anyhow::{Context, Result};

use crate::quote::Quote;

/// A remote quote source the sync engine can reconcile against.
///
/// The engine only ever calls these two methods, so a real backend can be
/// substituted without touching the sync logic.
pub trait RemoteSource {
    /// Fetch the server's full quote list.
    fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    /// Push a single quote upstream. Callers treat this as fire-and-forget.
    fn push_quote(&self, quote: &Quote) -> Result<()>;
}

/// The fixed quote list the stub server "returns".
pub fn server_quotes() -> Vec<Quote> {
    vec![
        Quote::new("Server wisdom: keep your data in sync.", "Server"),
        Quote::new("The network is the computer.", "Server"),
        Quote::new("Consistency beats cleverness.", "Server"),
    ]
}

/// Remote source backed by a plain HTTP endpoint.
///
/// The fetch verifies the endpoint is reachable and returns a successful
/// status, but the response body is deliberately unused: the fixed
/// [`server_quotes`] list is the comparison baseline. This is a documented
/// stand-in for a real backend; swap in another [`RemoteSource`] to change
/// that.
pub struct HttpRemote {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpRemote {
    pub fn new(url: impl Into<String>) -> Self {
        HttpRemote {
            client: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }
}

impl RemoteSource for HttpRemote {
    fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Failed to reach quote server at {}", self.url))?;

        response
            .error_for_status()
            .context("Quote server returned an error status")?;

        Ok(server_quotes())
    }

    fn push_quote(&self, quote: &Quote) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(quote)
            .send()
            .with_context(|| format!("Failed to reach quote server at {}", self.url))?;

        response
            .error_for_status()
            .context("Quote server rejected the pushed quote")?;

        log::debug!("Pushed quote in category '{}' upstream", quote.category);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_quotes_are_well_formed() {
        let quotes = server_quotes();
        assert!(!quotes.is_empty());
        assert!(quotes
            .iter()
            .all(|q| !q.text.is_empty() && !q.category.is_empty()));
    }

    #[test]
    fn test_fetch_fails_when_unreachable() {
        // Nothing listens on this localhost port
        let remote = HttpRemote::new("http://127.0.0.1:1/quotes");
        assert!(remote.fetch_quotes().is_err());
    }
}
