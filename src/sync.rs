use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use crate::quote::Quote;
use crate::remote::RemoteSource;
use crate::store::QuoteStore;

/// What a single reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote and local collections serialize identically; nothing written.
    Unchanged,
    /// Remote differed, so it fully replaced the local collection.
    Replaced { count: usize },
    /// The remote could not be reached; local collection untouched.
    ServerUnavailable,
}

/// Engine phase. A pass is either running or it isn't; overlapping passes
/// within one process are prevented by the `&mut self` receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Syncing,
}

/// Reconciles the local quote collection against a remote source.
///
/// Conflict policy: if the remote list's serialized form differs at all from
/// the local one, the remote list fully replaces the local collection. No
/// merging, no per-quote comparison. Identical forms produce no write.
pub struct SyncEngine {
    remote: Box<dyn RemoteSource>,
    phase: SyncPhase,
}

impl SyncEngine {
    pub fn new(remote: Box<dyn RemoteSource>) -> Self {
        SyncEngine {
            remote,
            phase: SyncPhase::Idle,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Run one reconciliation pass.
    ///
    /// Holds the store exclusively for the whole read-modify-write, so a
    /// user edit cannot interleave with the overwrite decision.
    pub fn run_once(&mut self, store: &mut QuoteStore) -> Result<SyncOutcome> {
        self.phase = SyncPhase::Syncing;
        let outcome = self.reconcile(store);
        self.phase = SyncPhase::Idle;
        outcome
    }

    fn reconcile(&self, store: &mut QuoteStore) -> Result<SyncOutcome> {
        let remote_quotes = match self.remote.fetch_quotes() {
            Ok(quotes) => quotes,
            Err(e) => {
                log::warn!("Quote server unavailable: {e:#}");
                return Ok(SyncOutcome::ServerUnavailable);
            }
        };

        let remote_serialized = serde_json::to_string(&remote_quotes)?;
        if remote_serialized == store.serialized()? {
            log::debug!("Local collection already matches server");
            return Ok(SyncOutcome::Unchanged);
        }

        // Server wins, wholesale
        let count = remote_quotes.len();
        store.replace_all(remote_quotes)?;
        log::info!("Server collection differed; replaced local with {count} quotes");

        Ok(SyncOutcome::Replaced { count })
    }

    /// Fire-and-forget push of a newly added quote. Failure is logged and
    /// never affects local state.
    pub fn notify_added(&self, quote: &Quote) {
        if let Err(e) = self.remote.push_quote(quote) {
            log::warn!("Failed to push new quote upstream: {e:#}");
        }
    }

    /// Run reconciliation passes forever, one per interval tick.
    ///
    /// Failures are reported and the loop continues to the next tick; there
    /// is no backoff or retry in between.
    pub fn watch(&mut self, store: &mut QuoteStore, interval: Duration) -> Result<()> {
        println!(
            "{}",
            format!(
                "Watching for server updates every {}s (Ctrl-C to stop)...",
                interval.as_secs()
            )
            .cyan()
        );

        loop {
            let outcome = self.run_once(store)?;
            report_outcome(&outcome);
            std::thread::sleep(interval);
        }
    }
}

/// Print a sync outcome as a status line.
pub fn report_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Unchanged => {
            println!("{}", "Quotes are in sync with the server.".green());
        }
        SyncOutcome::Replaced { count } => {
            println!(
                "{}",
                format!("Quotes updated from server ({count} quotes). Server version kept.")
                    .yellow()
            );
        }
        SyncOutcome::ServerUnavailable => {
            println!("{}", "Server unavailable; local quotes unchanged.".red());
        }
    }
}
