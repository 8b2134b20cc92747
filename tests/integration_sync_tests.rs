use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use quote_sync::quote::Quote;
use quote_sync::remote::RemoteSource;
use quote_sync::storage::{FileStorage, KeyValueStorage, QUOTES_KEY};
use quote_sync::store::QuoteStore;
use quote_sync::sync::{SyncEngine, SyncOutcome};

/// Remote source whose served collection can be swapped between passes,
/// simulating server-side edits and outages.
struct ScriptedRemote {
    served: Arc<Mutex<Option<Vec<Quote>>>>,
}

impl ScriptedRemote {
    fn new(initial: Option<Vec<Quote>>) -> (Self, Arc<Mutex<Option<Vec<Quote>>>>) {
        let served = Arc::new(Mutex::new(initial));
        (
            ScriptedRemote {
                served: served.clone(),
            },
            served,
        )
    }
}

impl RemoteSource for ScriptedRemote {
    fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        self.served
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow!("server unavailable"))
    }

    fn push_quote(&self, _quote: &Quote) -> Result<()> {
        Ok(())
    }
}

fn file_store(dir: &TempDir) -> QuoteStore {
    QuoteStore::load(Box::new(FileStorage::new(dir.path()).unwrap()))
}

fn saved_raw(dir: &TempDir) -> Option<String> {
    FileStorage::new(dir.path()).unwrap().get(QUOTES_KEY)
}

#[test]
fn sync_replaces_local_collection_and_persists() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    store.add("local only", "Local").unwrap();

    let server = vec![Quote::new("from server", "Server")];
    let (remote, _) = ScriptedRemote::new(Some(server.clone()));
    let mut engine = SyncEngine::new(Box::new(remote));

    let outcome = engine.run_once(&mut store).unwrap();
    assert_eq!(outcome, SyncOutcome::Replaced { count: 1 });

    // The local-only quote is gone, server version is persisted wholesale
    assert_eq!(store.list(), server.as_slice());
    let saved: Vec<Quote> = serde_json::from_str(&saved_raw(&dir).unwrap()).unwrap();
    assert_eq!(saved, server);
}

#[test]
fn sync_with_identical_server_leaves_storage_bytes_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    store.add("shared", "S").unwrap();

    let (remote, _) = ScriptedRemote::new(Some(store.list().to_vec()));
    let mut engine = SyncEngine::new(Box::new(remote));

    let bytes_before = saved_raw(&dir).unwrap();
    let outcome = engine.run_once(&mut store).unwrap();

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert_eq!(saved_raw(&dir).unwrap(), bytes_before);
}

#[test]
fn sync_against_unreachable_server_reports_and_preserves() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);
    store.add("precious", "Local").unwrap();
    let bytes_before = saved_raw(&dir).unwrap();

    let (remote, _) = ScriptedRemote::new(None);
    let mut engine = SyncEngine::new(Box::new(remote));

    let outcome = engine.run_once(&mut store).unwrap();
    assert_eq!(outcome, SyncOutcome::ServerUnavailable);
    assert_eq!(saved_raw(&dir).unwrap(), bytes_before);
    assert!(store.list().iter().any(|q| q.text == "precious"));
}

#[test]
fn recovery_after_outage_follows_next_tick() {
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    let (remote, served) = ScriptedRemote::new(None);
    let mut engine = SyncEngine::new(Box::new(remote));

    // First tick: outage
    assert_eq!(
        engine.run_once(&mut store).unwrap(),
        SyncOutcome::ServerUnavailable
    );

    // Server comes back with a differing collection; next tick picks it up
    let server = vec![Quote::new("recovered", "Server")];
    *served.lock().unwrap() = Some(server.clone());

    assert_eq!(
        engine.run_once(&mut store).unwrap(),
        SyncOutcome::Replaced { count: 1 }
    );
    assert_eq!(store.list(), server.as_slice());

    // A further tick with no server change is a no-op
    assert_eq!(engine.run_once(&mut store).unwrap(), SyncOutcome::Unchanged);
}

#[test]
fn edit_between_ticks_is_overwritten_by_server() {
    // The accepted consequence of the full-overwrite policy: a local add made
    // between ticks is discarded once the server differs.
    let dir = TempDir::new().unwrap();
    let mut store = file_store(&dir);

    let server = vec![Quote::new("authoritative", "Server")];
    let (remote, _) = ScriptedRemote::new(Some(server.clone()));
    let mut engine = SyncEngine::new(Box::new(remote));

    engine.run_once(&mut store).unwrap();
    assert_eq!(store.list(), server.as_slice());

    store.add("doomed edit", "Local").unwrap();
    assert_eq!(store.len(), 2);

    engine.run_once(&mut store).unwrap();
    assert_eq!(store.list(), server.as_slice());
}
