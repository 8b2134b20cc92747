//! # quote-sync
//!
//! A command-line tool for managing a personal quote collection and keeping it
//! reconciled with a remote quote source.
//!
//! ## Overview
//!
//! `quote-sync` keeps an ordered collection of `{text, category}` quotes in
//! durable storage under the user's config directory. It can show a random
//! quote (optionally restricted to a category), add quotes, filter by category
//! with a remembered selection, import and export the collection as JSON, and
//! periodically reconcile against a remote source.
//!
//! ## Key behaviors
//!
//! - **Write-through persistence**: every mutation writes the full collection
//!   to durable storage immediately
//! - **Two selection policies**: the show action picks uniformly at random;
//!   the filter action deterministically returns the first match
//! - **Server-wins sync**: when the remote collection differs at all from the
//!   local one, the remote version fully replaces it; identical collections
//!   produce no write
//! - **Pluggable remote**: the sync engine only knows the [`remote::RemoteSource`]
//!   trait, so the stubbed HTTP source can be swapped for a real backend
//!
//! ## Architecture
//!
//! - Data model and defaults ([`quote`])
//! - Key-value storage, durable and session-scoped ([`storage`])
//! - The authoritative collection ([`store`])
//! - Category derivation and remembered filtering ([`categories`])
//! - JSON import/export ([`transfer`])
//! - Remote source abstraction ([`remote`]) and reconciliation ([`sync`])
//! - Configuration and logging ([`config`], [`settings`], [`logger`])

/// Quote data model and the built-in default collection.
pub mod quote;

/// Platform-agnostic configuration directory management.
///
/// Locates configuration files and directories following platform conventions
/// (XDG on Linux, Application Support on macOS, AppData on Windows).
pub mod config;

/// String key-value storage with durable and session-scoped implementations.
pub mod storage;

/// The authoritative quote collection with write-through persistence.
///
/// Owns the ordered quote sequence, loads it from durable storage (or the
/// built-in defaults), and persists the full sequence on every mutation.
/// Also provides the uniform random selection used by the show action.
pub mod store;

/// Category derivation and the remembered category filter.
///
/// Derives distinct categories in first-seen order and persists the last-used
/// filter selection across runs. Filtering returns a deterministic first
/// match, a deliberately different policy from random selection.
pub mod categories;

/// JSON file import and export for the quote collection.
pub mod transfer;

/// Remote quote source abstraction and the default HTTP-backed stub.
pub mod remote;

/// Reconciliation of the local collection against a remote source.
///
/// Implements the server-wins, full-overwrite-on-difference policy: a remote
/// collection whose serialized form differs at all replaces the local one
/// wholesale. Includes a watch loop for periodic passes and fire-and-forget
/// pushes of newly added quotes.
pub mod sync;

/// Sync settings (remote URL, watch interval) stored as TOML.
pub mod settings;

/// Logging configuration and utilities.
pub mod logger;
