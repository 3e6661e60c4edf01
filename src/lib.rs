//! # Radiation
//!
//! A line-oriented terminal reader for the unread entries of a
//! Miniflux-compatible feed server.
//!
//! ## Architecture
//!
//! ```text
//! input line → tui → Session → EntryStore → RetryingClient → Transport
//!                        │
//!                        └── TaskSupervisor (background mark-read)
//! ```
//!
//! - [`fetcher`]: HTTP transport and the fixed-ceiling retry policy
//! - [`store`]: typed access to `/v1/entries`
//! - [`session`]: the listing/reading state machine and pagination
//! - [`background`]: fire-and-forget mark-read tasks, drained at exit
//! - [`tui`]: the interactive loop and terminal line editor
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config template, then fill in token and server_url
//! radiation init
//!
//! # Read unread entries
//! radiation
//!
//! # Print the unread list once
//! radiation list
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the remote
/// store and the renderer chosen in the configuration.
pub mod app;

/// Fire-and-forget mark-read tasks.
///
/// - [`TaskSupervisor`](background::TaskSupervisor): join set of in-flight
///   write-backs with non-blocking reaping and a blocking drain
pub mod background;

/// Command-line interface using clap.
///
/// - `read` (default) - Interactive session
/// - `list` - Print the unread list
/// - `show <id>` - Render one entry
/// - `init` - Write a config template
pub mod cli;

/// Configuration loaded from `~/.config/radiation/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): one article as the server describes it
/// - [`EntryList`](domain::EntryList): the pageable working set
/// - [`Article`](domain::Article): a rendered entry paged by lines
pub mod domain;

/// HTTP access with a fixed retry ceiling.
///
/// - [`Transport`](fetcher::Transport): async trait for one round trip
/// - [`HttpTransport`](fetcher::HttpTransport): reqwest-based implementation
/// - [`RetryingClient`](fetcher::RetryingClient): GET/PUT with up to five attempts
pub mod fetcher;

/// Markup-to-text renderers for article bodies.
pub mod render;

/// The browsing/reading state machine.
pub mod session;

/// Remote entry store.
///
/// - [`EntryStore`](store::EntryStore): async trait for entry operations
/// - [`RemoteStore`](store::RemoteStore): REST implementation
pub mod store;

/// Interactive session loop over a line terminal.
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;
