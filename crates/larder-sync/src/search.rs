//! # Search Controller
//!
//! Debounces free-text search input in front of [`CatalogStore::load`].
//!
//! ## Timing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Trailing-edge Debounce (300ms)                         │
//! │                                                                         │
//! │  input:   "p"        "pi"   "piz"                                      │
//! │  t(ms):    0          100    150                   450                 │
//! │            │───────────│──────│─────────────────────│                  │
//! │            timer set   reset  reset                 fire load("piz")   │
//! │                                                                         │
//! │  One controller owns exactly one pending slot. A new input replaces    │
//! │  the pending term and restarts the window. Firing spawns the load,     │
//! │  so a later input never cancels a request already in flight.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fired loads are tracked by the controller. `shutdown()` returns only
//! after every one of them has finished and recorded its result.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::store::CatalogStore;

/// Commands for the controller task.
#[derive(Debug)]
enum SearchCommand {
    /// New search text; restarts the quiet window.
    Input(String),
    /// Fire the pending term now.
    Flush,
    /// Drop the pending term.
    Cancel,
    /// Stop the controller once in-flight loads finish. A pending term
    /// is dropped.
    Shutdown(oneshot::Sender<()>),
}

/// Handle for feeding a running [`SearchController`].
#[derive(Clone)]
pub struct SearchHandle {
    cmd_tx: mpsc::Sender<SearchCommand>,
}

impl SearchHandle {
    async fn send(&self, cmd: SearchCommand) -> ClientResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| ClientError::ChannelError("Search controller channel closed".into()))
    }

    /// Submits the current search text.
    pub async fn input(&self, term: impl Into<String>) -> ClientResult<()> {
        self.send(SearchCommand::Input(term.into())).await
    }

    /// Loads the pending term immediately instead of waiting out the window.
    pub async fn flush(&self) -> ClientResult<()> {
        self.send(SearchCommand::Flush).await
    }

    /// Forgets the pending term without loading it.
    pub async fn cancel(&self) -> ClientResult<()> {
        self.send(SearchCommand::Cancel).await
    }

    /// Stops the controller, waiting for loads it already fired.
    pub async fn shutdown(&self) -> ClientResult<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(SearchCommand::Shutdown(done_tx)).await?;
        done_rx
            .await
            .map_err(|_| ClientError::ChannelError("Search controller exited during shutdown".into()))
    }
}

/// Owns the debounce timer for one search box.
pub struct SearchController {
    store: CatalogStore,
    debounce: Duration,
}

impl SearchController {
    pub fn new(store: CatalogStore, debounce: Duration) -> Self {
        SearchController { store, debounce }
    }

    /// Starts the controller task and returns a handle.
    pub fn start(self) -> SearchHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        SearchHandle { cmd_tx }
    }

    /// Main controller loop.
    async fn run(self, mut cmd_rx: mpsc::Receiver<SearchCommand>) {
        info!(debounce_ms = self.debounce.as_millis() as u64, "Search controller started");

        let mut pending: Option<(String, Instant)> = None;
        let mut in_flight: JoinSet<()> = JoinSet::new();

        loop {
            let deadline = pending.as_ref().map(|(_, at)| *at);

            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(SearchCommand::Input(term)) => {
                        debug!(term = %term, "Search input, window restarted");
                        pending = Some((term, Instant::now() + self.debounce));
                    }
                    Some(SearchCommand::Flush) => {
                        if let Some((term, _)) = pending.take() {
                            self.fire(term, &mut in_flight);
                        }
                    }
                    Some(SearchCommand::Cancel) => {
                        pending = None;
                    }
                    Some(SearchCommand::Shutdown(done)) => {
                        info!("Search controller shutting down");
                        Self::drain(&mut in_flight).await;
                        let _ = done.send(());
                        break;
                    }
                    None => {
                        Self::drain(&mut in_flight).await;
                        break;
                    }
                },
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((term, _)) = pending.take() {
                        self.fire(term, &mut in_flight);
                    }
                }
            }
        }
    }

    /// Spawns a load for `term` into `in_flight`.
    fn fire(&self, term: String, in_flight: &mut JoinSet<()>) {
        debug!(term = %term, "Search window elapsed, loading");
        let store = self.store.clone();
        in_flight.spawn(async move {
            // The outcome is recorded in store state.
            let _ = store.load(&term).await;
        });
    }

    /// Waits for every fired load to finish.
    async fn drain(in_flight: &mut JoinSet<()>) {
        if !in_flight.is_empty() {
            debug!(count = in_flight.len(), "Waiting for in-flight search loads");
        }
        while in_flight.join_next().await.is_some() {}
    }
}
