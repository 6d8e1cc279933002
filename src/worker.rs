//! Background loading and filtering for the interactive view
//!
//! The worker thread owns the store, the source and the loaded passages.
//! The UI thread sends query text and receives events over channels, so the
//! terminal keeps redrawing while a translation is fetched and decoded.

use crate::codec::{Passage, Translation};
use crate::loader::load_passages;
use crate::query::{filter_passages_with, FilterOptions};
use crate::source::PassageSource;
use crate::store::PassageStore;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Messages from the worker thread
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// Loading started or finished
    Loading { is_loading: bool },
    /// Filtered passages for a query, in result order
    Results { query: String, passages: Vec<Passage> },
    /// Loading failed; the worker has stopped
    Failed(String),
}

/// UI side of a running worker; dropping it stops the thread
pub struct WorkerHandle {
    queries: Sender<String>,
    events: Receiver<WorkerEvent>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Ask the worker to filter with new query text.
    /// Returns false if the worker has already stopped.
    pub fn query(&self, text: impl Into<String>) -> bool {
        self.queries.send(text.into()).is_ok()
    }

    /// Next event if one is ready
    pub fn try_recv(&self) -> Option<WorkerEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Check if the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        // Dropping the query sender ends the receive loop; the thread is detached
        if let Some(thread) = self.thread.take() {
            tracing::trace!(finished = thread.is_finished(), "detaching worker");
        }
    }
}

/// Start a worker with default filter options
pub fn spawn<S, R>(store: S, source: R, translation: Translation, initial_query: String) -> WorkerHandle
where
    S: PassageStore + Send + 'static,
    R: PassageSource + Send + 'static,
{
    spawn_with(store, source, translation, initial_query, FilterOptions::default())
}

/// Start a worker that loads `translation`, answers `initial_query`, then
/// answers every query sent through the handle
pub fn spawn_with<S, R>(
    mut store: S,
    source: R,
    translation: Translation,
    initial_query: String,
    options: FilterOptions,
) -> WorkerHandle
where
    S: PassageStore + Send + 'static,
    R: PassageSource + Send + 'static,
{
    let (query_tx, query_rx) = mpsc::channel::<String>();
    let (event_tx, event_rx) = mpsc::channel();

    let thread = thread::spawn(move || {
        let _ = event_tx.send(WorkerEvent::Loading { is_loading: true });

        let passages = match load_passages(&mut store, &source, &translation) {
            Ok((passages, origin)) => {
                tracing::debug!(%translation, ?origin, count = passages.len(), "worker loaded passages");
                passages
            }
            Err(e) => {
                tracing::error!(%translation, error = %format!("{:#}", e), "worker failed to load passages");
                let _ = event_tx.send(WorkerEvent::Loading { is_loading: false });
                let _ = event_tx.send(WorkerEvent::Failed(format!("{:#}", e)));
                return;
            }
        };

        let _ = event_tx.send(WorkerEvent::Loading { is_loading: false });

        let mut next = Some(initial_query);
        while let Some(query) = next.take().or_else(|| query_rx.recv().ok()) {
            // Only the newest of several queued queries is worth running
            let query = query_rx.try_iter().last().unwrap_or(query);

            let start = Instant::now();
            let results: Vec<Passage> = filter_passages_with(&passages, &query, options)
                .into_iter()
                .cloned()
                .collect();
            tracing::debug!(
                query = %query,
                count = results.len(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "filtered passages"
            );

            if event_tx
                .send(WorkerEvent::Results { query, passages: results })
                .is_err()
            {
                break;
            }
        }

        tracing::debug!(%translation, "worker stopped");
    });

    WorkerHandle {
        queries: query_tx,
        events: event_rx,
        thread: Some(thread),
    }
}
