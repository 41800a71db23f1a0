//! Async selection session.
//!
//! Runs the view aggregator in a tokio task. The current region lives in a
//! `watch` channel; each change produces one [`DashboardSnapshot`] on an
//! `mpsc` channel so the TUI event loop can consume it without shared
//! mutable state.

use std::sync::Arc;

use sales_core::models::{DashboardViews, RecordSet};
use sales_data::aggregator;
use tokio::sync::{mpsc, watch};

// ── Public types ──────────────────────────────────────────────────────────────

/// Views computed for one selection, forwarded to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Region the views were computed for; `None` when nothing is selected.
    pub selection: Option<String>,
    pub views: DashboardViews,
}

// ── SelectionSession ──────────────────────────────────────────────────────────

/// Background recompute-on-change coordinator.
///
/// Call [`SelectionSession::start`] to spawn the loop and receive both the
/// snapshot channel and a [`SessionHandle`] for changing the selection.
pub struct SelectionSession {
    /// Dataset shared read-only with every recompute.
    records: Arc<RecordSet>,
    /// Selection in effect when the session starts.
    initial: Option<String>,
}

impl SelectionSession {
    pub fn new(records: Arc<RecordSet>, initial: Option<String>) -> Self {
        Self { records, initial }
    }

    /// Start the selection loop.
    ///
    /// An initial snapshot for the starting selection is published right
    /// away, then one per selection change.
    pub fn start(self) -> (mpsc::Receiver<DashboardSnapshot>, SessionHandle) {
        let (tx, rx) = mpsc::channel(16);
        let (selection_tx, selection_rx) = watch::channel(self.initial.clone());

        let handle = tokio::spawn(async move {
            self.selection_loop(selection_rx, tx).await;
        });

        (
            rx,
            SessionHandle {
                selection: selection_tx,
                handle,
            },
        )
    }

    // ── Private implementation ────────────────────────────────────────────

    /// Publish for the current selection, then wait for changes.
    ///
    /// Exits when the handle is dropped or the snapshot receiver is closed.
    /// Bursts of changes may coalesce into one snapshot for the latest value.
    async fn selection_loop(
        self,
        mut selection_rx: watch::Receiver<Option<String>>,
        tx: mpsc::Sender<DashboardSnapshot>,
    ) {
        let initial = selection_rx.borrow_and_update().clone();
        if !self.publish(initial, &tx).await {
            return;
        }

        while selection_rx.changed().await.is_ok() {
            let selection = selection_rx.borrow_and_update().clone();
            if !self.publish(selection, &tx).await {
                break;
            }
        }

        tracing::debug!("selection session finished");
    }

    /// Recompute views for `selection` and send them. Returns `false` once
    /// the receiver is gone.
    async fn publish(
        &self,
        selection: Option<String>,
        tx: &mpsc::Sender<DashboardSnapshot>,
    ) -> bool {
        let views = aggregator::update(&self.records, selection.as_deref());
        let snapshot = DashboardSnapshot { selection, views };

        if let Err(e) = tx.send(snapshot).await {
            tracing::warn!(error = %e, "failed to send dashboard snapshot; receiver dropped");
            return false;
        }
        true
    }
}

// ── SessionHandle ─────────────────────────────────────────────────────────────

/// Handle to a running selection session.
///
/// Dropping it ends the loop after any in-flight snapshot is sent.
pub struct SessionHandle {
    selection: watch::Sender<Option<String>>,
    handle: tokio::task::JoinHandle<()>,
}

impl SessionHandle {
    /// Change the selected region. Returns `false` when `region` is already
    /// selected, in which case no snapshot is produced.
    pub fn select(&self, region: Option<String>) -> bool {
        self.selection.send_if_modified(|current| {
            if *current == region {
                false
            } else {
                *current = region;
                true
            }
        })
    }

    /// The most recently requested selection.
    pub fn current(&self) -> Option<String> {
        self.selection.borrow().clone()
    }

    /// Immediately abort the session loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
