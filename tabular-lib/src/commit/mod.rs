//! Edit commit dispatch.
//!
//! [`EditCommitter`] hands each committed [`RowUpdate`] to a
//! [`RowUpdater`] on its own tokio task and returns at once, so the view
//! never waits on persistence. Each submission produces exactly one
//! [`CommitOutcome`] on the [`CommitReceiver`], in completion order; the
//! [`CommitTicket`] returned by [`EditCommitter::submit`] correlates them.
//!
//! # Example
//!
//! ```ignore
//! let (committer, mut outcomes) = EditCommitter::new(store, Some(user), CommitConfig::default());
//!
//! if let Some(update) = view.commit_edit() {
//!     committer.submit(update);
//! }
//!
//! while let Some(outcome) = outcomes.try_recv() {
//!     view.apply_commit_outcome(&outcome);
//! }
//! ```

mod retry;

pub use retry::RetryConfig;

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use log::debug;
use log::warn;
use tokio::sync::mpsc;

use crate::config::CommitConfig;
use crate::error::StoreError;
use crate::model::Row;
use crate::model::UserId;
use crate::store::RowUpdater;
use crate::view::RowUpdate;

/// Correlation id of a submitted commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitTicket(u64);

impl std::fmt::Display for CommitTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The result of one submitted commit.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    /// Ticket returned by [`EditCommitter::submit`].
    pub ticket: CommitTicket,
    /// The update that was sent.
    pub update: RowUpdate,
    /// The stored row, or the last error.
    pub result: Result<Row, StoreError>,
    /// Number of calls made to the updater.
    pub attempts: u32,
}

impl CommitOutcome {
    /// Returns `true` if the updater accepted the edit.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Receiving half of the completion channel.
#[derive(Debug)]
pub struct CommitReceiver {
    rx: mpsc::UnboundedReceiver<CommitOutcome>,
}

impl CommitReceiver {
    /// Waits for the next outcome. Returns `None` once every committer
    /// handle is dropped and all outcomes were received.
    pub async fn recv(&mut self) -> Option<CommitOutcome> {
        self.rx.recv().await
    }

    /// Returns an outcome if one is ready, without waiting.
    pub fn try_recv(&mut self) -> Option<CommitOutcome> {
        self.rx.try_recv().ok()
    }
}

/// Dispatches committed edits to a row updater.
///
/// Cloning yields another handle feeding the same receiver.
#[derive(Clone)]
pub struct EditCommitter {
    updater: Arc<dyn RowUpdater>,
    caller: Option<UserId>,
    config: CommitConfig,
    next_ticket: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<CommitOutcome>,
}

impl std::fmt::Debug for EditCommitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditCommitter")
            .field("caller", &self.caller)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EditCommitter {
    /// Creates a committer acting as `caller` and its outcome receiver.
    pub fn new(
        updater: Arc<dyn RowUpdater>,
        caller: Option<UserId>,
        config: CommitConfig,
    ) -> (Self, CommitReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let committer = Self {
            updater,
            caller,
            config,
            next_ticket: Arc::new(AtomicU64::new(1)),
            tx,
        };
        (committer, CommitReceiver { rx })
    }

    /// Spawns the update on the current tokio runtime and returns its
    /// ticket without waiting.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn submit(&self, update: RowUpdate) -> CommitTicket {
        let ticket = CommitTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        let updater = Arc::clone(&self.updater);
        let caller = self.caller.clone();
        let config = self.config.clone();
        let tx = self.tx.clone();

        debug!("submitting commit {ticket} for row {}", update.row_id);
        tokio::spawn(async move {
            let (result, attempts) = deliver(updater.as_ref(), caller.as_ref(), &config, &update).await;
            if let Err(e) = &result {
                warn!("commit {ticket} for row {} failed after {attempts} attempt(s): {e}", update.row_id);
            }
            let outcome = CommitOutcome {
                ticket,
                update,
                result,
                attempts,
            };
            if tx.send(outcome).is_err() {
                debug!("commit {ticket} finished after its receiver was dropped");
            }
        });
        ticket
    }
}

/// Calls the updater, applying the configured timeout and retry policy.
async fn deliver(
    updater: &dyn RowUpdater,
    caller: Option<&UserId>,
    config: &CommitConfig,
    update: &RowUpdate,
) -> (Result<Row, StoreError>, u32) {
    let mut retries = 0;
    loop {
        let call = updater.update_row(caller, &update.row_id, update.fields.clone());
        let result = match config.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(StoreError::Timeout(limit))),
            None => call.await,
        };

        match result {
            Err(e) if e.is_retryable() && retries < config.retry.max_retries => {
                let delay = config.retry.delay_for(retries);
                debug!("retrying row {} in {delay:?}: {e}", update.row_id);
                tokio::time::sleep(delay).await;
                retries += 1;
            }
            result => return (result, retries + 1),
        }
    }
}
