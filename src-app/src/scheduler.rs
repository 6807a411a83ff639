//! Debounced Saving
//!
//! Edits hand the scheduler a snapshot; it waits until no new snapshot has
//! arrived for the debounce window, then saves the latest one. Failures are
//! logged and dropped; the next edit schedules a fresh save.

use inspection_checklist::Inspection;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::domain::Entity;
use crate::repository::{InspectionStore, SaveOutcome};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

enum Command {
    Dirty(Box<Inspection>),
    Flush(oneshot::Sender<Option<SaveOutcome>>),
    Shutdown(oneshot::Sender<()>),
}

pub struct SaveScheduler {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl SaveScheduler {
    /// Start the background task on the current runtime
    pub fn spawn(store: Arc<dyn InspectionStore>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(store, debounce, rx));
        Self { tx, task }
    }

    /// Replace the pending snapshot and restart the quiet window
    pub fn mark_dirty(&self, snapshot: Inspection) {
        if self.tx.send(Command::Dirty(Box::new(snapshot))).is_err() {
            log::warn!("save scheduler stopped, dropping snapshot");
        }
    }

    /// Save the pending snapshot now. None if nothing was pending or the save failed.
    pub async fn flush(&self) -> Option<SaveOutcome> {
        let (ack, done) = oneshot::channel();
        self.tx.send(Command::Flush(ack)).ok()?;
        done.await.ok().flatten()
    }

    /// Save whatever is pending and stop the task
    pub async fn shutdown(self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Shutdown(ack)).is_ok() {
            let _ = done.await;
        }
        if let Err(e) = self.task.await {
            log::error!("save scheduler task failed: {}", e);
        }
    }
}

async fn run(
    store: Arc<dyn InspectionStore>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut pending: Option<Inspection> = None;
    loop {
        let command = if pending.is_some() {
            tokio::select! {
                command = rx.recv() => command,
                _ = tokio::time::sleep(debounce) => {
                    save_pending(store.as_ref(), &mut pending).await;
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match command {
            Some(Command::Dirty(snapshot)) => pending = Some(*snapshot),
            Some(Command::Flush(ack)) => {
                let outcome = save_pending(store.as_ref(), &mut pending).await;
                let _ = ack.send(outcome);
            }
            Some(Command::Shutdown(ack)) => {
                save_pending(store.as_ref(), &mut pending).await;
                let _ = ack.send(());
                break;
            }
            None => {
                save_pending(store.as_ref(), &mut pending).await;
                break;
            }
        }
    }
    log::debug!("save scheduler stopped");
}

async fn save_pending(store: &dyn InspectionStore, pending: &mut Option<Inspection>) -> Option<SaveOutcome> {
    let snapshot = pending.take()?;
    let id = snapshot.id();
    match store.save(&id, &snapshot).await {
        Ok(outcome) => {
            log::debug!("saved inspection {} ({:?})", id, outcome.source);
            Some(outcome)
        }
        Err(e) => {
            log::error!("auto-save of inspection {} failed: {}", id, e);
            None
        }
    }
}
