use std::io::Write;
use std::sync::Arc;

use super::{ErrorSlot, InFlight, new_error_slot, record};
use crate::client::ApiClient;
use crate::error::{Error, Operation, Result};
use crate::models::{Entity, EntityId};
use crate::state::SharedCollection;

/// Yes/no decision gate consulted before a delete request is sent.
///
/// The console implementation blocks on stdin; tests substitute a closure
/// (`|_| false` declines everything).
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Blocking y/n prompt on the controlling terminal.
pub struct ConsoleConfirm;

impl ConfirmPrompt for ConsoleConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

const CONFIRM_MESSAGE: &str = "Delete this item?";

/// Outcome of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The prompt was declined; nothing was sent and nothing changed.
    Cancelled,
    /// The delete went through; this many local rows were removed.
    Removed(usize),
}

/// Removes an entity by id, after confirmation, from both the server and the
/// shared collection.
pub struct ItemDeleter<T> {
    client: ApiClient,
    path: String,
    items: SharedCollection<T>,
    confirm: Arc<dyn ConfirmPrompt>,
    in_flight: InFlight,
    last_error: ErrorSlot,
}

impl<T> Clone for ItemDeleter<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            items: Arc::clone(&self.items),
            confirm: Arc::clone(&self.confirm),
            in_flight: self.in_flight.clone(),
            last_error: Arc::clone(&self.last_error),
        }
    }
}

impl<T: Entity> ItemDeleter<T> {
    pub fn new(client: ApiClient, path: impl Into<String>, items: SharedCollection<T>) -> Self {
        Self {
            client,
            path: path.into(),
            items,
            confirm: Arc::new(ConsoleConfirm),
            in_flight: InFlight::new(),
            last_error: new_error_slot(),
        }
    }

    /// Swap the confirmation gate, e.g. for a test double.
    pub fn with_confirmer(mut self, confirm: impl ConfirmPrompt + 'static) -> Self {
        self.confirm = Arc::new(confirm);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_set()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    /// Ask for confirmation, then DELETE `{path}/{id}` and drop every local
    /// row whose id matches.
    ///
    /// Declining the prompt is a complete no-op: no request, no state
    /// change, not even the error slot. On request failure the collection is
    /// left untouched and the error is recorded as well as returned.
    pub async fn delete(&self, id: &EntityId) -> Result<DeleteOutcome> {
        if !self.confirm.confirm(CONFIRM_MESSAGE) {
            tracing::debug!("delete of {}/{} declined at the prompt", self.path, id);
            return Ok(DeleteOutcome::Cancelled);
        }

        let _guard = self
            .in_flight
            .acquire()
            .ok_or(Error::RequestInFlight(Operation::Delete))?;
        self.last_error.lock().await.take();

        if let Err(err) = self.client.delete_item(&self.path, id).await {
            return Err(record(&self.last_error, err).await);
        }

        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|item| item.id() != *id);
        let removed = before - items.len();

        tracing::debug!("removed {} local row(s) for {}/{}", removed, self.path, id);
        Ok(DeleteOutcome::Removed(removed))
    }
}
