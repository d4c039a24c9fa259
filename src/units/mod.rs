pub mod create;
pub mod delete;
pub mod fetch;
pub mod update;

pub use create::ItemCreator;
pub use delete::{ConfirmPrompt, ConsoleConfirm, DeleteOutcome, ItemDeleter};
pub use fetch::{CollectionFetcher, FetchSummary};
pub use update::{ItemUpdater, UpdateOutcome};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::error::Error;

/// Last request error a unit observed, overwritten on each new failure and
/// cleared when a fresh attempt is accepted.
pub(crate) type ErrorSlot = Arc<Mutex<Option<String>>>;

pub(crate) fn new_error_slot() -> ErrorSlot {
    Arc::new(Mutex::new(None))
}

/// Record `err` in the slot and hand it back for returning.
pub(crate) async fn record(slot: &ErrorSlot, err: Error) -> Error {
    *slot.lock().await = Some(err.to_string());
    err
}

/// One-at-a-time gate shared by a unit's clones.
///
/// Taking the gate flips the flag; dropping the returned guard releases it
/// on every exit path, including early returns.
#[derive(Clone)]
pub(crate) struct InFlight {
    flag: Arc<AtomicBool>,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Try to take the gate. `None` means another call is still pending.
    pub(crate) fn acquire(&self) -> Option<InFlightGuard> {
        self.flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(InFlightGuard {
            flag: Arc::clone(&self.flag),
        })
    }
}

pub(crate) struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
