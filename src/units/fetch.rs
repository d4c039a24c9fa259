use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{ErrorSlot, InFlight, new_error_slot, record};
use crate::client::ApiClient;
use crate::error::{Error, Operation, Result};
use crate::models::Entity;
use crate::state::{SharedCollection, new_collection};

/// What a successful fetch loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub count: usize,
    pub max_id: i64,
    pub max_secondary_id: i64,
}

/// Loads a whole entity collection from `GET {path}` and tracks the maximum
/// id and maximum secondary id seen in it.
///
/// The handle from [`collection`](Self::collection) is the list a view
/// renders; hand the same handle to [`ItemUpdater`](super::ItemUpdater) and
/// [`ItemDeleter`](super::ItemDeleter) so every unit mutates the one list.
pub struct CollectionFetcher<T> {
    client: ApiClient,
    path: String,
    items: SharedCollection<T>,
    max_id: Arc<AtomicI64>,
    max_secondary_id: Arc<AtomicI64>,
    in_flight: InFlight,
    last_error: ErrorSlot,
}

impl<T> Clone for CollectionFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            items: Arc::clone(&self.items),
            max_id: Arc::clone(&self.max_id),
            max_secondary_id: Arc::clone(&self.max_secondary_id),
            in_flight: self.in_flight.clone(),
            last_error: Arc::clone(&self.last_error),
        }
    }
}

impl<T: Entity> CollectionFetcher<T> {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            items: new_collection(),
            max_id: Arc::new(AtomicI64::new(0)),
            max_secondary_id: Arc::new(AtomicI64::new(0)),
            in_flight: InFlight::new(),
            last_error: new_error_slot(),
        }
    }

    /// Handle to the fetched collection.
    pub fn collection(&self) -> SharedCollection<T> {
        Arc::clone(&self.items)
    }

    /// Maximum numeric id across the last fetched collection, 0 when empty.
    pub fn max_id(&self) -> i64 {
        self.max_id.load(Ordering::SeqCst)
    }

    /// Maximum secondary id across entities that carry one, 0 when none do.
    pub fn max_secondary_id(&self) -> i64 {
        self.max_secondary_id.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_set()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    /// Replace the collection with the server's current list and recompute
    /// both maxima.
    ///
    /// On any failure the collection and the maxima are left exactly as they
    /// were; the error is recorded in the error slot as well as returned. A
    /// call made while another fetch is pending is rejected without touching
    /// any state.
    pub async fn fetch(&self) -> Result<FetchSummary> {
        let _guard = self
            .in_flight
            .acquire()
            .ok_or(Error::RequestInFlight(Operation::Fetch))?;
        self.last_error.lock().await.take();

        let fetched: Vec<T> = match self.client.get_list(&self.path).await {
            Ok(items) => items,
            Err(err) => return Err(record(&self.last_error, err).await),
        };

        // 0 participates in both maxima, so all-negative ids still yield 0.
        let max_id = fetched
            .iter()
            .filter_map(|item| item.id().as_number())
            .fold(0, i64::max);
        let max_secondary_id = fetched
            .iter()
            .filter_map(Entity::secondary_id)
            .fold(0, i64::max);

        let count = fetched.len();
        *self.items.lock().await = fetched;
        self.max_id.store(max_id, Ordering::SeqCst);
        self.max_secondary_id.store(max_secondary_id, Ordering::SeqCst);

        tracing::debug!(
            "fetched {} items from {} (max_id: {}, max_secondary_id: {})",
            count,
            self.path,
            max_id,
            max_secondary_id
        );
        Ok(FetchSummary {
            count,
            max_id,
            max_secondary_id,
        })
    }
}
