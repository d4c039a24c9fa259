use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use super::{ErrorSlot, InFlight, new_error_slot, record};
use crate::client::ApiClient;
use crate::error::{Error, Operation, Result};
use crate::models::Entity;

/// Submits a new entity and reports the server-assigned record back.
///
/// The unit keeps no list of its own: the decoded response entity is returned
/// to the caller, who owns merging it into whatever collection the view
/// renders.
pub struct ItemCreator<T> {
    client: ApiClient,
    path: String,
    in_flight: InFlight,
    last_error: ErrorSlot,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for ItemCreator<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            in_flight: self.in_flight.clone(),
            last_error: Arc::clone(&self.last_error),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> ItemCreator<T> {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            in_flight: InFlight::new(),
            last_error: new_error_slot(),
            _entity: PhantomData,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_set()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    /// POST `payload` to the resource and decode the created entity.
    ///
    /// `payload` is the new record without its server-assigned id. On any
    /// failure nothing is mutated; the error is recorded in the error slot
    /// as well as returned.
    pub async fn create<P>(&self, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
    {
        let _guard = self
            .in_flight
            .acquire()
            .ok_or(Error::RequestInFlight(Operation::Create))?;
        self.last_error.lock().await.take();

        match self.client.post_json(&self.path, payload).await {
            Ok(created) => {
                tracing::debug!(
                    "created item {} under {}",
                    Entity::id(&created),
                    self.path
                );
                Ok(created)
            }
            Err(err) => Err(record(&self.last_error, err).await),
        }
    }
}
