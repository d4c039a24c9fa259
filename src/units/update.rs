use std::sync::Arc;

use super::{ErrorSlot, InFlight, new_error_slot, record};
use crate::client::ApiClient;
use crate::error::{Error, Operation, Result};
use crate::models::Entity;
use crate::state::{SharedCollection, SharedEditState};

/// Outcome of an update the server accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The matching row was replaced in the shared collection.
    Replaced,
    /// The server took the write but no local row carries that id; the list
    /// the user is looking at is out of date.
    StaleLocalState,
}

/// Submits a full replace of one entity and keeps the shared collection and
/// editing state in step with it.
pub struct ItemUpdater<T> {
    client: ApiClient,
    path: String,
    items: SharedCollection<T>,
    edit_state: SharedEditState<T>,
    in_flight: InFlight,
    last_error: ErrorSlot,
}

impl<T> Clone for ItemUpdater<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            items: Arc::clone(&self.items),
            edit_state: Arc::clone(&self.edit_state),
            in_flight: self.in_flight.clone(),
            last_error: Arc::clone(&self.last_error),
        }
    }
}

impl<T: Entity> ItemUpdater<T> {
    pub fn new(
        client: ApiClient,
        path: impl Into<String>,
        items: SharedCollection<T>,
        edit_state: SharedEditState<T>,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            items,
            edit_state,
            in_flight: InFlight::new(),
            last_error: new_error_slot(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_set()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    /// PUT the full entity to `{path}/{id}` and replace the matching row in
    /// the shared collection.
    ///
    /// Editing state is cleared on any accepted write, matching row or not;
    /// a write the local list cannot apply is reported as
    /// [`UpdateOutcome::StaleLocalState`]. On failure the collection, the
    /// editing state, and the edited-item slot are all left untouched.
    pub async fn update(&self, item: T) -> Result<UpdateOutcome> {
        let _guard = self
            .in_flight
            .acquire()
            .ok_or(Error::RequestInFlight(Operation::Update))?;
        self.last_error.lock().await.take();

        let id = item.id();
        if let Err(err) = self.client.put_json(&self.path, &id, &item).await {
            return Err(record(&self.last_error, err).await);
        }

        let outcome = {
            let mut items = self.items.lock().await;
            match items.iter().position(|existing| existing.id() == id) {
                Some(index) => {
                    items[index] = item;
                    UpdateOutcome::Replaced
                }
                None => {
                    tracing::warn!(
                        "server updated {}/{} but no local row carries that id",
                        self.path,
                        id
                    );
                    UpdateOutcome::StaleLocalState
                }
            }
        };

        self.edit_state.lock().await.clear();
        tracing::debug!("updated {}/{} ({:?})", self.path, id, outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Club, EntityId};
    use crate::state::{new_collection, new_edit_state};
    use axum::extract::Path;
    use axum::{Json, Router, routing::put};
    use serde_json::Value;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn club(id: i64, name: &str) -> Club {
        Club {
            id: EntityId::Num(id),
            name: name.to_string(),
            address: None,
        }
    }

    async fn updater_with(
        app: Router,
        seed: Vec<Club>,
    ) -> (ItemUpdater<Club>, SharedCollection<Club>, SharedEditState<Club>) {
        let base = serve(app).await;
        let items = new_collection();
        *items.lock().await = seed;
        let edit_state = new_edit_state();
        let updater = ItemUpdater::new(
            ApiClient::new(base).unwrap(),
            "/clubs",
            Arc::clone(&items),
            Arc::clone(&edit_state),
        );
        (updater, items, edit_state)
    }

    fn accept_all() -> Router {
        Router::new().route(
            "/clubs/{id}",
            put(|| async { axum::http::StatusCode::OK }),
        )
    }

    #[tokio::test]
    async fn update_replaces_matching_row_and_clears_editing() {
        let seed = vec![club(1, "Alpha"), club(2, "Beta")];
        let (updater, items, edit_state) = updater_with(accept_all(), seed).await;
        edit_state.lock().await.begin(club(2, "Beta"));

        let outcome = updater.update(club(2, "y")).await.unwrap();

        assert_eq!(outcome, UpdateOutcome::Replaced);
        {
            let items = items.lock().await;
            assert_eq!(items.len(), 2);
            assert_eq!(items[1], club(2, "y"));
            assert_eq!(items[0], club(1, "Alpha"));
        }
        let edit = edit_state.lock().await;
        assert!(!edit.editing);
        assert!(edit.item.is_none());
    }

    #[tokio::test]
    async fn update_sends_full_entity_to_id_path() {
        let captured: Arc<StdMutex<Option<(String, Value)>>> = Arc::new(StdMutex::new(None));
        let sink = Arc::clone(&captured);
        let app = Router::new().route(
            "/clubs/{id}",
            put(
                move |Path(id): Path<String>, Json(body): Json<Value>| async move {
                    *sink.lock().unwrap() = Some((id, body));
                    axum::http::StatusCode::OK
                },
            ),
        );
        let (updater, _items, _edit) = updater_with(app, vec![club(2, "Beta")]).await;

        updater
            .update(Club {
                id: EntityId::Num(2),
                name: "y".to_string(),
                address: Some("1 Main St".to_string()),
            })
            .await
            .unwrap();

        let (id, body) = captured.lock().unwrap().take().unwrap();
        assert_eq!(id, "2");
        assert_eq!(
            body,
            serde_json::json!({"id": 2, "name": "y", "address": "1 Main St"})
        );
    }

    #[tokio::test]
    async fn update_without_matching_row_reports_stale_state() {
        let seed = vec![club(1, "Alpha")];
        let (updater, items, edit_state) = updater_with(accept_all(), seed).await;
        edit_state.lock().await.begin(club(5, "Ghost"));

        let outcome = updater.update(club(5, "Ghost")).await.unwrap();

        assert_eq!(outcome, UpdateOutcome::StaleLocalState);
        {
            let items = items.lock().await;
            assert_eq!(items.len(), 1);
            assert_eq!(items[0], club(1, "Alpha"));
        }
        // The server-side write went through, so editing still ends.
        assert!(!edit_state.lock().await.editing);
    }

    #[tokio::test]
    async fn failed_update_leaves_collection_and_editing_untouched() {
        let app = Router::new().route(
            "/clubs/{id}",
            put(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let seed = vec![club(2, "Beta")];
        let (updater, items, edit_state) = updater_with(app, seed).await;
        edit_state.lock().await.begin(club(2, "Beta"));

        let err = updater.update(club(2, "y")).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Http {
                op: Operation::Update,
                ..
            }
        ));
        assert_eq!(items.lock().await[0], club(2, "Beta"));
        let edit = edit_state.lock().await;
        assert!(edit.editing);
        assert_eq!(edit.item, Some(club(2, "Beta")));
        let message = updater.last_error().await.unwrap();
        assert!(message.starts_with("Error updating item from"));
    }

    #[tokio::test]
    async fn second_update_while_pending_is_rejected() {
        let app = Router::new().route(
            "/clubs/{id}",
            put(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                axum::http::StatusCode::OK
            }),
        );
        let (updater, _items, _edit) = updater_with(app, vec![club(1, "Alpha")]).await;

        let slow = updater.clone();
        let pending = tokio::spawn(async move { slow.update(club(1, "first")).await });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let err = updater.update(club(1, "second")).await.unwrap_err();
        assert!(matches!(err, Error::RequestInFlight(Operation::Update)));

        pending.await.unwrap().unwrap();
    }
}
