//! Typed CRUD data-fetching helpers for the club-management API.
//!
//! Four independent units cover the classic list screens:
//! [`CollectionFetcher`] loads a collection and tracks the maximum id seen in
//! it, [`ItemCreator`] posts a new record and reports the server-assigned
//! result, [`ItemUpdater`] replaces one record in place, and [`ItemDeleter`]
//! removes records after a confirmation prompt. A view wires several units to
//! the same [`SharedCollection`] handle; [`routes`] declares which URL paths
//! map to which views.
//!
//! ```no_run
//! use clubhouse_client::{ApiClient, Club, CollectionFetcher, routes};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new("http://localhost:3000")?;
//! let clubs: CollectionFetcher<Club> = CollectionFetcher::new(client, routes::api::CLUBS);
//!
//! let summary = clubs.fetch().await?;
//! println!("loaded {} clubs, highest id {}", summary.count, summary.max_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod units;

pub use client::ApiClient;
pub use config::Config;
pub use error::{Error, Operation, Result};
pub use models::{Area, Club, Entity, EntityId, Trainer};
pub use state::{
    EditState, SharedCollection, SharedEditState, new_collection, new_edit_state,
};
pub use units::{
    CollectionFetcher, ConfirmPrompt, ConsoleConfirm, DeleteOutcome, FetchSummary, ItemCreator,
    ItemDeleter, ItemUpdater, UpdateOutcome,
};
