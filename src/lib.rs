//! Item Server - HTTP CRUD API over a MongoDB collection
//!
//! This crate exposes a single resource, the *item* (a store-assigned
//! identifier plus a name), over a small REST API:
//!
//! - `GET /items` - List all items
//! - `GET /items/{id}` - Get an item by id
//! - `POST /items` - Create an item
//! - `PUT /items/{id}` - Replace an item's fields
//! - `DELETE /items/{id}` - Delete an item
//!
//! plus `GET /health` and `GET /ready` probes.
//!
//! Handlers never touch the driver directly. They go through the
//! [`gateway::Gateway`], which bounds every store call with the configured
//! deadline and hides whether items live in MongoDB or in memory.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod id;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use gateway::{Gateway, ItemStore, StoreError};
pub use id::ItemId;
pub use model::{Item, NewItem};
pub use server::{build_router, start_server};
pub use state::ServerState;
