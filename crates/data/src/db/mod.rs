//! Document-store access for MongoMart.
//!
//! # Database: `mongomart`
//!
//! ## Collections
//!
//! - `item` - Catalog items with embedded reviews
//! - `cart` - One cart document per user
//!
//! Both repositories borrow a shared [`Database`] handle created by
//! [`connect`]; the driver manages its own connection pooling, so a single
//! handle is safe for concurrent in-flight operations. Repositories hold no
//! state of their own.
//!
//! Full-text search over `item` assumes a text index on the title,
//! description, and slogan fields (created by the catalog import, or by the
//! test harness).

use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::DataConfig;

pub mod carts;
pub mod items;

pub use carts::CartRepository;
pub use items::ItemRepository;

/// Collection holding catalog items.
pub const ITEM_COLLECTION: &str = "item";
/// Collection holding carts, keyed by `userId`.
pub const CART_COLLECTION: &str = "cart";

/// Errors surfaced by the repositories.
///
/// Absent documents (no such item, no cart yet, no matching line item) are
/// NOT errors - those come back as `Ok(None)`. `NotFound` is reserved for
/// updates whose filter matched zero documents, which would otherwise be
/// indistinguishable from success.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Store-level I/O failure (connection, timeout, driver). Always fatal
    /// to the current operation; never retried here.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored document failed to (de)serialize against the model types.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// An update's filter matched no document.
    #[error("no matching document")]
    NotFound,
}

/// Connect to the document store and return a database handle.
///
/// The handle is cheap to clone and safe to share across concurrent
/// operations; pass it to [`ItemRepository::new`] and
/// [`CartRepository::new`].
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the connection string cannot be
/// parsed or the client cannot be constructed. Note the driver connects
/// lazily, so an unreachable server surfaces on first use rather than here.
pub async fn connect(config: &DataConfig) -> Result<Database, RepositoryError> {
    let mut options = ClientOptions::parse(config.database_url.expose_secret()).await?;
    options.app_name = Some("mongomart".to_owned());
    options.server_selection_timeout = Some(Duration::from_secs(10));

    let client = Client::with_options(options)?;
    let database = client.database(&config.database_name);
    tracing::debug!(database = %config.database_name, "document store handle created");
    Ok(database)
}
