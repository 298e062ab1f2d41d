//! Integration test harness for MongoMart.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a local MongoDB, e.g.
//! docker run -d -p 27017:27017 mongo:7
//!
//! # Run the ignored, store-backed tests
//! cargo test -p mongomart-integration-tests -- --ignored
//! ```
//!
//! The connection string is read from `MONGOMART_TEST_URI` (default
//! `mongodb://localhost:27017`). Each [`TestContext`] works in its own
//! uniquely named database and drops it on teardown, so tests can run
//! concurrently against one server.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]

use mongodb::{Client, Database, IndexModel};
use uuid::Uuid;

use mongomart_core::ItemId;
use mongomart_data::db::{CART_COLLECTION, ITEM_COLLECTION};
use mongomart_data::models::{Cart, CartLineItem, Item};

/// Shared context for one store-backed test: a client plus a throwaway
/// database.
pub struct TestContext {
    pub db: Database,
    client: Client,
}

impl TestContext {
    /// Connect to the test server and create a uniquely named database.
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let uri = std::env::var("MONGOMART_TEST_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_owned());
        let client = Client::with_uri_str(&uri)
            .await
            .expect("failed to connect to test MongoDB");
        let name = format!("mongomart_test_{}", Uuid::new_v4().simple());
        let db = client.database(&name);
        Self { db, client }
    }

    /// Insert catalog items and create the text index search relies on.
    pub async fn seed_items(&self, items: &[Item]) {
        let collection = self.db.collection::<Item>(ITEM_COLLECTION);
        collection
            .create_index(
                IndexModel::builder()
                    .keys(bson::doc! {
                        "title": "text",
                        "description": "text",
                        "slogan": "text",
                    })
                    .build(),
            )
            .await
            .expect("failed to create text index");
        if !items.is_empty() {
            collection
                .insert_many(items)
                .await
                .expect("failed to seed items");
        }
    }

    /// Read a user's raw cart document, bypassing the repository.
    pub async fn raw_cart(&self, user_id: &str) -> Option<Cart> {
        self.db
            .collection::<Cart>(CART_COLLECTION)
            .find_one(bson::doc! { "userId": user_id })
            .await
            .expect("failed to read cart")
    }

    /// Drop the throwaway database.
    pub async fn teardown(self) {
        self.db.drop().await.expect("failed to drop test database");
        drop(self.client);
    }
}

/// A catalog item fixture in the shape of the original seed data.
#[must_use]
pub fn sample_item(id: i32, category: &str, title: &str) -> Item {
    Item {
        id: ItemId::new(id),
        title: title.to_owned(),
        description: format!("The top {title} we offer"),
        slogan: "Made of 100% cotton".to_owned(),
        category: category.to_owned(),
        stars_average: 0.0,
        image_url: "/img/products/hoodie.jpg".to_owned(),
        price: "29.99".parse().expect("valid fixture price"),
        reviews: Vec::new(),
    }
}

/// A cart line item fixture snapshotting [`sample_item`] fields.
#[must_use]
pub fn sample_line_item(id: i32, quantity: u32) -> CartLineItem {
    CartLineItem::from_item(&sample_item(id, "Apparel", "Gray Hooded Sweatshirt"), quantity)
}
