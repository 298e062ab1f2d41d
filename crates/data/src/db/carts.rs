//! Shopping cart repository.
//!
//! Read/write operations over the `cart` collection, keyed by user. All
//! writes are single atomic find-and-modify requests - upsert-push for
//! adds, positional-set or pull for quantity changes - so concurrent calls
//! against the same cart cannot lose updates to read-modify-write races.

use bson::{Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::Deserialize;

use mongomart_core::{ItemId, UserId};

use super::{CART_COLLECTION, RepositoryError};
use crate::models::{Cart, CartLineItem};

/// Result shape of the positional `items.$` projection: the matched line
/// item alone, without the rest of the cart.
#[derive(Debug, Deserialize)]
struct MatchedLineItem {
    #[serde(default)]
    items: Vec<CartLineItem>,
}

/// Repository for cart operations.
pub struct CartRepository<'a> {
    db: &'a Database,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository over a shared database handle.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Cart> {
        self.db.collection(CART_COLLECTION)
    }

    /// Fetch a user's cart.
    ///
    /// Returns `Ok(None)` when the user has no cart yet - a normal outcome,
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_cart(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError> {
        Ok(self
            .collection()
            .find_one(doc! { "userId": user_id.as_str() })
            .await?)
    }

    /// Fetch the single line item for `item_id` in the user's cart, or
    /// `Ok(None)` if the cart does not contain it.
    ///
    /// Uses a store-level positional match with an `items.$` projection, so
    /// only the matched element crosses the wire regardless of cart size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_line_item(
        &self,
        user_id: &UserId,
        item_id: ItemId,
    ) -> Result<Option<CartLineItem>, RepositoryError> {
        let matched = self
            .db
            .collection::<MatchedLineItem>(CART_COLLECTION)
            .find_one(line_item_filter(user_id, item_id))
            .projection(doc! { "items.$": 1, "_id": 0 })
            .await?;

        Ok(matched.and_then(|m| m.items.into_iter().next()))
    }

    /// Append a line item to the user's cart, creating the cart if it does
    /// not exist yet.
    ///
    /// Create-or-append is one atomic upsert, not a check-then-insert, so
    /// two concurrent first-adds for the same user cannot race into
    /// duplicate carts. No dedup by item id is performed; callers wanting
    /// "bump the quantity instead" should check [`Self::find_line_item`]
    /// first.
    ///
    /// Returns the post-update cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails, or
    /// `RepositoryError::DataCorruption` if the line item cannot be
    /// serialized or the upsert yields no document.
    pub async fn add_line_item(
        &self,
        user_id: &UserId,
        line_item: &CartLineItem,
    ) -> Result<Cart, RepositoryError> {
        let line_item_bson = bson::to_bson(line_item).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize line item: {e}"))
        })?;

        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "userId": user_id.as_str() },
                doc! { "$push": { "items": line_item_bson } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        // With upsert + return-after the store always hands back a document
        updated.ok_or_else(|| {
            RepositoryError::DataCorruption("upsert returned no cart document".to_owned())
        })
    }

    /// Set a line item's quantity, or remove it when `quantity` is zero.
    ///
    /// - `quantity > 0`: positional `$set` of that line item's quantity.
    /// - `quantity == 0`: `$pull` of the whole line item - quantity zero is
    ///   a deletion, never a stored state.
    ///
    /// Either way this is one atomic update matching `userId` + `itemId`.
    /// Returns the post-update cart, or `Ok(None)` when no line item
    /// matched - the caller must not mistake that for a successful update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_line_item_quantity(
        &self,
        user_id: &UserId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<Option<Cart>, RepositoryError> {
        Ok(self
            .collection()
            .find_one_and_update(
                line_item_filter(user_id, item_id),
                quantity_update(item_id, quantity),
            )
            .return_document(ReturnDocument::After)
            .await?)
    }
}

/// Filter matching one line item within one user's cart. Shared by the
/// positional lookup and the quantity update so both target the same
/// element.
fn line_item_filter(user_id: &UserId, item_id: ItemId) -> Document {
    doc! { "userId": user_id.as_str(), "items._id": item_id.as_i32() }
}

/// Build the update document for a quantity change: positional set for a
/// positive quantity, pull for zero.
fn quantity_update(item_id: ItemId, quantity: u32) -> Document {
    if quantity == 0 {
        doc! { "$pull": { "items": { "_id": item_id.as_i32() } } }
    } else {
        doc! { "$set": { "items.$.quantity": i64::from(quantity) } }
    }
}
