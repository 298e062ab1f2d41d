//! Shopping cart domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mongomart_core::{ItemId, UserId};

use super::Item;

/// A shopper's cart, stored in the `cart` collection.
///
/// One cart exists per user. The document is created implicitly by the
/// first [`add_line_item`](crate::db::CartRepository::add_line_item) call
/// and is never deleted at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Owning user. Unique across the collection.
    #[serde(rename = "userId")]
    pub user_id: UserId,
    /// Line items in insertion order. The accessors do not dedup by item
    /// id; callers are expected to check [`find_line_item`] before adding.
    ///
    /// [`find_line_item`]: crate::db::CartRepository::find_line_item
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

/// One line of a cart: a product reference, a quantity, and a snapshot of
/// the item's display fields captured at add-time.
///
/// The snapshot is deliberately denormalized - later catalog edits do not
/// propagate into carts. `quantity` is always positive for a present line
/// item; setting it to zero removes the line item instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Referenced catalog item. A weak back reference, not enforced by the
    /// store.
    #[serde(rename = "_id")]
    pub item_id: ItemId,
    /// Snapshot: display title.
    pub title: String,
    /// Snapshot: long-form description.
    pub description: String,
    /// Snapshot: marketing slogan.
    pub slogan: String,
    /// Snapshot: category tag.
    pub category: String,
    /// Snapshot: average star rating at add-time.
    #[serde(rename = "stars")]
    pub stars_average: f64,
    /// Snapshot: product image path.
    #[serde(rename = "img_url")]
    pub image_url: String,
    /// Snapshot: unit price at add-time.
    pub price: Decimal,
    /// Units of this item in the cart. Always >= 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Build a line item from a catalog item, snapshotting its display
    /// fields.
    #[must_use]
    pub fn from_item(item: &Item, quantity: u32) -> Self {
        Self {
            item_id: item.id,
            title: item.title.clone(),
            description: item.description.clone(),
            slogan: item.slogan.clone(),
            category: item.category.clone(),
            stars_average: item.stars_average,
            image_url: item.image_url.clone(),
            price: item.price,
            quantity,
        }
    }
}
