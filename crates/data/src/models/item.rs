//! Catalog item domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mongomart_core::ItemId;

/// A catalog item, stored in the `item` collection.
///
/// The `_id` is assigned externally (by the catalog import), not by the
/// store, and identifies the item for its lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item ID.
    #[serde(rename = "_id")]
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Marketing slogan.
    pub slogan: String,
    /// Category tag, non-empty; used for both filtering and aggregation.
    pub category: String,
    /// Average star rating shown on listings. Not recomputed when a review
    /// is appended.
    #[serde(rename = "stars")]
    pub stars_average: f64,
    /// Product image path.
    #[serde(rename = "img_url")]
    pub image_url: String,
    /// Unit price.
    pub price: Decimal,
    /// Customer reviews, in submission order. Append-only.
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// A customer review, embedded in an [`Item`].
///
/// Immutable once appended; there is no edit or delete operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer's display name.
    #[serde(rename = "name")]
    pub author_name: String,
    /// Free-text comment.
    pub comment: String,
    /// Star rating, 1-5.
    #[serde(rename = "stars")]
    pub star_rating: i32,
    /// Submission time, assigned server-side at append.
    #[serde(
        rename = "date",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub submitted_at: DateTime<Utc>,
}

/// One entry of the category listing: a distinct category value and how many
/// items carry it. Produced by aggregation, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Category name, or the synthetic `"All"` entry.
    pub name: String,
    /// Number of items in this category.
    pub item_count: i64,
}
