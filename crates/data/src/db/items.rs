//! Item catalog repository.
//!
//! Read-mostly queries over the `item` collection: category aggregation,
//! paged and searchable listings with matching counts, single-item lookup,
//! and review appends. Every method issues exactly one store request.

use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, Database};
use serde::Deserialize;

use mongomart_core::ItemId;

use super::{ITEM_COLLECTION, RepositoryError};
use crate::models::{Category, Item, Review};

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Number of items returned by [`ItemRepository::get_related_items`].
const RELATED_SAMPLE_SIZE: i64 = 4;

/// One row of the group-by-category aggregation.
#[derive(Debug, Deserialize)]
struct CategoryRow {
    #[serde(rename = "_id")]
    name: String,
    num: i64,
}

/// Repository for catalog operations.
pub struct ItemRepository<'a> {
    db: &'a Database,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository over a shared database handle.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Item> {
        self.db.collection(ITEM_COLLECTION)
    }

    /// List the distinct categories and how many items each contains, plus
    /// one synthetic `"All"` entry counting every item.
    ///
    /// The list is sorted case-insensitively by name. `"All"` takes part in
    /// that sort rather than being pinned first, so its position depends on
    /// the real category names present (e.g. it lands after `"Accessories"`
    /// but before `"Apparel"`). Long-standing storefront behavior; see
    /// DESIGN.md before changing it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the aggregation fails, or
    /// `RepositoryError::DataCorruption` if a result row has an unexpected
    /// shape.
    pub async fn get_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut cursor = self
            .collection()
            .aggregate(vec![doc! {
                "$group": { "_id": "$category", "num": { "$sum": 1 } }
            }])
            .await?;

        let mut rows = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            let row: CategoryRow = bson::from_document(document).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid category aggregation row: {e}"))
            })?;
            rows.push(row);
        }

        Ok(merge_categories(rows))
    }

    /// Fetch one page of items in `category`, ordered by ascending id.
    ///
    /// `category` may be [`ALL_CATEGORIES`] to list the whole catalog.
    /// `page` is zero-indexed; out-of-range pages return an empty vec, not
    /// an error. Page bounds are the caller's concern - compute them from
    /// [`Self::get_item_count`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_items(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Item>, RepositoryError> {
        let cursor = self
            .collection()
            .find(category_filter(category))
            .sort(doc! { "_id": 1 })
            .skip(u64::from(page) * u64::from(page_size))
            .limit(i64::from(page_size))
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Count the items matching `category`, using the identical filter as
    /// [`Self::get_items`] so pagination metadata stays consistent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the count fails.
    pub async fn get_item_count(&self, category: &str) -> Result<u64, RepositoryError> {
        Ok(self
            .collection()
            .count_documents(category_filter(category))
            .await?)
    }

    /// Fetch one page of full-text search results, ordered by ascending id.
    ///
    /// Ordering is by id rather than search relevance so that paging is
    /// deterministic. Same pagination contract as [`Self::get_items`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including
    /// when no text index exists on the collection).
    pub async fn search_items(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Item>, RepositoryError> {
        let cursor = self
            .collection()
            .find(text_search_filter(query))
            .sort(doc! { "_id": 1 })
            .skip(u64::from(page) * u64::from(page_size))
            .limit(i64::from(page_size))
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Count the items matching a full-text search, using the identical
    /// filter as [`Self::search_items`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the count fails.
    pub async fn get_search_result_count(&self, query: &str) -> Result<u64, RepositoryError> {
        Ok(self
            .collection()
            .count_documents(text_search_filter(query))
            .await?)
    }

    /// Fetch a single item by id.
    ///
    /// Returns `Ok(None)` when no item has that id - a normal outcome the
    /// caller renders as "not found", not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_item(&self, item_id: ItemId) -> Result<Option<Item>, RepositoryError> {
        Ok(self
            .collection()
            .find_one(doc! { "_id": item_id.as_i32() })
            .await?)
    }

    /// Fetch a fixed-size sample of items to show as "related".
    ///
    /// Placeholder for a real recommender: no relatedness is computed, the
    /// first four items by natural order are returned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_related_items(&self) -> Result<Vec<Item>, RepositoryError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .limit(RELATED_SAMPLE_SIZE)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Append a review to an item, with a server-assigned submission time.
    ///
    /// Does not recompute the item's `stars` average. The append is a
    /// single atomic `$push`; a blind push against a missing id would
    /// succeed silently, so the matched count is checked and a missing item
    /// is surfaced as `RepositoryError::NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has `item_id`, or
    /// `RepositoryError::Database` if the update fails.
    pub async fn add_review(
        &self,
        item_id: ItemId,
        comment: &str,
        author_name: &str,
        star_rating: i32,
    ) -> Result<Review, RepositoryError> {
        let review = Review {
            author_name: author_name.to_owned(),
            comment: comment.to_owned(),
            star_rating,
            submitted_at: chrono::Utc::now(),
        };
        let review_bson = bson::to_bson(&review).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize review: {e}"))
        })?;

        let result = self
            .collection()
            .update_one(
                doc! { "_id": item_id.as_i32() },
                doc! { "$push": { "reviews": review_bson } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(review)
    }
}

/// Build the find filter for a category, treating [`ALL_CATEGORIES`] as "no
/// filter". Shared by the listing and the count so both see the same set.
fn category_filter(category: &str) -> Document {
    if category == ALL_CATEGORIES {
        doc! {}
    } else {
        doc! { "category": category }
    }
}

/// Build the full-text search filter shared by search and its count.
fn text_search_filter(query: &str) -> Document {
    doc! { "$text": { "$search": query } }
}

/// Append the synthetic `"All"` entry and sort case-insensitively by name.
///
/// `"All"` carries the sum of every per-category count and is sorted into
/// position like any other name.
fn merge_categories(rows: Vec<CategoryRow>) -> Vec<Category> {
    let total: i64 = rows.iter().map(|row| row.num).sum();

    let mut categories: Vec<Category> = rows
        .into_iter()
        .map(|row| Category {
            name: row.name,
            item_count: row.num,
        })
        .collect();
    categories.push(Category {
        name: ALL_CATEGORIES.to_owned(),
        item_count: total,
    });

    categories.sort_by(|a, b| a.name.to_uppercase().cmp(&b.name.to_uppercase()));
    categories
}
