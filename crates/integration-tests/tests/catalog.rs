//! Integration tests for the item catalog repository.
//!
//! These tests require a running MongoDB instance, reachable via
//! `MONGOMART_TEST_URI` (default `mongodb://localhost:27017`).
//!
//! Run with: `cargo test -p mongomart-integration-tests -- --ignored`

use mongomart_core::ItemId;
use mongomart_data::db::ItemRepository;
use mongomart_data::models::Item;

use mongomart_integration_tests::{TestContext, sample_item};

/// Nine items across three categories, ids 1..=9.
fn seed_catalog() -> Vec<Item> {
    vec![
        sample_item(1, "Apparel", "Gray Hooded Sweatshirt"),
        sample_item(2, "Apparel", "Green T-Shirt"),
        sample_item(3, "Apparel", "Baseball Cap"),
        sample_item(4, "Kitchen", "Coffee Mug"),
        sample_item(5, "Kitchen", "Water Bottle"),
        sample_item(6, "Stickers", "Sticker Pack"),
        sample_item(7, "Stickers", "Laptop Sticker"),
        sample_item(8, "Stickers", "Bumper Sticker"),
        sample_item(9, "Stickers", "Holographic Sticker"),
    ]
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_get_item_returns_inserted_item_or_none() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let item = repo
        .get_item(ItemId::new(4))
        .await
        .expect("get_item failed")
        .expect("item 4 should exist");
    assert_eq!(item.title, "Coffee Mug");
    assert_eq!(item.category, "Kitchen");

    let missing = repo.get_item(ItemId::new(999)).await.expect("get_item failed");
    assert!(missing.is_none());

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_get_categories_includes_sorted_all_entry() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let categories = repo.get_categories().await.expect("get_categories failed");

    // One entry per distinct category plus exactly one "All"
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["All", "Apparel", "Kitchen", "Stickers"]);

    let all = categories.iter().find(|c| c.name == "All").expect("All entry");
    let sum: i64 = categories
        .iter()
        .filter(|c| c.name != "All")
        .map(|c| c.item_count)
        .sum();
    assert_eq!(all.item_count, sum);
    assert_eq!(all.item_count, 9);

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_paging_reconstructs_filtered_catalog() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let count = repo.get_item_count("Stickers").await.expect("count failed");
    assert_eq!(count, 4);

    // Pages of 3: [6,7,8] then [9], then empty
    let mut seen = Vec::new();
    let mut page = 0;
    loop {
        let items = repo
            .get_items("Stickers", page, 3)
            .await
            .expect("get_items failed");
        assert!(items.len() <= 3);
        if items.is_empty() {
            break;
        }
        seen.extend(items.into_iter().map(|i| i.id.as_i32()));
        page += 1;
    }
    assert_eq!(seen, vec![6, 7, 8, 9]);

    // Out-of-range page is empty, not an error
    let beyond = repo
        .get_items("Stickers", 10, 3)
        .await
        .expect("get_items failed");
    assert!(beyond.is_empty());

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_all_category_lists_whole_catalog_by_ascending_id() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    assert_eq!(repo.get_item_count("All").await.expect("count failed"), 9);

    let items = repo.get_items("All", 0, 100).await.expect("get_items failed");
    let ids: Vec<i32> = items.iter().map(|i| i.id.as_i32()).collect();
    assert_eq!(ids, (1..=9).collect::<Vec<i32>>());

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_search_pages_by_ascending_id() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let count = repo
        .get_search_result_count("sticker")
        .await
        .expect("search count failed");
    assert_eq!(count, 4);

    let first = repo
        .search_items("sticker", 0, 2)
        .await
        .expect("search failed");
    let second = repo
        .search_items("sticker", 1, 2)
        .await
        .expect("search failed");
    let ids: Vec<i32> = first
        .iter()
        .chain(second.iter())
        .map(|i| i.id.as_i32())
        .collect();
    assert_eq!(ids, vec![6, 7, 8, 9]);

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_get_related_items_returns_bounded_sample() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let related = repo.get_related_items().await.expect("related failed");
    assert_eq!(related.len(), 4);

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_add_review_appends_and_preserves_average() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let review = repo
        .add_review(ItemId::new(1), "Fits great", "Ada", 5)
        .await
        .expect("add_review failed");
    assert_eq!(review.author_name, "Ada");

    repo.add_review(ItemId::new(1), "Too warm", "Grace", 3)
        .await
        .expect("add_review failed");

    let item = repo
        .get_item(ItemId::new(1))
        .await
        .expect("get_item failed")
        .expect("item 1 should exist");
    assert_eq!(item.reviews.len(), 2);
    assert_eq!(item.reviews.first().expect("first review").author_name, "Ada");
    assert_eq!(item.reviews.get(1).expect("second review").author_name, "Grace");
    // The stored average is not recomputed on append
    assert!((item.stars_average - 0.0).abs() < f64::EPSILON);

    ctx.teardown().await;
}

#[tokio::test]
#[ignore = "Requires a running MongoDB instance"]
async fn test_add_review_to_missing_item_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.seed_items(&seed_catalog()).await;
    let repo = ItemRepository::new(&ctx.db);

    let result = repo.add_review(ItemId::new(999), "ghost", "Nobody", 1).await;
    assert!(matches!(
        result,
        Err(mongomart_data::db::RepositoryError::NotFound)
    ));

    ctx.teardown().await;
}
