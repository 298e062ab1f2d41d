//! Domain models for the catalog and cart collections.
//!
//! These types mirror the stored document shapes: serde renames map the
//! collections' historical field names (`_id`, `img_url`, `userId`, ...) to
//! idiomatic Rust names, so existing data deserializes unchanged.

pub mod cart;
pub mod item;

pub use cart::{Cart, CartLineItem};
pub use item::{Category, Item, Review};
