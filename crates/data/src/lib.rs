//! MongoMart data layer.
//!
//! This crate provides the two document-store accessors behind the MongoMart
//! storefront: the item catalog ([`db::ItemRepository`]) and the shopping
//! cart ([`db::CartRepository`]). Both are stateless request-response
//! wrappers over a shared [`mongodb::Database`] handle - every operation is
//! a single query or a single atomic update, and no state is held between
//! calls.
//!
//! The HTTP front end that invokes these accessors lives elsewhere; this
//! crate exposes plain async methods returning `Result`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
