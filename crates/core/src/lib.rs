//! MongoMart Core - Shared types library.
//!
//! This crate provides common types used across all MongoMart components:
//! - `data` - Document-store accessors for the catalog and shopping cart
//! - `integration-tests` - End-to-end tests against a live store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
