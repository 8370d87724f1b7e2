//! # shop-core
//!
//! Core types for the shop-rs retail inventory.
//!
//! This crate provides:
//! - `Product` with its `Standard`, `NonStocked` and `Limited` variants
//! - `Promotion` pricing rules shared between products
//! - `Store` with atomic multi-line `order` returning a `Receipt`
//! - `Catalog` for seeding a store from TOML
//! - `SharedStore` for use from more than one thread
//! - `StoreError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use shop_core::{OrderLine, Product, Promotion, Store};
//! use std::sync::Arc;
//!
//! let promo = Arc::new(Promotion::third_one_free("Third One Free!"));
//!
//! let mut store = Store::new();
//! store.add_product(
//!     Product::new("Earbuds", Decimal::from(250), 500)?.with_promotion(promo),
//! );
//! store.add_product(Product::limited("Shipping", Decimal::from(10), 250, 1)?);
//!
//! let receipt = store.order(&[
//!     OrderLine::new("Earbuds", 3),
//!     OrderLine::new("Shipping", 1),
//! ])?;
//! assert_eq!(receipt.total, Decimal::from(510));
//! # Ok::<(), shop_core::StoreError>(())
//! ```

pub mod catalog;
pub mod error;
pub mod order;
pub mod product;
pub mod promotion;
pub mod shared;
pub mod store;

// Re-exports for convenience
pub use catalog::{Catalog, ProductEntry, ProductKindEntry, PromotionEntry, PromotionKind};
pub use error::{StoreError, StoreResult};
pub use order::{OrderLine, Receipt, ReceiptLine};
pub use product::{Product, ProductKind};
pub use promotion::{Promotion, PromotionRule};
pub use shared::SharedStore;
pub use store::{Store, StoreOptions};
