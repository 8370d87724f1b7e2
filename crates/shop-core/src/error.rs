//! # Store Error Types
//!
//! Typed error handling for the shop inventory.
//! All product, store and catalog operations return `Result<T, StoreError>`.

use thiserror::Error;

/// Core error type for all inventory operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Bad constructor or setter argument (empty name, negative price, zero purchase)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested quantity exceeds stock on hand
    #[error("Not enough stock for {product}: requested {requested}, available {available}")]
    OutOfStock {
        product: String,
        requested: u32,
        available: u32,
    },

    /// Requested quantity exceeds a limited product's per-order cap
    #[error("You can only buy up to {maximum} of {product} per order (requested {requested})")]
    LimitExceeded {
        product: String,
        maximum: u32,
        requested: u32,
    },

    /// Product (or promotion) name not found
    #[error("Not found: {name}")]
    NotFound { name: String },

    /// Attempt to mutate a field that is fixed for this product
    #[error("{product}: {field} cannot be changed")]
    ImmutableField {
        product: String,
        field: &'static str,
    },

    /// Catalog document could not be parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Internal error (poisoned lock, serialization)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        StoreError::Validation(message.into())
    }

    /// Shorthand for a missing product or promotion
    pub fn not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound { name: name.into() }
    }

    /// A price total that does not fit in a `Decimal`
    pub fn overflow() -> Self {
        StoreError::Validation("Total price is too large".to_string())
    }

    /// Returns true if the caller can fix the input and try again
    pub fn is_user_error(&self) -> bool {
        !matches!(self, StoreError::Catalog(_) | StoreError::Internal(_))
    }

    /// Short stable label, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => "validation",
            StoreError::OutOfStock { .. } => "out_of_stock",
            StoreError::LimitExceeded { .. } => "limit_exceeded",
            StoreError::NotFound { .. } => "not_found",
            StoreError::ImmutableField { .. } => "immutable_field",
            StoreError::Catalog(_) => "catalog",
            StoreError::Internal(_) => "internal",
        }
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Catalog(err.to_string())
    }
}

/// Result type alias for inventory operations
pub type StoreResult<T> = Result<T, StoreError>;
