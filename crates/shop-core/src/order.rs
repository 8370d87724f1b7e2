//! # Order Types
//!
//! Order lines submitted to [`Store::order`](crate::Store::order) and the
//! receipt it hands back once an order is committed.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (product, quantity) pair within an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product name, as registered in the store
    pub product: String,

    /// Units requested
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product: impl Into<String>, quantity: u32) -> Self {
        Self {
            product: product.into(),
            quantity,
        }
    }
}

/// A priced line on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    /// Product name
    pub product: String,

    /// Units bought
    pub quantity: u32,

    /// Unit price at the time of purchase
    pub unit_price: Decimal,

    /// Promotion applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,

    /// Line total after promotion
    pub total: Decimal,
}

/// Record of a committed order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique receipt ID (generated)
    pub id: String,

    /// Lines, in the order they were submitted
    pub lines: Vec<ReceiptLine>,

    /// Sum of the line totals
    pub total: Decimal,

    /// Commit timestamp
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Build a receipt from priced lines.
    ///
    /// Fails if the line totals add up to more than a `Decimal` can hold.
    pub fn new(lines: Vec<ReceiptLine>) -> StoreResult<Self> {
        let total = lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total))
            .ok_or_else(StoreError::overflow)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            lines,
            total,
            created_at: Utc::now(),
        })
    }

    /// Total number of units on the receipt
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Internal(e.to_string()))
    }
}
