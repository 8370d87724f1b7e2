//! # Promotions
//!
//! Pricing rules applied at purchase time.
//!
//! ## Design Pattern
//!
//! A promotion is a strategy for pricing N units of a product. The set of
//! rules is closed, so it is a plain enum matched in one place rather than a
//! trait object per rule.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Promotion { name, rule }                    │
//! │  └── apply(unit_price, quantity) -> StoreResult<Decimal>    │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!          ┌─────────────────┼─────────────────┐
//!          │                 │                 │
//!  ┌───────┴───────┐ ┌───────┴───────┐ ┌───────┴───────┐
//!  │PercentDiscount│ │SecondHalfPrice│ │ ThirdOneFree  │
//!  └───────────────┘ └───────────────┘ └───────────────┘
//! ```
//!
//! Promotions are immutable and handed out as `Arc<Promotion>` so one rule
//! can be attached to any number of products.

use crate::error::{StoreError, StoreResult};
use rust_decimal::Decimal;
use std::fmt;

/// The pricing rule behind a promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionRule {
    /// Flat percentage off the line total, 0 < percent < 100
    PercentDiscount { percent: Decimal },
    /// Every second unit at half price
    SecondHalfPrice,
    /// Every third unit free
    ThirdOneFree,
}

impl PromotionRule {
    /// Total price for `quantity` units at `unit_price`.
    ///
    /// Pure; callers guarantee `quantity > 0`. No rounding is applied.
    /// Fails with a validation error if the total does not fit in a `Decimal`.
    pub fn apply(&self, unit_price: Decimal, quantity: u32) -> StoreResult<Decimal> {
        let units = |n: u32| unit_price.checked_mul(Decimal::from(n));
        let total = match *self {
            PromotionRule::PercentDiscount { percent } => {
                let factor = percent
                    .checked_div(Decimal::ONE_HUNDRED)
                    .and_then(|off| Decimal::ONE.checked_sub(off));
                units(quantity)
                    .zip(factor)
                    .and_then(|(total, factor)| total.checked_mul(factor))
            }
            PromotionRule::SecondHalfPrice => {
                let half_priced = quantity / 2;
                let full_priced = quantity - half_priced;
                let half = units(half_priced).and_then(|h| h.checked_div(Decimal::TWO));
                units(full_priced)
                    .zip(half)
                    .and_then(|(full, half)| full.checked_add(half))
            }
            PromotionRule::ThirdOneFree => units(quantity - quantity / 3),
        };
        total.ok_or_else(StoreError::overflow)
    }
}

/// A named promotion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    name: String,
    rule: PromotionRule,
}

impl Promotion {
    /// Percentage discount. Fails unless `0 < percent < 100`.
    pub fn percent_discount(name: impl Into<String>, percent: Decimal) -> StoreResult<Self> {
        if percent <= Decimal::ZERO || percent >= Decimal::ONE_HUNDRED {
            return Err(StoreError::validation(format!(
                "Percent must be between 0 and 100, got {}",
                percent
            )));
        }
        Ok(Self {
            name: name.into(),
            rule: PromotionRule::PercentDiscount { percent },
        })
    }

    /// Second unit at half price
    pub fn second_half_price(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: PromotionRule::SecondHalfPrice,
        }
    }

    /// Buy two, get the third free
    pub fn third_one_free(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule: PromotionRule::ThirdOneFree,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> PromotionRule {
        self.rule
    }

    /// Price `quantity` units at `unit_price` under this promotion
    pub fn apply(&self, unit_price: Decimal, quantity: u32) -> StoreResult<Decimal> {
        self.rule.apply(unit_price, quantity)
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
