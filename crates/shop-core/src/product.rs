//! # Product Types
//!
//! Stock-keeping units for the shop.
//! A product owns its price and stock, optionally references a shared
//! [`Promotion`], and exposes [`Product::buy`] which prices a purchase and
//! decrements stock in one step.

use crate::error::{StoreError, StoreResult};
use crate::promotion::Promotion;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Product variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    /// Tracks real stock
    Standard,
    /// No trackable stock (licenses, services); quantity is always zero
    NonStocked,
    /// Tracks stock and caps the units bought per order
    Limited { maximum: u32 },
}

impl ProductKind {
    /// Whether purchases check and decrement stock
    pub fn is_stocked(&self) -> bool {
        !matches!(self, ProductKind::NonStocked)
    }
}

/// A product in the store
#[derive(Debug, Clone)]
pub struct Product {
    name: String,
    price: Decimal,
    quantity: u32,
    kind: ProductKind,
    promotion: Option<Arc<Promotion>>,
}

impl Product {
    /// Create a standard stocked product
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> StoreResult<Self> {
        Self::build(name.into(), price, quantity, ProductKind::Standard)
    }

    /// Create a product without trackable stock
    pub fn non_stocked(name: impl Into<String>, price: Decimal) -> StoreResult<Self> {
        Self::build(name.into(), price, 0, ProductKind::NonStocked)
    }

    /// Create a stocked product with a per-order maximum
    pub fn limited(
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
        maximum: u32,
    ) -> StoreResult<Self> {
        if maximum == 0 {
            return Err(StoreError::validation(
                "Maximum per order must be greater than 0",
            ));
        }
        Self::build(name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    fn build(name: String, price: Decimal, quantity: u32, kind: ProductKind) -> StoreResult<Self> {
        if name.trim().is_empty() {
            return Err(StoreError::validation("Product name cannot be empty"));
        }
        validate_price(price)?;
        Ok(Self {
            name,
            price,
            quantity,
            kind,
            promotion: None,
        })
    }

    /// Builder: attach a promotion
    pub fn with_promotion(mut self, promotion: Arc<Promotion>) -> Self {
        self.promotion = Some(promotion);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Stock on hand (always zero for non-stocked products)
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-order cap, for limited products
    pub fn maximum(&self) -> Option<u32> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<&Arc<Promotion>> {
        self.promotion.as_ref()
    }

    /// Active means there is stock to sell.
    /// Non-stocked products have no stock state and are never active.
    pub fn is_active(&self) -> bool {
        self.kind.is_stocked() && self.quantity > 0
    }

    /// Replace the price. Fails if negative.
    pub fn set_price(&mut self, price: Decimal) -> StoreResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Administrative stock correction
    pub fn set_quantity(&mut self, quantity: u32) -> StoreResult<()> {
        if !self.kind.is_stocked() {
            return Err(StoreError::ImmutableField {
                product: self.name.clone(),
                field: "quantity",
            });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Attach a promotion, replacing any existing one
    pub fn set_promotion(&mut self, promotion: Arc<Promotion>) {
        self.promotion = Some(promotion);
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    /// Order two products by unit price
    pub fn compare_price(&self, other: &Product) -> Ordering {
        self.price.cmp(&other.price)
    }

    /// Price a purchase of `requested` units without touching stock.
    ///
    /// Runs the same checks as [`Product::buy`].
    pub fn quote(&self, requested: u32) -> StoreResult<Decimal> {
        if requested == 0 {
            return Err(StoreError::validation("Quantity must be positive"));
        }
        match self.kind {
            ProductKind::NonStocked => {}
            ProductKind::Limited { maximum } if requested > maximum => {
                return Err(StoreError::LimitExceeded {
                    product: self.name.clone(),
                    maximum,
                    requested,
                });
            }
            ProductKind::Standard | ProductKind::Limited { .. } => {
                if requested > self.quantity {
                    return Err(StoreError::OutOfStock {
                        product: self.name.clone(),
                        requested,
                        available: self.quantity,
                    });
                }
            }
        }

        match &self.promotion {
            Some(promotion) => promotion.apply(self.price, requested),
            None => self
                .price
                .checked_mul(Decimal::from(requested))
                .ok_or_else(StoreError::overflow),
        }
    }

    /// Buy `requested` units: price them, then take them out of stock.
    ///
    /// On error the product is left unchanged.
    pub fn buy(&mut self, requested: u32) -> StoreResult<Decimal> {
        let total = self.quote(requested)?;
        if self.kind.is_stocked() {
            self.quantity -= requested;
        }
        Ok(total)
    }
}

fn validate_price(price: Decimal) -> StoreResult<()> {
    if price < Decimal::ZERO {
        return Err(StoreError::validation("Price cannot be negative"));
    }
    Ok(())
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Price: ${} Quantity: {}",
            self.name, self.price, self.quantity
        )?;
        if let Some(maximum) = self.maximum() {
            write!(f, ", Maximum: {}", maximum)?;
        }
        if let Some(promotion) = &self.promotion {
            write!(f, ", Promotion: {}", promotion.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_product() {
        let p = Product::new("MacBook Air M2", dec!(1450), 100).unwrap();
        assert_eq!(p.name(), "MacBook Air M2");
        assert_eq!(p.price(), dec!(1450));
        assert_eq!(p.quantity(), 100);
        assert!(p.is_active());
        assert!(p.promotion().is_none());

        let empty = Product::new("Cable", dec!(0), 0).unwrap();
        assert!(!empty.is_active());
    }

    #[test]
    fn test_create_product_invalid() {
        assert!(matches!(
            Product::new("", dec!(1450), 100),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            Product::new("   ", dec!(1450), 100),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            Product::new("MacBook Air M2", dec!(-10), 100),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            Product::limited("Shipping", dec!(10), 250, 0),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_buy_reduces_quantity() {
        let mut p = Product::new("Keyboard", dec!(100), 5).unwrap();
        assert_eq!(p.buy(2).unwrap(), dec!(200));
        assert_eq!(p.quantity(), 3);
    }

    #[test]
    fn test_becomes_inactive_when_sold_out() {
        let mut p = Product::new("Mouse", dec!(50), 1).unwrap();
        p.buy(1).unwrap();
        assert_eq!(p.quantity(), 0);
        assert!(!p.is_active());
    }

    #[test]
    fn test_failed_buy_leaves_stock_untouched() {
        let mut p = Product::new("Monitor", dec!(300), 2).unwrap();

        let err = p.buy(5).unwrap_err();
        assert_eq!(
            err,
            StoreError::OutOfStock {
                product: "Monitor".into(),
                requested: 5,
                available: 2
            }
        );
        assert!(matches!(p.buy(0), Err(StoreError::Validation(_))));
        assert_eq!(p.quantity(), 2);
        assert!(p.is_active());
    }

    #[test]
    fn test_buy_with_promotions() {
        let mut p = Product::new("Test Product", dec!(100), 10)
            .unwrap()
            .with_promotion(Arc::new(
                Promotion::percent_discount("30% off!", dec!(30)).unwrap(),
            ));
        assert_eq!(p.buy(2).unwrap(), dec!(140));
        assert_eq!(p.quantity(), 8);

        p.set_promotion(Arc::new(Promotion::second_half_price("Second Half price!")));
        assert_eq!(p.buy(3).unwrap(), dec!(250));
        assert_eq!(p.quantity(), 5);

        p.set_promotion(Arc::new(Promotion::third_one_free("Third One Free!")));
        assert_eq!(p.buy(3).unwrap(), dec!(200));
        assert_eq!(p.quantity(), 2);

        p.clear_promotion();
        assert_eq!(p.buy(2).unwrap(), dec!(200));
    }

    #[test]
    fn test_shared_promotion() {
        let promo = Arc::new(Promotion::third_one_free("Third One Free!"));
        let mut a = Product::new("A", dec!(10), 10)
            .unwrap()
            .with_promotion(Arc::clone(&promo));
        let mut b = Product::new("B", dec!(20), 10)
            .unwrap()
            .with_promotion(Arc::clone(&promo));

        assert_eq!(a.buy(3).unwrap(), dec!(20));
        assert_eq!(b.buy(3).unwrap(), dec!(40));
        assert_eq!(Arc::strong_count(&promo), 3);
    }

    #[test]
    fn test_non_stocked_product() {
        let mut p = Product::non_stocked("Windows License", dec!(125)).unwrap();
        assert_eq!(p.buy(10).unwrap(), dec!(1250));
        assert_eq!(p.buy(1000).unwrap(), dec!(125000));
        assert_eq!(p.quantity(), 0);
        assert!(!p.is_active());
        assert!(matches!(p.buy(0), Err(StoreError::Validation(_))));

        let err = p.set_quantity(5).unwrap_err();
        assert!(matches!(err, StoreError::ImmutableField { field: "quantity", .. }));
        assert_eq!(p.quantity(), 0);
    }

    #[test]
    fn test_non_stocked_applies_promotion() {
        let mut p = Product::non_stocked("Windows License", dec!(125))
            .unwrap()
            .with_promotion(Arc::new(
                Promotion::percent_discount("30% off!", dec!(30)).unwrap(),
            ));
        assert_eq!(p.buy(2).unwrap(), dec!(175));
    }

    #[test]
    fn test_overflowing_purchase_fails_cleanly() {
        let mut p = Product::non_stocked("Big", Decimal::MAX).unwrap();
        assert_eq!(p.buy(2).unwrap_err(), StoreError::overflow());
        assert_eq!(p.buy(1).unwrap(), Decimal::MAX);

        let mut promoted = Product::new("Big", Decimal::MAX, 10)
            .unwrap()
            .with_promotion(Arc::new(Promotion::third_one_free("Third One Free!")));
        assert!(matches!(promoted.buy(3), Err(StoreError::Validation(_))));
        assert_eq!(promoted.quantity(), 10);
    }

    #[test]
    fn test_limited_product() {
        let mut p = Product::limited("Shipping", dec!(10), 10, 2).unwrap();
        assert_eq!(p.maximum(), Some(2));

        let err = p.buy(3).unwrap_err();
        assert_eq!(
            err,
            StoreError::LimitExceeded {
                product: "Shipping".into(),
                maximum: 2,
                requested: 3
            }
        );
        assert_eq!(p.quantity(), 10);

        assert_eq!(p.buy(2).unwrap(), dec!(20));
        assert_eq!(p.quantity(), 8);
    }

    #[test]
    fn test_limited_product_still_checks_stock() {
        let mut p = Product::limited("Shipping", dec!(10), 1, 5).unwrap();
        assert!(matches!(p.buy(2), Err(StoreError::OutOfStock { .. })));
    }

    #[test]
    fn test_quote_does_not_mutate() {
        let p = Product::new("Keyboard", dec!(100), 5).unwrap();
        assert_eq!(p.quote(5).unwrap(), dec!(500));
        assert_eq!(p.quantity(), 5);
    }

    #[test]
    fn test_setters() {
        let mut p = Product::new("Keyboard", dec!(100), 5).unwrap();
        p.set_quantity(0).unwrap();
        assert!(!p.is_active());
        p.set_quantity(7).unwrap();
        assert!(p.is_active());

        assert!(p.set_price(dec!(-1)).is_err());
        assert_eq!(p.price(), dec!(100));
        p.set_price(dec!(0)).unwrap();
        assert_eq!(p.price(), dec!(0));
    }

    #[test]
    fn test_compare_price() {
        let cheap = Product::new("Cable", dec!(5), 1).unwrap();
        let pricey = Product::new("Laptop", dec!(1450), 1).unwrap();
        assert_eq!(cheap.compare_price(&pricey), Ordering::Less);
        assert_eq!(pricey.compare_price(&cheap), Ordering::Greater);
    }

    #[test]
    fn test_display() {
        let p = Product::new("MacBook Air M2", dec!(1450), 100)
            .unwrap()
            .with_promotion(Arc::new(Promotion::second_half_price("Second Half price!")));
        assert_eq!(
            p.to_string(),
            "MacBook Air M2, Price: $1450 Quantity: 100, Promotion: Second Half price!"
        );

        let shipping = Product::limited("Shipping", dec!(10), 250, 1).unwrap();
        assert_eq!(
            shipping.to_string(),
            "Shipping, Price: $10 Quantity: 250, Maximum: 1"
        );
    }
}
