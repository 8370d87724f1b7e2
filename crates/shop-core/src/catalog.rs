//! # Product Catalog
//!
//! TOML description of the products and promotions a store starts with.
//!
//! ```toml
//! [[promotions]]
//! name = "30% off!"
//! kind = "percent_discount"
//! percent = 30
//!
//! [[products]]
//! name = "Windows License"
//! kind = "non_stocked"
//! price = 125
//! promotion = "30% off!"
//!
//! [[products]]
//! name = "Shipping"
//! kind = "limited"
//! price = 10
//! quantity = 250
//! maximum = 1
//! ```
//!
//! Every entry goes through the same constructors as hand-built products, so
//! a catalog can never produce a product that violates their invariants.

use crate::error::{StoreError, StoreResult};
use crate::product::Product;
use crate::promotion::Promotion;
use crate::store::{Store, StoreOptions};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Promotion rule selector in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    PercentDiscount,
    SecondHalfPrice,
    ThirdOneFree,
}

/// Product variant selector in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKindEntry {
    #[default]
    Standard,
    NonStocked,
    Limited,
}

/// A promotion as written in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionEntry {
    pub name: String,
    pub kind: PromotionKind,
    /// Required for `percent_discount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<Decimal>,
}

impl PromotionEntry {
    fn build(&self) -> StoreResult<Promotion> {
        match self.kind {
            PromotionKind::PercentDiscount => {
                let percent = self.percent.ok_or_else(|| {
                    StoreError::validation(format!("Promotion '{}' needs a percent", self.name))
                })?;
                Promotion::percent_discount(self.name.clone(), percent)
            }
            PromotionKind::SecondHalfPrice => Ok(Promotion::second_half_price(self.name.clone())),
            PromotionKind::ThirdOneFree => Ok(Promotion::third_one_free(self.name.clone())),
        }
    }
}

/// A product as written in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub kind: ProductKindEntry,
    /// Required for `limited`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    /// Name of a promotion declared in the same catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
}

impl ProductEntry {
    fn build(&self, promotions: &HashMap<String, Arc<Promotion>>) -> StoreResult<Product> {
        let quantity = non_negative(self.quantity, "Quantity")?;
        let product = match self.kind {
            ProductKindEntry::Standard => Product::new(self.name.clone(), self.price, quantity)?,
            ProductKindEntry::NonStocked => {
                if quantity != 0 {
                    return Err(StoreError::ImmutableField {
                        product: self.name.clone(),
                        field: "quantity",
                    });
                }
                Product::non_stocked(self.name.clone(), self.price)?
            }
            ProductKindEntry::Limited => {
                let maximum = self.maximum.ok_or_else(|| {
                    StoreError::validation(format!("Product '{}' needs a maximum", self.name))
                })?;
                let maximum = non_negative(maximum, "Maximum per order")?;
                Product::limited(self.name.clone(), self.price, quantity, maximum)?
            }
        };

        match &self.promotion {
            Some(name) => {
                let promotion = promotions
                    .get(name)
                    .ok_or_else(|| StoreError::not_found(format!("promotion '{}'", name)))?;
                Ok(product.with_promotion(Arc::clone(promotion)))
            }
            None => Ok(product),
        }
    }
}

fn non_negative(value: i64, what: &str) -> StoreResult<u32> {
    if value < 0 {
        return Err(StoreError::validation(format!("{} cannot be negative", what)));
    }
    u32::try_from(value).map_err(|_| StoreError::validation(format!("{} is too large", what)))
}

/// Catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub promotions: Vec<PromotionEntry>,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

impl Catalog {
    /// Parse a catalog from a TOML string
    pub fn from_toml(toml_str: &str) -> StoreResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Validate every entry and build the store.
    ///
    /// Promotions are built once and shared between the products naming them.
    pub fn into_store(self, options: StoreOptions) -> StoreResult<Store> {
        let mut promotions = HashMap::with_capacity(self.promotions.len());
        for entry in &self.promotions {
            let promotion = Arc::new(entry.build()?);
            if promotions.insert(entry.name.clone(), promotion).is_some() {
                return Err(StoreError::validation(format!(
                    "Promotion '{}' is declared twice",
                    entry.name
                )));
            }
        }

        let mut store = Store::with_options(options);
        for entry in &self.products {
            store.add_product(entry.build(&promotions)?);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderLine;
    use crate::product::ProductKind;
    use rust_decimal_macros::dec;

    const CATALOG: &str = r#"
        [[promotions]]
        name = "Second Half price!"
        kind = "second_half_price"

        [[promotions]]
        name = "30% off!"
        kind = "percent_discount"
        percent = 30

        [[products]]
        name = "MacBook Air M2"
        price = 1450
        quantity = 100
        promotion = "Second Half price!"

        [[products]]
        name = "Windows License"
        kind = "non_stocked"
        price = 125
        promotion = "30% off!"

        [[products]]
        name = "Shipping"
        kind = "limited"
        price = 10
        quantity = 250
        maximum = 1
    "#;

    #[test]
    fn test_catalog_into_store() {
        let mut store = Catalog::from_toml(CATALOG)
            .unwrap()
            .into_store(StoreOptions::default())
            .unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.product("Shipping").unwrap().kind(), ProductKind::Limited { maximum: 1 });
        assert_eq!(store.product("Windows License").unwrap().kind(), ProductKind::NonStocked);

        let receipt = store
            .order(&[OrderLine::new("MacBook Air M2", 2), OrderLine::new("Windows License", 2)])
            .unwrap();
        assert_eq!(receipt.total, dec!(2175) + dec!(175));
    }

    #[test]
    fn test_catalog_decimal_price() {
        let toml = r#"
            [[products]]
            name = "Cable"
            price = 4.99
            quantity = 3
        "#;
        let store = Catalog::from_toml(toml)
            .unwrap()
            .into_store(StoreOptions::default())
            .unwrap();
        assert_eq!(store.product("Cable").unwrap().price(), dec!(4.99));
    }

    #[test]
    fn test_catalog_rejects_negative_quantity() {
        let toml = r#"
            [[products]]
            name = "Mouse"
            price = 50
            quantity = -1
        "#;
        let err = Catalog::from_toml(toml)
            .unwrap()
            .into_store(StoreOptions::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_catalog_rejects_unknown_promotion() {
        let toml = r#"
            [[products]]
            name = "Mouse"
            price = 50
            quantity = 1
            promotion = "Black Friday"
        "#;
        let err = Catalog::from_toml(toml)
            .unwrap()
            .into_store(StoreOptions::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_catalog_rejects_bad_entries() {
        let missing_percent = r#"
            [[promotions]]
            name = "Sale"
            kind = "percent_discount"
        "#;
        let missing_maximum = r#"
            [[products]]
            name = "Shipping"
            kind = "limited"
            price = 10
            quantity = 5
        "#;
        let stocked_license = r#"
            [[products]]
            name = "License"
            kind = "non_stocked"
            price = 10
            quantity = 5
        "#;
        for toml in [missing_percent, missing_maximum, stocked_license] {
            let result = Catalog::from_toml(toml)
                .unwrap()
                .into_store(StoreOptions::default());
            assert!(result.is_err(), "accepted: {}", toml);
        }
    }

    #[test]
    fn test_catalog_parse_error() {
        let err = Catalog::from_toml("[[products]]\nname = ").unwrap_err();
        assert!(matches!(err, StoreError::Catalog(_)));
        assert!(!err.is_user_error());
    }
}
