//! # Store
//!
//! An ordered collection of products plus the order transaction.
//!
//! Orders are atomic: every line is applied to a staged copy of its product
//! and nothing is written back unless all lines succeed.

use crate::error::{StoreError, StoreResult};
use crate::order::{OrderLine, Receipt, ReceiptLine};
use crate::product::Product;
use crate::promotion::Promotion;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Store behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreOptions {
    /// Include non-stocked products in [`Store::active_products`].
    /// They have no stock state, so they are never active on their own.
    pub list_non_stocked: bool,
}

/// A store holding products in insertion order
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
    options: StoreOptions,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with explicit options
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            products: Vec::new(),
            options,
        }
    }

    /// Create a store from a product list. Duplicate names are skipped.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut store = Self::new();
        for product in products {
            store.add_product(product);
        }
        store
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    pub fn set_options(&mut self, options: StoreOptions) {
        self.options = options;
    }

    /// Add a product. A product whose name is already taken is not added.
    pub fn add_product(&mut self, product: Product) -> bool {
        if self.contains(product.name()) {
            warn!(product = product.name(), "Product already exists in the store");
            return false;
        }
        debug!(product = product.name(), "Product added");
        self.products.push(product);
        true
    }

    /// Remove the product with this name, if present
    pub fn remove_product(&mut self, name: &str) -> Option<Product> {
        match self.products.iter().position(|p| p.name() == name) {
            Some(index) => Some(self.products.remove(index)),
            None => {
                warn!(product = name, "Product not found in the store");
                None
            }
        }
    }

    /// Check if a product with this exact name exists
    pub fn contains(&self, name: &str) -> bool {
        self.product(name).is_some()
    }

    /// Find a product by exact name
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// Find a product by name, ignoring case (Unicode-aware)
    pub fn lookup(&self, name: &str) -> StoreResult<&Product> {
        let name = name.trim();
        let wanted = name.to_lowercase();
        self.products
            .iter()
            .find(|p| p.name().to_lowercase() == wanted)
            .ok_or_else(|| StoreError::not_found(name))
    }

    /// Attach a promotion to the named product
    pub fn set_promotion(&mut self, name: &str, promotion: Arc<Promotion>) -> StoreResult<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| StoreError::not_found(name))?;
        product.set_promotion(promotion);
        Ok(())
    }

    /// Every product, in insertion order
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    /// Snapshot of the products currently available, in insertion order
    pub fn active_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_active() || (self.options.list_non_stocked && !p.kind().is_stocked()))
            .collect()
    }

    /// Sum of stock over active products
    pub fn total_active_quantity(&self) -> u64 {
        self.products
            .iter()
            .filter(|p| p.is_active())
            .map(|p| u64::from(p.quantity()))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Place an order.
    ///
    /// Lines are bought in sequence. The first failing line aborts the whole
    /// order and leaves every product as it was.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub fn order(&mut self, lines: &[OrderLine]) -> StoreResult<Receipt> {
        if lines.is_empty() {
            return Err(StoreError::validation("Order has no lines"));
        }

        let mut staged: HashMap<usize, Product> = HashMap::new();
        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            let index = self
                .products
                .iter()
                .position(|p| p.name() == line.product)
                .ok_or_else(|| StoreError::not_found(&line.product))?;
            let product = staged
                .entry(index)
                .or_insert_with(|| self.products[index].clone());

            let total = product.buy(line.quantity).map_err(|err| {
                warn!(product = %line.product, error = %err, kind = err.kind(), "Order rejected");
                err
            })?;

            priced.push(ReceiptLine {
                product: product.name().to_string(),
                quantity: line.quantity,
                unit_price: product.price(),
                promotion: product.promotion().map(|p| p.name().to_string()),
                total,
            });
        }

        let receipt = Receipt::new(priced)?;
        for (index, product) in staged {
            self.products[index] = product;
        }

        info!(receipt = %receipt.id, total = %receipt.total, "Order committed");
        Ok(receipt)
    }

    /// Fold another store's products into this one, skipping names already present
    pub fn merge(mut self, other: Store) -> Store {
        for product in other.products {
            self.add_product(product);
        }
        self
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, product) in self.products.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", product)?;
        }
        Ok(())
    }
}
