use serde::{Deserialize, Serialize};

use crate::models::pricing::{total_cart_value, total_items, OrderSummary};
use crate::models::product::{find_product, CatalogItem};

/// A product reference plus desired quantity, as stored in the backend cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub qty: i64,
}

impl CartEntry {
    pub fn new(product_id: impl Into<String>, qty: i64) -> Self {
        Self {
            product_id: product_id.into(),
            qty,
        }
    }
}

/// A cart entry joined with its catalog record.
///
/// `product` is `None` when the entry references an identifier the
/// catalog does not contain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub qty: i64,
    pub product: Option<CatalogItem>,
}

impl LineItem {
    pub fn is_resolved(&self) -> bool {
        self.product.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.name.as_str())
    }

    pub fn cost(&self) -> Option<f64> {
        self.product.as_ref().map(|p| p.cost)
    }
}

/// Returns the complete data on all products in `cart` by searching in `catalog`.
///
/// The result has the same length and order as `cart`. An absent cart
/// yields `None` rather than an empty list.
pub fn generate_cart_items(
    cart: Option<&[CartEntry]>,
    catalog: &[CatalogItem],
) -> Option<Vec<LineItem>> {
    let cart = cart?;

    let items = cart
        .iter()
        .map(|entry| LineItem {
            product_id: entry.product_id.clone(),
            qty: entry.qty,
            product: find_product(catalog, &entry.product_id).cloned(),
        })
        .collect();

    Some(items)
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartError {
    #[error("Product {product_id} is not in the catalog")]
    UnknownProduct { product_id: String },

    #[error("Quantity cannot be negative (got {qty})")]
    NegativeQuantity { qty: i64 },

    #[error("Item already in cart. Use the cart sidebar to update quantity or remove item.")]
    AlreadyInCart { product_id: String },
}

/// Owned cart state: the backend cart entries plus the catalog they refer to.
///
/// Line items and totals are derived on demand, so they always reflect the
/// latest quantity change.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
    catalog: Vec<CatalogItem>,
}

impl Cart {
    pub fn new(entries: Vec<CartEntry>, catalog: Vec<CatalogItem>) -> Self {
        Self { entries, catalog }
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|e| e.product_id == product_id)
    }

    /// Current quantity of a product, 0 when it is not in the cart.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.entries
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.qty)
            .unwrap_or(0)
    }

    pub fn items(&self) -> Vec<LineItem> {
        generate_cart_items(Some(&self.entries), &self.catalog).unwrap_or_default()
    }

    pub fn total_value(&self) -> f64 {
        total_cart_value(&self.items())
    }

    pub fn total_items(&self) -> i64 {
        total_items(&self.items())
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_items(&self.items())
    }

    /// Checks that `qty` is an acceptable target quantity for `product_id`.
    pub fn check_quantity(&self, product_id: &str, qty: i64) -> Result<(), CartError> {
        if qty < 0 {
            return Err(CartError::NegativeQuantity { qty });
        }
        if find_product(&self.catalog, product_id).is_none() {
            return Err(CartError::UnknownProduct {
                product_id: product_id.to_string(),
            });
        }
        Ok(())
    }

    /// Sets the quantity of a product. Zero removes it from the cart.
    pub fn set_quantity(&mut self, product_id: &str, qty: i64) -> Result<(), CartError> {
        self.check_quantity(product_id, qty)?;

        let position = self.entries.iter().position(|e| e.product_id == product_id);
        match (position, qty) {
            (Some(index), 0) => {
                self.entries.remove(index);
            }
            (Some(index), qty) => self.entries[index].qty = qty,
            (None, 0) => {}
            (None, qty) => self.entries.push(CartEntry::new(product_id, qty)),
        }
        Ok(())
    }

    /// Replaces the entries with the cart the backend reported after an update.
    pub fn replace_entries(&mut self, entries: Vec<CartEntry>) {
        self.entries = entries;
    }
}
