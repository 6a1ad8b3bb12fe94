use serde::Serialize;

use crate::models::cart::LineItem;

/// Shipping is free for every order.
pub const SHIPPING_CHARGES: f64 = 0.0;

/// Total value of all products in the cart.
///
/// Items with zero quantity are ignored, as are items whose product is
/// missing from the catalog.
pub fn total_cart_value(items: &[LineItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }

    items
        .iter()
        .filter(|item| item.qty != 0)
        .filter_map(|item| item.cost().map(|cost| cost * item.qty as f64))
        .sum()
}

/// Sum of quantities of all products in the cart.
pub fn total_items(items: &[LineItem]) -> i64 {
    if items.is_empty() {
        return 0;
    }

    items.iter().map(|item| item.qty).sum()
}

/// Figures shown in the read-only "Order Details" block at checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub products: i64,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn from_items(items: &[LineItem]) -> Self {
        let subtotal = total_cart_value(items);
        Self {
            products: total_items(items),
            subtotal,
            shipping: SHIPPING_CHARGES,
            total: subtotal + SHIPPING_CHARGES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::CatalogItem;

    fn item(id: &str, cost: f64, qty: i64) -> LineItem {
        LineItem {
            product_id: id.to_string(),
            qty,
            product: Some(CatalogItem::new(id, id.to_uppercase(), cost)),
        }
    }

    #[test]
    fn test_totals_of_empty_cart_are_zero() {
        assert_eq!(total_cart_value(&[]), 0.0);
        assert_eq!(total_items(&[]), 0);
    }

    #[test]
    fn test_total_value_ignores_zero_quantity() {
        let items = vec![item("a", 10.0, 0), item("b", 5.0, 2)];
        assert_eq!(total_cart_value(&items), 10.0);
    }

    #[test]
    fn test_total_value_all_zero_quantities() {
        let items = vec![item("a", 10.0, 0), item("b", 5.0, 0)];
        assert_eq!(total_cart_value(&items), 0.0);
    }

    #[test]
    fn test_total_items_sums_regardless_of_cost() {
        let items = vec![item("a", 0.0, 2), item("b", 1000.0, 3)];
        assert_eq!(total_items(&items), 5);
    }

    #[test]
    fn test_total_items_counts_zero_quantity_as_zero() {
        let items = vec![item("a", 10.0, 0), item("b", 10.0, 4)];
        assert_eq!(total_items(&items), 4);
    }

    #[test]
    fn test_unmatched_item_contributes_no_value() {
        let unmatched = LineItem {
            product_id: "ghost".to_string(),
            qty: 7,
            product: None,
        };
        let items = vec![unmatched, item("a", 3.0, 2)];

        assert_eq!(total_cart_value(&items), 6.0);
        assert_eq!(total_items(&items), 9);
    }

    #[test]
    fn test_order_summary() {
        let items = vec![item("a", 10.0, 2), item("b", 20.0, 1)];
        let summary = OrderSummary::from_items(&items);

        assert_eq!(
            summary,
            OrderSummary {
                products: 3,
                subtotal: 40.0,
                shipping: 0.0,
                total: 40.0,
            }
        );
    }
}
