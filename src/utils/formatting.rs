use console::style;
use tabled::{
    settings::{Alignment, Style},
    Table, Tabled,
};
use tracing::warn;

use crate::models::{
    cart::LineItem,
    pricing::{total_cart_value, OrderSummary},
    product::CatalogItem,
};

pub const EMPTY_CART_MESSAGE: &str = "Cart is empty. Add more items to the cart to checkout.";

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Qty")]
    qty: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

pub fn format_money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${:.0}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn format_rating(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn format_product_table(products: &[CatalogItem]) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            id: product.id.clone(),
            name: truncate(&product.name, 40),
            category: product.category.clone(),
            cost: format_money(product.cost),
            rating: format_rating(product.rating),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded()).with(Alignment::left());

    table.to_string()
}

/// Renders the cart. Only items with a positive quantity are listed.
///
/// In read-only mode the quantity column is shown as `Qty: n`, the way the
/// checkout page displays it.
pub fn format_cart(items: &[LineItem], read_only: bool) -> String {
    if items.is_empty() {
        return style(EMPTY_CART_MESSAGE).dim().to_string();
    }

    let rows: Vec<CartTableRow> = items
        .iter()
        .filter(|item| item.qty > 0)
        .filter_map(|item| match &item.product {
            Some(product) => Some(CartTableRow {
                id: item.product_id.clone(),
                name: truncate(&product.name, 40),
                qty: if read_only {
                    format!("Qty: {}", item.qty)
                } else {
                    item.qty.to_string()
                },
                cost: format_money(product.cost),
            }),
            None => {
                warn!("Skipping cart entry {}: product not in catalog", item.product_id);
                None
            }
        })
        .collect();

    let mut output = String::new();
    if !rows.is_empty() {
        let mut table = Table::new(rows);
        table.with(Style::rounded()).with(Alignment::left());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push_str(&format!(
        "{}: {}\n",
        style("Order total").bold(),
        style(format_money(total_cart_value(items))).bold().green()
    ));

    output
}

pub fn format_order_summary(summary: &OrderSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", style("Order Details").bold().cyan()));
    output.push_str(&format!("{:<20}{}\n", "Products", summary.products));
    output.push_str(&format!("{:<20}{}\n", "Subtotal", format_money(summary.subtotal)));
    output.push_str(&format!(
        "{:<20}{}\n",
        "Shipping Charges",
        format_money(summary.shipping)
    ));
    output.push_str(&format!(
        "{}\n",
        style(format!("{:<20}{}", "Total", format_money(summary.total))).bold()
    ));

    output
}
