use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{cart::Cart, product::Product};
use crate::services::CartSummary;

const NAME_WIDTH: usize = 30;

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Preorder")]
    preorder: String,
    #[tabled(rename = "Regular")]
    regular: String,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Discount")]
    discount: String,
}

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

pub fn format_catalog_table(products: &[Product], currency: &str) -> String {
    if products.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = products
        .iter()
        .map(|product| ProductTableRow {
            id: product.id,
            name: truncate(&product.name),
            category: product.category.clone(),
            preorder: format_money(product.price_preorder, currency),
            regular: format_money(product.price_regular, currency),
            unit: product.unit.clone(),
            discount: format!("-{}%", product.discount),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_cart_table(cart: &Cart, currency: &str) -> String {
    if cart.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = cart
        .lines()
        .iter()
        .map(|line| CartTableRow {
            id: line.id(),
            name: truncate(&line.product.name),
            price: format_unit_price(&line.product, currency),
            quantity: line.quantity,
            subtotal: format_money(line.subtotal(), currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_cart_summary(summary: &CartSummary, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Lines").bold(), summary.line_count));
    output.push_str(&format!("{}: {}\n", style("Units").bold(), summary.unit_count));
    if summary.savings > 0 {
        output.push_str(&format!(
            "{}: {}\n",
            style("You save").bold(),
            style(format_money(summary.savings, currency)).green()
        ));
    }
    output.push_str(&format!(
        "{}: {}\n",
        style("Total").bold(),
        style(format_money(summary.total, currency)).cyan().bold()
    ));

    output
}

pub fn format_money(amount: u64, currency: &str) -> String {
    format!("{} {}", amount, currency)
}

// "480 ₽/кг"
pub fn format_unit_price(product: &Product, currency: &str) -> String {
    format!("{}/{}", format_money(product.price_preorder, currency), product.unit)
}

fn truncate(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let head: String = name.chars().take(NAME_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
