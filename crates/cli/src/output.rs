//! Terminal rendering of command results.
//!
//! Everything the user asked to see goes to stdout; logs go to stderr.

#![allow(clippy::print_stdout)]

use std::io::Write;

use wardrobe_inventory::filters::{ProductRow, format_vnd, product_row, role_label};
use wardrobe_inventory::models::Product;
use wardrobe_inventory::services::{FetchReport, ImportReport, Session};

const NAME_WIDTH: usize = 34;
const CATEGORY_WIDTH: usize = 12;

/// Print products as a table, numbered by position in `products`.
pub fn product_table(products: &[Product]) {
    if products.is_empty() {
        println!("(no products)");
        return;
    }
    println!(
        "{:>3}  {:<36}  {:<NAME_WIDTH$}  {:<CATEGORY_WIDTH$}  {:>15}  {:>5}  Description",
        "#", "Id", "Name", "Category", "Price", "Qty"
    );
    for (i, product) in products.iter().enumerate() {
        print_row(&product_row(i + 1, product));
    }
    println!("{} product(s)", products.len());
}

fn print_row(row: &ProductRow) {
    println!(
        "{:>3}  {:<36}  {:<NAME_WIDTH$}  {:<CATEGORY_WIDTH$}  {:>15}  {:>5}  {}",
        row.position,
        row.id,
        row.name,
        row.category,
        row.price,
        row.quantity,
        row.description
    );
}

/// Print every field of one product.
pub fn product_detail(product: &Product) {
    println!("Id:          {}", product.id);
    println!("Name:        {}", product.name);
    println!("Category:    {}", product.category);
    println!("Price:       {}", format_vnd(product.price));
    println!("Quantity:    {}", product.quantity);
    println!("Description: {}", product.description);
    println!("Created:     {} by {}", product.created_at, product.created_by);
    if let (Some(at), Some(by)) = (&product.updated_at, &product.updated_by) {
        println!("Updated:     {at} by {by}");
    }
    for (label, value) in [
        ("Source", &product.source),
        ("Brand", &product.brand),
        ("Color", &product.color),
        ("SKU", &product.sku),
    ] {
        if let Some(value) = value {
            println!("{:<13}{value}", format!("{label}:"));
        }
    }
}

/// Confirm a single-product change.
pub fn product_changed(verb: &str, product: &Product) {
    println!("{verb} {} ({})", product.name, product.id);
}

/// Report a finished supplier fetch.
pub fn fetch_report(report: &FetchReport) {
    println!(
        "Added {} products from the supplier feed. Total: {} products",
        report.generated.len(),
        report.total
    );
}

/// Report a finished import.
pub fn import_report(report: &ImportReport) {
    println!(
        "Imported {} products, skipped {}. Total: {} products",
        report.imported,
        report.skipped.len(),
        report.total
    );
    for (position, reason) in &report.skipped {
        println!("  entry {position}: {reason}");
    }
}

/// Greeting shown when the shell starts.
pub fn banner(session: &Session) {
    println!(
        "Logged in as {} ({}). Type `help` for commands.",
        session.username(),
        role_label(session.role())
    );
}

/// Print the session's identity.
pub fn whoami(session: &Session) {
    println!("{} - {}", session.username(), role_label(session.role()));
}

/// Print `text` without a newline and flush, for prompts.
pub fn prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

/// Print a line of plain text.
pub fn line(text: &str) {
    println!("{text}");
}

/// Print an error the user can correct without leaving the shell.
pub fn error(err: &dyn std::fmt::Display) {
    println!("Error: {err}");
}
