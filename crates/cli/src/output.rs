//! Output formatting utilities

use catalog_sync::Product;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

#[derive(Tabled, Serialize)]
struct ProductRow {
    #[tabled(rename = "Fav")]
    favorite: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    product_type: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Tax %")]
    tax: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            favorite: if product.is_favorite {
                "★".yellow().to_string()
            } else {
                String::new()
            },
            name: product.name.clone(),
            product_type: product.product_type.clone(),
            price: format!("{:.2}", product.price),
            tax: format!("{:.1}", product.tax),
        }
    }
}

/// Print a product table
pub fn print_products(products: &[Product], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if products.is_empty() {
                println!("{}", "No products found".yellow());
                return;
            }
            let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(products) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
