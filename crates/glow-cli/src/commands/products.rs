use std::path::PathBuf;

use clap::Subcommand;
use glow_core::RoutineEngine;

use super::{load_products, load_rules};

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List the products in a file
    List {
        /// Path to a JSON array of products
        #[arg(long)]
        products: PathBuf,
    },
    /// Show each product's canonical category and active key
    Normalize {
        /// Path to a JSON array of products
        #[arg(long)]
        products: PathBuf,
        /// TOML rules file overriding the built-in rule set
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Emit the enriched products as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ProductsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductsAction::List { products } => {
            let products = load_products(&products)?;
            for product in &products {
                let brand = product.brand.as_deref().unwrap_or("-");
                println!("{}  {}  [{}] {}", product.id, brand, product.category, product.name);
            }
            println!("{} products", products.len());
        }
        ProductsAction::Normalize {
            products,
            rules,
            json,
        } => {
            let products = load_products(&products)?;
            let engine = RoutineEngine::with_rules(load_rules(rules.as_deref())?)?;
            let enriched = engine.normalize(&products);

            if json {
                println!("{}", serde_json::to_string_pretty(&enriched)?);
                return Ok(());
            }

            for product in &enriched {
                let mut line = format!(
                    "{}  {} -> {}",
                    product.product.id, product.product.category, product.canonical_category
                );
                match product.active_key {
                    Some(key) => line.push_str(&format!(" ({key})")),
                    None => {
                        if !product.canonical_category.is_known() {
                            line.push_str("  [unrecognized: dropped from routines]");
                        }
                    }
                }
                println!("{line}");
            }
        }
    }
    Ok(())
}
