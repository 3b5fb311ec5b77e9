pub mod products;
pub mod routine;
pub mod rules;

use std::fs;
use std::path::Path;

use glow_core::{Product, RuleSet};

/// Load a products file: a JSON array of raw product records.
pub fn load_products(path: &Path) -> Result<Vec<Product>, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a rule set from a TOML rules file, or fall back to the built-in one.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(RuleSet::from_toml_str(&contents)?)
        }
        None => Ok(RuleSet::default()),
    }
}
