use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use glow_core::{Compatibility, RulesBundle};

use super::load_rules;

#[derive(Subcommand)]
pub enum RulesAction {
    /// Show the active rule set
    Show {
        /// TOML rules file overriding the built-in rule set
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Emit the rule set as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Export the rule set as a versioned bundle
    Export {
        /// Bundle name
        #[arg(long)]
        name: String,
        /// TOML rules file overriding the built-in rule set
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a bundle, checking version compatibility
    Import {
        /// Path to a bundle JSON file
        file: PathBuf,
    },
}

pub fn run(action: RulesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RulesAction::Show { rules, json } => {
            let rules = load_rules(rules.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rules)?);
            } else {
                println!("{}", rules.to_toml_string()?);
            }
        }
        RulesAction::Export { name, rules, out } => {
            let rules = load_rules(rules.as_deref())?;
            let json = RulesBundle::new(name, rules).to_json()?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("bundle written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        RulesAction::Import { file } => {
            let contents = fs::read_to_string(&file)?;
            let (bundle, compat) = RulesBundle::import(&contents)?;
            if let Compatibility::MinorNewer { .. } = compat {
                eprintln!("warning: {compat}");
            }
            println!(
                "imported rule set '{}' (format {})",
                bundle.metadata.name, bundle.version
            );
        }
    }
    Ok(())
}
