use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use glow_core::{RoutineEngine, TimeOfDay};

use super::{load_products, load_rules};

#[derive(Subcommand)]
pub enum RoutineAction {
    /// Build an ordered routine for a date and time of day
    Build {
        /// Path to a JSON array of products
        #[arg(long)]
        products: PathBuf,
        /// Time of day: morning or evening
        #[arg(long)]
        context: TimeOfDay,
        /// Build date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// TOML rules file overriding the built-in rule set
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Emit the full routine as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: RoutineAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RoutineAction::Build {
            products,
            context,
            date,
            rules,
            json,
        } => {
            let products = load_products(&products)?;
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let engine = RoutineEngine::with_rules(load_rules(rules.as_deref())?)?;

            let routine = engine.build(&products, context, date);

            if json {
                println!("{}", serde_json::to_string_pretty(&routine)?);
                return Ok(());
            }

            println!(
                "{} routine for {} ({} steps, {} actives)",
                context,
                routine.summary.date,
                routine.steps.len(),
                routine.summary.active_count
            );
            for (index, step) in routine.steps.iter().enumerate() {
                let mut line = format!(
                    "{:>2}. [{}] {}",
                    index + 1,
                    step.product.canonical_category,
                    step.product.product.name
                );
                if let Some(key) = step.product.active_key {
                    line.push_str(&format!(" ({key})"));
                }
                println!("{line}");
            }
            if !routine.excluded.is_empty() {
                println!("skipped:");
                for excluded in &routine.excluded {
                    println!(
                        "  - {}: {}",
                        excluded.product.product.name, excluded.reason
                    );
                }
            }
        }
    }
    Ok(())
}
