use clap::Subcommand;
use officedrills_core::{Category, CategoryFilter, ExerciseDraft, ValidationError};
use std::path::PathBuf;

use super::{open_scheduler, print_json};

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// List exercises in the catalog
    List {
        /// Only this category ("All" or a category name)
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
        /// Case-insensitive match on name or description
        #[arg(long, default_value = "")]
        search: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a custom exercise
    Add {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Seconds
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        category: Option<Category>,
        /// Instruction step (repeatable)
        #[arg(long = "step")]
        instructions: Vec<String>,
    },
    /// Remove an exercise by id
    Remove { id: String },
    /// Append exercises from a JSON array file
    Import { file: PathBuf },
    /// Write the catalog as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Restore the built-in exercises and clear the cooldown
    Reset,
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    let sched = open_scheduler()?;

    match action {
        ExerciseAction::List {
            category,
            search,
            json,
        } => {
            let catalog = sched.catalog()?;
            let exercises = catalog.search(&search, category);
            if json {
                print_json(&exercises)?;
            } else {
                for e in exercises {
                    println!(
                        "{:<38} {:<10} {:>3}s  {}",
                        e.id,
                        e.category.as_str(),
                        e.duration,
                        e.name
                    );
                }
            }
        }
        ExerciseAction::Add {
            name,
            description,
            duration,
            category,
            instructions,
        } => {
            let mut catalog = sched.catalog()?;
            let id = catalog.add(ExerciseDraft {
                name,
                description,
                duration,
                category,
                instructions,
            })?;
            sched.save_catalog(&catalog)?;
            println!("Exercise added: {id}");
        }
        ExerciseAction::Remove { id } => {
            let mut catalog = sched.catalog()?;
            if !catalog.remove(&id) {
                return Err(ValidationError::NotFound {
                    kind: "exercise",
                    id,
                }
                .into());
            }
            sched.save_catalog(&catalog)?;
            println!("Exercise removed: {id}");
        }
        ExerciseAction::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            let mut catalog = sched.catalog()?;
            let report = catalog.import_json(&json)?;
            sched.save_catalog(&catalog)?;
            println!(
                "Imported {} exercises ({} rejected)",
                report.accepted, report.rejected
            );
        }
        ExerciseAction::Export { output } => {
            let json = sched.catalog()?.export_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Catalog written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        ExerciseAction::Reset => {
            sched.reset_catalog()?;
            println!("Catalog reset to defaults");
        }
    }
    Ok(())
}
