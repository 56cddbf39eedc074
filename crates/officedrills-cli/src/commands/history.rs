use clap::{Subcommand, ValueEnum};
use officedrills_core::Period;
use std::path::PathBuf;

use super::{open_scheduler, print_json};

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Today,
    Week,
    Month,
    All,
}

impl From<PeriodArg> for Period {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Today => Period::Today,
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
            PeriodArg::All => Period::All,
        }
    }
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Recorded breaks, newest first
    List {
        #[arg(long, value_enum, default_value = "all")]
        period: PeriodArg,
        /// Show at most this many
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Aggregate statistics
    Stats {
        #[arg(long, value_enum, default_value = "today")]
        period: PeriodArg,
    },
    /// Export every exercise outcome as CSV
    ExportCsv {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let sched = open_scheduler()?;
    let history = sched.history()?;
    let today = chrono::Utc::now().date_naive();

    match action {
        HistoryAction::List { period, limit } => {
            let mut sessions = history.in_period(period.into(), today);
            if let Some(limit) = limit {
                sessions.truncate(limit);
            }
            print_json(&sessions)?;
        }
        HistoryAction::Stats { period } => {
            let stats = history.stats(period.into(), today);
            print_json(&stats)?;
        }
        HistoryAction::ExportCsv { output } => {
            let csv = history.export_csv();
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("History written to {}", path.display());
                }
                None => println!("{csv}"),
            }
        }
    }
    Ok(())
}
