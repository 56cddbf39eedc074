use clap::Subcommand;
use officedrills_core::Settings;

use super::open_scheduler;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "interval", "selected_category")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset {
        /// Also wipe history, custom exercises, cooldown and the saved timer
        #[arg(long)]
        all: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let settings = Settings::load_or_default();
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load()?;
            settings.set(&key, &value)?;
            settings.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let settings = Settings::load_or_default();
            let json = serde_json::to_string_pretty(&settings)?;
            println!("{json}");
        }
        ConfigAction::Reset { all: false } => {
            let settings = Settings::default();
            settings.save()?;
            println!("config reset to defaults");
        }
        ConfigAction::Reset { all: true } => {
            let mut sched = open_scheduler()?;
            sched.clear_all()?;
            sched.settings().save()?;
            println!("all data cleared");
        }
    }
    Ok(())
}
