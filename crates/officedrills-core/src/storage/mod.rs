mod config;
pub mod database;
mod store;

pub use config::Settings;
pub use database::SqliteStore;
pub use store::{keys, MemoryStore, Store, StoreExt};

use std::path::PathBuf;

/// Returns `~/.config/officedrills[-dev]/` based on OFFICEDRILLS_ENV.
///
/// Set OFFICEDRILLS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("OFFICEDRILLS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("officedrills-dev")
    } else {
        base_dir.join("officedrills")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
