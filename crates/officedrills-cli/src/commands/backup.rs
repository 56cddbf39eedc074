use std::path::PathBuf;

use super::open_scheduler;

pub fn run(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let json = open_scheduler()?.backup_json()?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Backup written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
