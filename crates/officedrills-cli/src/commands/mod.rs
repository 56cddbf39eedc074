pub mod backup;
pub mod breaks;
pub mod config;
pub mod exercise;
pub mod history;
pub mod timer;

use officedrills_core::notify::Notification;
use officedrills_core::{BreakScheduler, Notifier, Settings, SqliteStore};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

pub type Scheduler = BreakScheduler<SqliteStore, TerminalNotifier>;

/// Prints the notification to stdout, ringing the terminal bell when the
/// notification asks for sound.
pub struct TerminalNotifier;

impl TerminalNotifier {
    fn render(notification: &Notification) -> String {
        let bell = if notification.audible() { "\x07" } else { "" };
        format!("{bell}{} {}", notification.title, notification.body)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        println!("{}", Self::render(notification));
    }
}

/// Scheduler over the user's settings file and database.
pub fn open_scheduler() -> Result<Scheduler, Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let store = SqliteStore::open()?;
    Ok(BreakScheduler::new(settings, store, TerminalNotifier))
}

/// Seeded when `seed` is given, so a break can be replayed.
pub fn rng(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    }
}

pub fn print_json<T>(value: &T) -> Result<(), Box<dyn std::error::Error>>
where
    T: serde::Serialize + ?Sized,
{
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
