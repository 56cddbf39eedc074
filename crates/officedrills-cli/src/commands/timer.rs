use clap::Subcommand;
use officedrills_core::{Event, TimerPhase};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::breaks::{print_event, take_break};
use super::{open_scheduler, print_json, Scheduler};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground and take breaks as they come due.
    ///
    /// Commands on stdin: s = start, p = pause, r = resume, z N = snooze N
    /// minutes, b = break now, q = quit.
    Run {
        /// RNG seed for exercise selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print current timer state as JSON
    Status,
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Stop the countdown, keeping the remaining time
    Stop,
    /// Reset to the configured interval
    Reset {
        /// Reset to this many minutes instead
        #[arg(long)]
        minutes: Option<u64>,
    },
    /// Push the next break this many minutes into the future
    Snooze {
        #[arg(default_value = "5")]
        minutes: u32,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut sched = open_scheduler()?;
    sched.restore_timer()?;

    let event = match action {
        TimerAction::Run { seed } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_foreground(&mut sched, seed))?;
            None
        }
        TimerAction::Status => Some(sched.timer().snapshot()),
        TimerAction::Start => sched.timer_mut().start(),
        TimerAction::Pause => sched.timer_mut().pause(),
        TimerAction::Resume => sched.timer_mut().resume(),
        TimerAction::Stop => sched.timer_mut().stop(),
        TimerAction::Reset { minutes } => {
            sched.timer_mut().reset(minutes.map(|m| m.saturating_mul(60)))
        }
        TimerAction::Snooze { minutes } => sched.timer_mut().snooze(minutes),
    };

    match event {
        Some(event) => print_json(&event)?,
        None => print_json(&sched.timer().snapshot())?,
    }
    sched.save_timer()?;
    Ok(())
}

async fn run_foreground(
    sched: &mut Scheduler,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;
    let mut stdin_open = true;
    // Each break advances the seed so a seeded run doesn't repeat itself.
    let mut seed = seed;

    if let Some(event) = sched.timer_mut().start() {
        print_event(&event)?;
    }

    loop {
        let scheduled = sched.timer().tick_handle();
        let command = tokio::select! {
            _ = ticker.tick() => {
                match scheduled.and_then(|handle| sched.timer_mut().tick(handle)) {
                    Some(event) => {
                        print_event(&event)?;
                        Command::Break
                    }
                    None => Command::None,
                }
            }
            line = input.next_line(), if stdin_open => match line? {
                Some(line) => parse_command(line.trim()),
                None => {
                    stdin_open = false;
                    Command::None
                }
            },
        };

        match command {
            Command::None => continue,
            Command::Quit => break,
            Command::Break => {
                sched.save_timer()?;
                if sched.timer().phase() == TimerPhase::Expired {
                    sched.on_break_due();
                }
                take_break(sched, &mut input, seed).await?;
                seed = seed.map(|s| s.wrapping_add(1));
                ticker.reset();
            }
            Command::Timer(apply) => {
                if let Some(event) = apply(sched) {
                    print_event(&event)?;
                }
            }
            Command::Snooze(minutes) => {
                if let Some(event) = sched.timer_mut().snooze(minutes) {
                    print_event(&event)?;
                }
            }
        }
        sched.save_timer()?;
    }

    debug!("foreground timer stopped");
    sched.save_timer()?;
    Ok(())
}

const TIMER_COMMANDS: &str =
    "s = start, p = pause, r = resume, z N = snooze, b = break, q = quit";

enum Command {
    None,
    Quit,
    Break,
    Timer(fn(&mut Scheduler) -> Option<Event>),
    Snooze(u32),
}

fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("s" | "start") => Command::Timer(|s| s.timer_mut().start()),
        Some("p" | "pause") => Command::Timer(|s| s.timer_mut().pause()),
        Some("r" | "resume") => Command::Timer(|s| s.timer_mut().resume()),
        Some("b" | "break") => Command::Break,
        Some("q" | "quit") => Command::Quit,
        Some("z" | "snooze") => match parts.next().map(str::parse::<u32>) {
            None => Command::Snooze(5),
            Some(Ok(minutes)) => Command::Snooze(minutes),
            Some(Err(_)) => {
                eprintln!("snooze takes a whole number of minutes");
                Command::None
            }
        },
        None => Command::None,
        Some(other) => {
            eprintln!("unknown command: {other} ({TIMER_COMMANDS})");
            Command::None
        }
    }
}
