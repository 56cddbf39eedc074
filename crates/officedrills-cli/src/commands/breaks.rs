use clap::Subcommand;
use officedrills_core::session::WalkthroughStatus;
use officedrills_core::{Clock, Event, SessionRecorder};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::{open_scheduler, print_json, rng, Scheduler};

pub type Input = Lines<BufReader<Stdin>>;

#[derive(Subcommand)]
pub enum BreakAction {
    /// Show the exercises the next break would offer
    Preview {
        /// RNG seed for a repeatable pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Take a break now.
    ///
    /// Commands on stdin: d = done, s = skip, p = play/pause, c = cancel.
    Start {
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn run(action: BreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut sched = open_scheduler()?;

    match action {
        BreakAction::Preview { seed } => {
            let exercises = sched.preview_break(&mut rng(seed))?;
            print_json(&exercises)?;
        }
        BreakAction::Start { seed } => {
            sched.restore_timer()?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let mut input = BufReader::new(tokio::io::stdin()).lines();
                take_break(&mut sched, &mut input, seed).await
            })?;
            sched.save_timer()?;
        }
    }
    Ok(())
}

/// Select exercises, walk through them, and record the result.
pub async fn take_break(
    sched: &mut Scheduler,
    input: &mut Input,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut walk = sched.begin_break(&mut rng(seed))?;
    walk_through(&mut walk, input).await?;

    match walk.into_completed_break() {
        Some(done) => {
            println!(
                "break finished: {} completed, {} skipped",
                done.session.completed_count(),
                done.session.skipped_count()
            );
            for event in sched.record_completion(done)? {
                print_event(&event)?;
            }
        }
        None => println!("break cancelled"),
    }
    Ok(())
}

/// Drive the walkthrough until it finishes or is cancelled. Once stdin is
/// closed the countdowns keep running on their own.
async fn walk_through<C: Clock>(
    walk: &mut SessionRecorder<C>,
    input: &mut Input,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;
    let mut stdin_open = true;

    announce(walk);
    walk.play();

    while walk.status() == WalkthroughStatus::Active {
        let scheduled = walk.tick_handle();
        let index = walk.index();
        let events = tokio::select! {
            _ = ticker.tick() => match scheduled {
                Some(handle) => walk.tick(handle),
                None => Vec::new(),
            },
            line = input.next_line(), if stdin_open => match line? {
                Some(line) => apply_command(walk, line.trim()),
                None => {
                    stdin_open = false;
                    Vec::new()
                }
            },
        };

        for event in &events {
            print_event(event)?;
        }
        if walk.status() == WalkthroughStatus::Active && walk.index() != index {
            announce(walk);
            walk.play();
        }
    }
    Ok(())
}

fn apply_command<C: Clock>(walk: &mut SessionRecorder<C>, command: &str) -> Vec<Event> {
    match command {
        "d" | "done" => walk.complete(),
        "s" | "skip" => walk.skip(),
        "p" | "pause" | "play" => walk.toggle().into_iter().collect(),
        "c" | "cancel" => walk.cancel().into_iter().collect(),
        "" => Vec::new(),
        other => {
            eprintln!("unknown command: {other} (d = done, s = skip, p = play/pause, c = cancel)");
            Vec::new()
        }
    }
}

fn announce<C: Clock>(walk: &SessionRecorder<C>) {
    let Some(exercise) = walk.current() else {
        return;
    };
    println!(
        "[{}/{}] {} ({}, {}s)",
        walk.index() + 1,
        walk.exercises().len(),
        exercise.name,
        exercise.category,
        exercise.duration
    );
    if !exercise.description.is_empty() {
        println!("  {}", exercise.description);
    }
    for (step, instruction) in exercise.instructions.iter().enumerate() {
        println!("  {}. {instruction}", step + 1);
    }
}

pub fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
