mod clock;
mod countdown;
mod engine;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Countdown, TickHandle, TickOutcome};
pub use engine::{TimerController, TimerPhase, TimerState};
