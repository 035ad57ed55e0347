pub mod state;

pub use state::{SessionTimer, TimerEvent, TimerPhase};
