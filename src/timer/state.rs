use serde::{Deserialize, Serialize};

use crate::error::TimerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Emitted by [`SessionTimer::tick`] on the tick that reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Finished,
}

/// Countdown in whole seconds.
///
/// `Idle -> Running -> Finished`, with `Running <-> Idle` for pause and
/// resume. `remaining_seconds` only moves while running, and the tick that
/// lands on zero performs the `Finished` transition itself, so the event is
/// observed exactly once per run. Only `reset` leaves `Finished`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionTimer {
    total_seconds: u32,
    remaining_seconds: u32,
    phase: TimerPhase,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn configure(&mut self, duration_seconds: u32) -> Result<(), TimerError> {
        if self.phase != TimerPhase::Idle {
            return Err(TimerError::InvalidState {
                operation: "configure",
                phase: self.phase,
            });
        }
        if duration_seconds == 0 {
            return Err(TimerError::ZeroDuration);
        }
        self.total_seconds = duration_seconds;
        self.remaining_seconds = duration_seconds;
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.phase {
            TimerPhase::Running => Ok(()),
            TimerPhase::Finished => Err(TimerError::InvalidState {
                operation: "start",
                phase: self.phase,
            }),
            TimerPhase::Idle => {
                if self.total_seconds == 0 {
                    return Err(TimerError::NotConfigured);
                }
                self.phase = TimerPhase::Running;
                Ok(())
            }
        }
    }

    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Idle;
        }
    }

    /// Advances one second. Outside `Running` this does nothing; the clock
    /// is stopped whenever the timer leaves `Running`.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Finished;
            return Some(TimerEvent::Finished);
        }
        None
    }

    /// Back to `Idle` from any phase. A non-zero `to_seconds` becomes the new
    /// total; otherwise the configured total is restored.
    pub fn reset(&mut self, to_seconds: Option<u32>) {
        if let Some(seconds) = to_seconds.filter(|s| *s > 0) {
            self.total_seconds = seconds;
        }
        self.remaining_seconds = self.total_seconds;
        self.phase = TimerPhase::Idle;
    }

    /// Fraction of the session already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds - self.remaining_seconds;
        (elapsed as f32 / self.total_seconds as f32).clamp(0.0, 1.0)
    }
}
