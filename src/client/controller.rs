//! Client countdown state machine
//!
//! The controller never touches the clock, the cache or the network itself.
//! Each transition updates the phase and returns the effects the caller must
//! perform, in order.

use tracing::debug;

use crate::state::RemainingTime;

/// Whether a countdown is running on this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running { end_time: i64 },
}

/// Status line shown next to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A countdown is running and the start control is disabled
    Cooldown,
    /// No countdown; the start control is enabled
    Ready,
}

impl Status {
    pub fn message(&self) -> &'static str {
        match self {
            Status::Cooldown => "Cooldown Active",
            Status::Ready => "Ready! ⚡",
        }
    }

    /// Label of the start control in this status
    pub fn start_label(&self) -> &'static str {
        match self {
            Status::Cooldown => "On Cooldown",
            Status::Ready => "I said it again!!!",
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartTicking,
    StopTicking,
    WriteCache(i64),
    ClearCache,
    NotifyServer(i64),
    Render(RemainingTime),
    Status(Status),
}

#[derive(Debug, Clone)]
pub struct Controller {
    phase: Phase,
    duration_millis: i64,
}

impl Controller {
    /// A controller whose `start` runs countdowns of `duration_millis`
    pub fn new(duration_millis: i64) -> Self {
        Self {
            phase: Phase::Idle,
            duration_millis,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn end_time(&self) -> Option<i64> {
        match self.phase {
            Phase::Running { end_time } => Some(end_time),
            Phase::Idle => None,
        }
    }

    /// The start control is disabled during a cooldown
    pub fn start_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Restore from the locally cached end time, without any network call.
    ///
    /// Text that is not an integer timestamp is treated like an expired entry.
    pub fn resume(&mut self, cached: Option<&str>, now: i64) -> Vec<Effect> {
        let Some(text) = cached else {
            return Vec::new();
        };

        match text.trim().parse::<i64>() {
            Ok(end_time) if end_time > now => {
                debug!("Resuming cached countdown ending at {}", end_time);
                self.run_until(end_time)
            }
            _ => {
                debug!("Discarding cached end time {:?}", text);
                vec![Effect::ClearCache]
            }
        }
    }

    /// Adopt the server's countdown when nothing is running locally
    pub fn adopt_remote(&mut self, end_time: Option<i64>, now: i64) -> Vec<Effect> {
        match (self.phase, end_time) {
            (Phase::Idle, Some(end_time)) if end_time > now => {
                debug!("Adopting server countdown ending at {}", end_time);
                let mut effects = vec![Effect::WriteCache(end_time)];
                effects.extend(self.run_until(end_time));
                effects
            }
            _ => Vec::new(),
        }
    }

    /// Begin a fresh countdown from `now`, replacing any running one
    pub fn start(&mut self, now: i64) -> Vec<Effect> {
        let end_time = now.saturating_add(self.duration_millis);
        let mut effects = vec![Effect::WriteCache(end_time), Effect::NotifyServer(end_time)];
        effects.extend(self.run_until(end_time));
        effects
    }

    /// Recompute the display at `now`
    pub fn tick(&mut self, now: i64) -> Vec<Effect> {
        let Phase::Running { end_time } = self.phase else {
            return Vec::new();
        };

        let remaining = end_time - now;
        if remaining > 0 {
            return vec![Effect::Render(RemainingTime::from_millis(remaining))];
        }

        self.phase = Phase::Idle;
        vec![
            Effect::StopTicking,
            Effect::Render(RemainingTime::zero()),
            Effect::ClearCache,
            Effect::Status(Status::Ready),
        ]
    }

    fn run_until(&mut self, end_time: i64) -> Vec<Effect> {
        self.phase = Phase::Running { end_time };
        vec![Effect::Status(Status::Cooldown), Effect::StartTicking]
    }
}
