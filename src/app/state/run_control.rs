use std::time::{Duration, Instant};

/// How long `running` must stay continuously true before the interrupt
/// affordance replaces the run button. Executions that finish faster never
/// flicker the button.
pub const INTERRUPT_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunButton {
    Interrupt,
    RunStale,
    Inactive,
}

/// Debounce bookkeeping for the run control. `running_since` is stamped
/// when execution starts and cleared the moment it stops; everything else
/// is derived at render time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunControlState {
    pub running_since: Option<Instant>,
}

impl RunControlState {
    pub fn set_running(&mut self, running: bool, now: Instant) {
        if running {
            if self.running_since.is_none() {
                self.running_since = Some(now);
            }
        } else {
            self.running_since = None;
        }
    }

    #[must_use]
    pub fn show_interrupt(&self, now: Instant) -> bool {
        self.running_since
            .is_some_and(|since| now.duration_since(since) >= INTERRUPT_DEBOUNCE)
    }

    #[must_use]
    pub fn button(&self, needs_run: bool, now: Instant) -> RunButton {
        if self.show_interrupt(now) {
            RunButton::Interrupt
        } else if needs_run {
            RunButton::RunStale
        } else {
            RunButton::Inactive
        }
    }
}
