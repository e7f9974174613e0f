//! Focus countdown driven by caller-scheduled one-second ticks.
//!
//! # Invariants
//! - `remaining_secs <= duration_secs`.
//! - A finished countdown is stopped; further ticks report `Idle`.

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is paused or stopped; nothing changed.
    Idle,
    /// One second elapsed; carries seconds left.
    Running(u32),
    /// This tick reached zero and stopped the timer.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_MINUTES)
    }
}

impl FocusTimer {
    pub fn new(minutes: u32) -> Self {
        let duration_secs = minutes.saturating_mul(60);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
        }
    }

    /// Starts the countdown. Returns `false` when it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stops ticking and keeps the remaining time.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Pauses and restores the full configured duration.
    pub fn reset(&mut self) {
        self.pause();
        self.remaining_secs = self.duration_secs;
    }

    /// Changes the configured duration and the remaining time with it.
    pub fn set_duration(&mut self, minutes: u32) {
        self.duration_secs = minutes.saturating_mul(60);
        self.remaining_secs = self.duration_secs;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            return TimerTick::Finished;
        }
        TimerTick::Running(self.remaining_secs)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{FocusTimer, TimerTick};

    #[test]
    fn ticks_only_while_running() {
        let mut timer = FocusTimer::new(1);
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(timer.tick(), TimerTick::Running(59));
        assert_eq!(timer.display(), "00:59");
    }

    #[test]
    fn pause_keeps_remaining_and_reset_restores_it() {
        let mut timer = FocusTimer::new(25);
        timer.start();
        timer.tick();
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), TimerTick::Idle);
        assert_eq!(timer.display(), "24:58");

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.display(), "25:00");
    }

    #[test]
    fn reaching_zero_finishes_and_stops() {
        let mut timer = FocusTimer::new(1);
        timer.start();
        for _ in 0..59 {
            assert!(matches!(timer.tick(), TimerTick::Running(_)));
        }
        assert_eq!(timer.tick(), TimerTick::Finished);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), TimerTick::Idle);
    }

    #[test]
    fn set_duration_updates_remaining_time() {
        let mut timer = FocusTimer::default();
        timer.set_duration(50);
        assert_eq!(timer.remaining_secs(), 3000);
        assert_eq!(timer.display(), "50:00");
    }
}
