use crate::model::config::TimerConfig;

/// Countdown cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn title(self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Emitted when a phase runs out. This is the notification side channel:
/// the caller turns it into a toast or a bell, and dropping it on the
/// floor affects nothing in the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseEnd {
    pub finished: Phase,
    pub next: Phase,
    pub sessions_completed: u32,
}

impl PhaseEnd {
    /// Toast title and recommended action for this transition
    pub fn message(&self) -> (&'static str, &'static str) {
        match (self.finished, self.next) {
            (Phase::Work, Phase::LongBreak) => (
                "Work session complete",
                "Time for a long break. You've earned it.",
            ),
            (Phase::Work, _) => (
                "Work session complete",
                "Time for a short break. Step away from your studies.",
            ),
            _ => ("Break complete", "Ready to get back to focused studying?"),
        }
    }
}

/// The work / short-break / long-break state machine.
///
/// The clock model is a whole-second countdown driven by an external 1 Hz
/// tick. Hitting zero performs the phase transition atomically with that
/// decrement, so a tick produces at most one transition. The machine
/// pauses on every completion; the user starts the next phase.
#[derive(Debug, Clone)]
pub struct CountdownCycle {
    settings: TimerConfig,
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    sessions_completed: u32,
}

impl CountdownCycle {
    pub fn new(mut settings: TimerConfig) -> Self {
        // zero durations would make phases unreachable or divide by zero
        settings.work_minutes = settings.work_minutes.max(1);
        settings.short_break_minutes = settings.short_break_minutes.max(1);
        settings.long_break_minutes = settings.long_break_minutes.max(1);
        settings.sessions_until_long_break = settings.sessions_until_long_break.max(1);
        let remaining_secs = settings.work_minutes * 60;
        CountdownCycle {
            settings,
            phase: Phase::Work,
            remaining_secs,
            running: false,
            sessions_completed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    pub fn sessions_until_long_break(&self) -> u32 {
        self.settings.sessions_until_long_break
    }

    /// Configured length of the current phase, in seconds
    pub fn phase_duration_secs(&self) -> u32 {
        self.duration_secs(self.phase)
    }

    /// Fraction of the current phase already elapsed, for the gauge
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration_secs();
        (total - self.remaining_secs) as f64 / total as f64
    }

    /// Flip running/paused. Phase and remaining time are untouched.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to a paused Work phase at full duration, counter zeroed.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.remaining_secs = self.settings.work_minutes * 60;
        self.running = false;
        self.sessions_completed = 0;
    }

    /// Advance the countdown by one second. Returns the transition event
    /// when this tick completed a phase.
    pub fn tick(&mut self) -> Option<PhaseEnd> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        Some(self.complete_phase())
    }

    fn complete_phase(&mut self) -> PhaseEnd {
        self.running = false;
        let finished = self.phase;
        let next = match finished {
            Phase::Work => {
                self.sessions_completed += 1;
                if self.sessions_completed % self.settings.sessions_until_long_break == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.phase = next;
        self.remaining_secs = self.duration_secs(next);
        PhaseEnd {
            finished,
            next,
            sessions_completed: self.sessions_completed,
        }
    }

    fn duration_secs(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Work => self.settings.work_minutes,
            Phase::ShortBreak => self.settings.short_break_minutes,
            Phase::LongBreak => self.settings.long_break_minutes,
        };
        minutes * 60
    }

    /// "MM:SS" for the timer display
    pub fn format_remaining(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_settings() -> TimerConfig {
        TimerConfig {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 2,
            sessions_until_long_break: 4,
            sound: false,
        }
    }

    /// Run the machine to the end of the current phase, returning the event.
    fn run_out(cycle: &mut CountdownCycle) -> PhaseEnd {
        if !cycle.is_running() {
            cycle.toggle();
        }
        loop {
            if let Some(end) = cycle.tick() {
                return end;
            }
        }
    }

    #[test]
    fn starts_paused_in_work_at_full_duration() {
        let cycle = CountdownCycle::new(short_settings());
        assert_eq!(cycle.phase(), Phase::Work);
        assert_eq!(cycle.remaining_secs(), 60);
        assert!(!cycle.is_running());
        assert_eq!(cycle.sessions_completed(), 0);
    }

    #[test]
    fn no_ticks_while_paused() {
        let mut cycle = CountdownCycle::new(short_settings());
        assert_eq!(cycle.tick(), None);
        assert_eq!(cycle.remaining_secs(), 60);
    }

    #[test]
    fn fourth_work_expiry_goes_to_long_break() {
        let mut cycle = CountdownCycle::new(short_settings());
        for expected_sessions in 1..=3 {
            let end = run_out(&mut cycle);
            assert_eq!(end.finished, Phase::Work);
            assert_eq!(end.next, Phase::ShortBreak);
            assert_eq!(end.sessions_completed, expected_sessions);
            let end = run_out(&mut cycle);
            assert_eq!(end.finished, Phase::ShortBreak);
            assert_eq!(end.next, Phase::Work);
        }
        let end = run_out(&mut cycle);
        assert_eq!(end.finished, Phase::Work);
        assert_eq!(end.next, Phase::LongBreak);
        assert_eq!(end.sessions_completed, 4);
        assert_eq!(cycle.remaining_secs(), 120);
    }

    #[test]
    fn break_expiry_returns_to_work() {
        let mut cycle = CountdownCycle::new(short_settings());
        run_out(&mut cycle); // work → short break
        let end = run_out(&mut cycle);
        assert_eq!(end.finished, Phase::ShortBreak);
        assert_eq!(end.next, Phase::Work);
        assert_eq!(cycle.remaining_secs(), 60);
    }

    #[test]
    fn machine_pauses_on_completion() {
        let mut cycle = CountdownCycle::new(short_settings());
        run_out(&mut cycle);
        assert!(!cycle.is_running());
        // a further tick does nothing until resumed
        assert_eq!(cycle.tick(), None);
        assert_eq!(cycle.remaining_secs(), 60);
    }

    #[test]
    fn toggle_preserves_phase_and_remaining() {
        let mut cycle = CountdownCycle::new(short_settings());
        cycle.toggle();
        for _ in 0..10 {
            cycle.tick();
        }
        let remaining = cycle.remaining_secs();
        cycle.toggle();
        assert!(!cycle.is_running());
        assert_eq!(cycle.remaining_secs(), remaining);
        assert_eq!(cycle.phase(), Phase::Work);
        cycle.toggle();
        assert!(cycle.is_running());
        assert_eq!(cycle.remaining_secs(), remaining);
    }

    #[test]
    fn reset_restores_work_and_zeroes_the_counter() {
        let mut cycle = CountdownCycle::new(short_settings());
        run_out(&mut cycle);
        assert_eq!(cycle.sessions_completed(), 1);
        cycle.reset();
        assert_eq!(cycle.phase(), Phase::Work);
        assert_eq!(cycle.remaining_secs(), 60);
        assert_eq!(cycle.sessions_completed(), 0);
        assert!(!cycle.is_running());
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut cycle = CountdownCycle::new(short_settings());
        assert_eq!(cycle.progress(), 0.0);
        cycle.toggle();
        for _ in 0..30 {
            cycle.tick();
        }
        assert!((cycle.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn remaining_formats_as_minutes_and_seconds() {
        let mut cycle = CountdownCycle::new(TimerConfig::default());
        assert_eq!(cycle.format_remaining(), "25:00");
        cycle.toggle();
        cycle.tick();
        assert_eq!(cycle.format_remaining(), "24:59");
    }

    #[test]
    fn long_break_messages_differ_from_short() {
        let long = PhaseEnd {
            finished: Phase::Work,
            next: Phase::LongBreak,
            sessions_completed: 4,
        };
        let short = PhaseEnd {
            finished: Phase::Work,
            next: Phase::ShortBreak,
            sessions_completed: 1,
        };
        assert_ne!(long.message().1, short.message().1);
    }
}
