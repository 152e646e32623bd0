//! Melody playback over a binary tone output
//!
//! A melody script is a sequence of toggle intervals in milliseconds; the
//! player flips the actuator whenever the current interval expires, wrapping
//! to the start of the script until stopped. Timing resolution is bounded by
//! the poll rate, not exact.

use crate::chrono::{elapsed, Millis};
use crate::traits::ToneOutput;

/// Toggle intervals (ms) of the wall-clock alarm melody.
const ALARM_SCRIPT: &[u32] = &[1450, 50, 200, 50, 200, 50];

/// Toggle intervals (ms) of the countdown timer melody.
const TIMER_SCRIPT: &[u32] = &[950, 50];

/// Backdating applied to the toggle timestamp on `play` so the first toggle
/// fires on the next poll instead of after the first scripted interval.
const PLAY_LEAD_MS: u32 = 5000;

/// Available melodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Melody {
    /// Long ring pattern used by the wall-clock alarm.
    Alarm,
    /// Short beep pattern used by the countdown timer.
    Timer,
}

impl Melody {
    fn script(self) -> &'static [u32] {
        match self {
            Melody::Alarm => ALARM_SCRIPT,
            Melody::Timer => TIMER_SCRIPT,
        }
    }
}

/// Asynchronous melody player.
///
/// At most one melody plays at a time; a `play` request while something is
/// already playing is dropped, not queued.
pub struct MelodyPlayer<O> {
    output: O,
    script: &'static [u32],
    index: usize,
    last_toggle: Millis,
    playing: bool,
}

impl<O: ToneOutput> MelodyPlayer<O> {
    /// Create a player with the actuator forced idle.
    pub fn new(mut output: O) -> Self {
        output.set_active(false);
        Self {
            output,
            script: ALARM_SCRIPT,
            index: 0,
            last_toggle: 0,
            playing: false,
        }
    }

    /// Whether a melody is currently playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Begin asynchronous playback of a melody. Dropped while already
    /// playing.
    pub fn play(&mut self, melody: Melody, now: Millis) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.script = melody.script();
        self.last_toggle = now.wrapping_sub(PLAY_LEAD_MS);
        self.index = 0;
    }

    /// Advance playback: if the current scripted interval has expired, flip
    /// the actuator and move to the next interval, wrapping at the end of
    /// the script. Call once per poll cycle.
    pub fn poll(&mut self, now: Millis) {
        if !self.playing {
            return;
        }
        if elapsed(now, self.last_toggle) > self.script[self.index] {
            let active = self.output.is_active();
            self.output.set_active(!active);
            self.last_toggle = now;
            self.index += 1;
            if self.index >= self.script.len() {
                self.index = 0;
            }
        }
    }

    /// Halt playback and force the actuator idle.
    pub fn stop(&mut self) {
        self.playing = false;
        self.index = 0;
        self.output.set_active(false);
    }

    /// Access the underlying actuator output.
    pub fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTone {
        active: bool,
        toggles: u32,
    }

    impl MockTone {
        fn new() -> Self {
            Self {
                active: false,
                toggles: 0,
            }
        }
    }

    impl ToneOutput for MockTone {
        fn set_active(&mut self, active: bool) {
            if active != self.active {
                self.toggles += 1;
            }
            self.active = active;
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    #[test]
    fn first_toggle_fires_on_next_poll() {
        let mut player = MelodyPlayer::new(MockTone::new());
        player.play(Melody::Alarm, 10_000);
        player.poll(10_001);
        assert!(player.output().is_active());
    }

    #[test]
    fn play_while_playing_is_dropped() {
        let mut player = MelodyPlayer::new(MockTone::new());
        player.play(Melody::Timer, 0);
        player.poll(1);
        let index = player.index;

        // A second request must not restart or switch scripts.
        player.play(Melody::Alarm, 2);
        assert_eq!(player.script, TIMER_SCRIPT);
        assert_eq!(player.index, index);
    }

    #[test]
    fn playback_wraps_at_end_of_script() {
        let mut player = MelodyPlayer::new(MockTone::new());
        let mut now = 0;
        player.play(Melody::Timer, now);

        // Walk through more intervals than the script holds.
        for _ in 0..5 {
            now += 1000;
            player.poll(now);
        }
        assert!(player.is_playing());
        assert!(player.index < TIMER_SCRIPT.len());
        assert!(player.output().toggles >= 4);
    }

    #[test]
    fn stop_forces_actuator_idle() {
        let mut player = MelodyPlayer::new(MockTone::new());
        let mut now = 50_000;
        player.play(Melody::Alarm, now);

        // Stop at several playback positions; the output must end idle.
        for steps in 0..4 {
            for _ in 0..steps {
                now += 2000;
                player.poll(now);
            }
            player.stop();
            assert!(!player.output().is_active());
            assert!(!player.is_playing());
            player.play(Melody::Alarm, now);
        }
    }

    #[test]
    fn idle_player_never_touches_output() {
        let mut player = MelodyPlayer::new(MockTone::new());
        player.poll(123);
        player.poll(99_999);
        assert_eq!(player.output().toggles, 0);
    }
}
