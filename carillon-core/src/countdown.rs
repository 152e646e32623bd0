//! Countdown timer complication
//!
//! Counts a configured duration down to zero one second at a time, then
//! rings and counts the overrun back up until acknowledged. The time base
//! calls [`CountdownTimer::tick`], which only latches a pending flag; all
//! state transitions and side effects happen in [`CountdownTimer::poll`].

use crate::chrono::{elapsed, Millis, TimeValue};
use crate::melody::{Melody, MelodyPlayer};
use crate::traits::display::{bcd_high, bcd_low};
use crate::traits::{DigitBuffer, DisplaySink, ToneOutput};
use crate::RunChange;

/// How long the alarm rings before resetting itself.
const ALARM_DURATION_MS: u32 = 10 * 60_000;

/// How long a stopped-but-unreset timer lingers before reverting to idle.
const RESET_TIMEOUT_MS: u32 = 10_000;

/// Countdown duration configured at construction.
const DEFAULT_MINUTES: u8 = 5;

/// Countdown timer state machine.
///
/// `default_value` is the last user-configured duration; it is restored
/// into `value` when the alarm triggers and on reset.
pub struct CountdownTimer {
    value: TimeValue,
    default_value: TimeValue,
    /// Digit projection, refreshed on every visible state change.
    pub digits: DigitBuffer,
    active: bool,
    running: bool,
    alarm: bool,
    tick_pending: bool,
    alarm_since: Millis,
    idle_since: Millis,
}

impl CountdownTimer {
    /// Create a timer with the default five-minute duration.
    pub fn new() -> Self {
        let mut timer = Self {
            value: TimeValue::default(),
            default_value: TimeValue::from_minutes(DEFAULT_MINUTES),
            digits: DigitBuffer::default(),
            active: false,
            running: false,
            alarm: false,
            tick_pending: false,
            alarm_since: 0,
            idle_since: 0,
        };
        timer.default_value.round_up_minute();
        timer.value = timer.default_value;
        timer.display_refresh();
        timer
    }

    /// Remaining duration (or elapsed overrun while alarming).
    pub fn value(&self) -> TimeValue {
        self.value
    }

    /// Whether the timer has been started and not yet reset.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the timer is counting.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the alarm is ringing.
    pub fn is_alarming(&self) -> bool {
        self.alarm
    }

    /// Time-base signal: one second has elapsed. Latches a coalescing
    /// pending flag; all processing is deferred to [`Self::poll`].
    pub fn tick(&mut self) {
        if self.running {
            self.tick_pending = true;
        }
    }

    /// Poll-loop handler: applies a pending tick and enforces the alarm and
    /// idle-reset timeouts.
    pub fn poll<O, D>(
        &mut self,
        now: Millis,
        melody: &mut MelodyPlayer<O>,
        display: &mut D,
    ) -> Option<RunChange>
    where
        O: ToneOutput,
        D: DisplaySink,
    {
        let mut change = None;

        if self.tick_pending {
            if !self.alarm {
                self.alarm = self.value.decrement_second();
                if self.alarm {
                    self.alarm_since = now;
                    self.value = self.default_value;
                    display.reset_blinking();
                    display.blink_all(true);
                    melody.play(Melody::Timer, now);
                }
            } else {
                // Ringing: count the overrun since the alarm fired.
                self.value.increment_second();
            }
            self.display_refresh();
            self.tick_pending = false;
        }

        if self.alarm && elapsed(now, self.alarm_since) > ALARM_DURATION_MS {
            change = self.reset_alarm(melody, display);
        }

        if self.running {
            self.idle_since = now;
        } else if self.active && elapsed(now, self.idle_since) > RESET_TIMEOUT_MS {
            change = Some(self.reset(melody, display));
        }

        change
    }

    /// Add ten seconds to the configured duration.
    pub fn second_increase(&mut self) {
        self.value.increment_ten_seconds();
        self.display_refresh();
        self.default_value = self.value;
    }

    /// Take ten seconds off the configured duration.
    pub fn second_decrease(&mut self) {
        self.value.decrement_ten_seconds();
        self.display_refresh();
        self.default_value = self.value;
    }

    /// Add one minute to the configured duration.
    pub fn minute_increase(&mut self) {
        self.value.increment_minute();
        self.display_refresh();
        self.default_value = self.value;
    }

    /// Take one minute off the configured duration.
    pub fn minute_decrease(&mut self) {
        self.value.decrement_minute();
        self.display_refresh();
        self.default_value = self.value;
    }

    /// Start counting. No-op while already running.
    pub fn start(&mut self) -> Option<RunChange> {
        if self.running {
            return None;
        }
        self.active = true;
        self.running = true;
        Some(RunChange::Started)
    }

    /// Stop counting. No-op while not running.
    pub fn stop(&mut self) -> Option<RunChange> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(RunChange::Stopped)
    }

    /// Acknowledge a ringing alarm: silence melody and blink, stop the
    /// timer. Idempotent.
    pub fn reset_alarm<O, D>(
        &mut self,
        melody: &mut MelodyPlayer<O>,
        display: &mut D,
    ) -> Option<RunChange>
    where
        O: ToneOutput,
        D: DisplaySink,
    {
        if !self.alarm {
            return None;
        }
        self.alarm = false;
        display.blink_all(false);
        melody.stop();
        self.stop()
    }

    /// Full reset back to idle: clears alarm/active/running, rounds the
    /// configured duration up to a whole non-zero minute and restores it.
    /// Idempotent; always reports [`RunChange::Stopped`].
    pub fn reset<O, D>(&mut self, melody: &mut MelodyPlayer<O>, display: &mut D) -> RunChange
    where
        O: ToneOutput,
        D: DisplaySink,
    {
        self.reset_alarm(melody, display);
        self.active = false;
        self.running = false;
        self.digits.reset();
        self.default_value.round_up_minute();
        self.value = self.default_value;
        self.display_refresh();
        RunChange::Stopped
    }

    /// Project the current value onto the digit buffer.
    pub fn display_refresh(&mut self) {
        self.digits[0].value = bcd_low(self.value.second);
        self.digits[1].value = bcd_high(self.value.second);
        self.digits[2].value = bcd_low(self.value.minute);
        self.digits[3].value = bcd_high(self.value.minute);
        self.digits[4].value = bcd_low(self.value.hour);
        self.digits[5].value = bcd_high(self.value.hour);
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTone(bool);

    impl ToneOutput for MockTone {
        fn set_active(&mut self, active: bool) {
            self.0 = active;
        }

        fn is_active(&self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct MockDisplay {
        blink_all: bool,
        phase_resets: u32,
    }

    impl DisplaySink for MockDisplay {
        fn blink_all(&mut self, enable: bool) {
            self.blink_all = enable;
        }

        fn reset_blinking(&mut self) {
            self.phase_resets += 1;
        }
    }

    fn fixture() -> (CountdownTimer, MelodyPlayer<MockTone>, MockDisplay) {
        (
            CountdownTimer::new(),
            MelodyPlayer::new(MockTone(false)),
            MockDisplay::default(),
        )
    }

    /// Drive `n` whole seconds through tick + poll at a fixed timestamp.
    fn run_seconds(
        timer: &mut CountdownTimer,
        melody: &mut MelodyPlayer<MockTone>,
        display: &mut MockDisplay,
        now: Millis,
        n: u32,
    ) {
        for _ in 0..n {
            timer.tick();
            timer.poll(now, melody, display);
        }
    }

    #[test]
    fn counts_default_duration_down_to_alarm() {
        let (mut timer, mut melody, mut display) = fixture();
        assert_eq!(timer.value(), TimeValue::from_minutes(5));

        assert_eq!(timer.start(), Some(RunChange::Started));
        run_seconds(&mut timer, &mut melody, &mut display, 1000, 299);
        assert!(!timer.is_alarming());
        assert_eq!((timer.value().minute, timer.value().second), (0, 1));

        // The 300th second reaches zero: alarm fires and the default
        // duration is restored for the overrun count.
        run_seconds(&mut timer, &mut melody, &mut display, 1000, 1);
        assert!(timer.is_alarming());
        assert_eq!(timer.value(), TimeValue::from_minutes(5));
        assert!(display.blink_all);
        assert!(melody.is_playing());
    }

    #[test]
    fn alarming_ticks_count_up() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.start();
        run_seconds(&mut timer, &mut melody, &mut display, 1000, 300);
        assert!(timer.is_alarming());

        run_seconds(&mut timer, &mut melody, &mut display, 1000, 3);
        let value = timer.value();
        assert_eq!((value.minute, value.second), (5, 3));
    }

    #[test]
    fn tick_while_stopped_is_ignored() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.tick();
        timer.poll(0, &mut melody, &mut display);
        assert_eq!(timer.value(), TimeValue::from_minutes(5));
    }

    #[test]
    fn tick_only_latches_no_state_change_before_poll() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.start();
        timer.tick();
        timer.tick(); // coalesces, never queues
        assert_eq!(timer.value(), TimeValue::from_minutes(5));

        timer.poll(0, &mut melody, &mut display);
        let value = timer.value();
        assert_eq!((value.minute, value.second), (4, 59));

        // The second tick was coalesced into the first.
        timer.poll(0, &mut melody, &mut display);
        assert_eq!((timer.value().minute, timer.value().second), (4, 59));
    }

    #[test]
    fn start_and_stop_report_once() {
        let (mut timer, _, _) = fixture();
        assert_eq!(timer.start(), Some(RunChange::Started));
        assert_eq!(timer.start(), None);
        assert_eq!(timer.stop(), Some(RunChange::Stopped));
        assert_eq!(timer.stop(), None);
    }

    #[test]
    fn configuration_resnapshots_default() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.minute_increase();
        timer.second_increase();
        let value = timer.value();
        assert_eq!((value.minute, value.second), (6, 10));

        // Reset rounds the snapshot up to a whole minute.
        timer.reset(&mut melody, &mut display);
        assert_eq!(timer.value(), TimeValue::from_minutes(7));
    }

    #[test]
    fn reset_alarm_silences_and_stops() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.start();
        run_seconds(&mut timer, &mut melody, &mut display, 1000, 300);
        assert!(timer.is_alarming());

        let change = timer.reset_alarm(&mut melody, &mut display);
        assert_eq!(change, Some(RunChange::Stopped));
        assert!(!timer.is_alarming());
        assert!(!melody.is_playing());
        assert!(!melody.output().is_active());
        assert!(!display.blink_all);

        // Idempotent.
        assert_eq!(timer.reset_alarm(&mut melody, &mut display), None);
    }

    #[test]
    fn alarm_times_out_after_ten_minutes() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.start();
        run_seconds(&mut timer, &mut melody, &mut display, 1000, 300);
        assert!(timer.is_alarming());

        // Just inside the window: still ringing.
        timer.poll(1000 + ALARM_DURATION_MS, &mut melody, &mut display);
        assert!(timer.is_alarming());

        let change = timer.poll(1001 + ALARM_DURATION_MS, &mut melody, &mut display);
        assert_eq!(change, Some(RunChange::Stopped));
        assert!(!timer.is_alarming());
        assert!(!melody.is_playing());
    }

    #[test]
    fn paused_timer_reverts_to_idle_after_timeout() {
        let (mut timer, mut melody, mut display) = fixture();
        timer.start();
        run_seconds(&mut timer, &mut melody, &mut display, 1000, 10);
        timer.stop();
        assert!(timer.is_active());

        // Inside the reset window nothing happens.
        timer.poll(1000 + RESET_TIMEOUT_MS, &mut melody, &mut display);
        assert!(timer.is_active());

        let change = timer.poll(1001 + RESET_TIMEOUT_MS, &mut melody, &mut display);
        assert_eq!(change, Some(RunChange::Stopped));
        assert!(!timer.is_active());
        assert_eq!(timer.value(), TimeValue::from_minutes(5));
    }

    #[test]
    fn display_projection_is_bcd_split() {
        let (mut timer, _, _) = fixture();
        timer.minute_increase(); // 6 minutes
        timer.second_decrease(); // 5:50
        assert_eq!(timer.digits[0].value, 0);
        assert_eq!(timer.digits[1].value, 5);
        assert_eq!(timer.digits[2].value, 5);
        assert_eq!(timer.digits[3].value, 0);
    }
}
