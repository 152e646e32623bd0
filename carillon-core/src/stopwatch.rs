//! Stopwatch complication
//!
//! Counts up in tenths of a second to a ceiling of 1:59:59.9. Pausing only
//! freezes the digit projection; the value keeps accruing underneath.

use crate::chrono::TimeValue;
use crate::traits::display::{bcd_high, bcd_low};
use crate::traits::{DigitBuffer, DisplaySink};
use crate::RunChange;

/// Stopwatch state machine.
pub struct Stopwatch {
    value: TimeValue,
    /// Digit projection; frozen while paused.
    pub digits: DigitBuffer,
    active: bool,
    running: bool,
    paused: bool,
    tick_pending: bool,
}

impl Stopwatch {
    pub fn new() -> Self {
        let mut watch = Self {
            value: TimeValue::default(),
            digits: DigitBuffer::default(),
            active: false,
            running: false,
            paused: false,
            tick_pending: false,
        };
        watch.display_refresh();
        watch
    }

    /// Accumulated time, including time accrued while paused.
    pub fn value(&self) -> TimeValue {
        self.value
    }

    /// Whether the watch has been started and not yet reset.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the watch is counting.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the digit projection is frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Time-base signal: one tenth of a second has elapsed. Latches a
    /// coalescing pending flag; processing is deferred to [`Self::poll`].
    pub fn tick(&mut self) {
        if self.running {
            self.tick_pending = true;
        }
    }

    /// Poll-loop handler: applies a pending tick and enforces the
    /// two-hour ceiling.
    pub fn poll(&mut self) -> Option<RunChange> {
        let mut change = None;

        if self.tick_pending {
            self.value.increment_tenth();
            if !self.paused {
                self.display_refresh();
            }
            if self.value.hour > 1 {
                // Ceiling reached: clamp to 1:59:59.9 and halt.
                self.value = TimeValue {
                    tenth: 9,
                    second: 59,
                    minute: 59,
                    hour: 1,
                };
                change = self.stop();
            }
            self.tick_pending = false;
        }

        change
    }

    /// Start (or resume) counting. Always reports a start.
    pub fn start(&mut self) -> Option<RunChange> {
        self.active = true;
        self.running = true;
        Some(RunChange::Started)
    }

    /// Stop counting. Clears any pause so the final value is shown.
    /// No-op while not running.
    pub fn stop(&mut self) -> Option<RunChange> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.clear_pause();
        Some(RunChange::Stopped)
    }

    /// Freeze or unfreeze the digit projection. Freezing only takes effect
    /// while running; the value keeps accruing either way.
    pub fn pause<D: DisplaySink>(&mut self, enable: bool, display: &mut D) {
        if enable && self.running {
            self.paused = true;
            display.reset_blinking();
            self.digits.blink_all_digits(true);
        } else {
            self.clear_pause();
        }
    }

    /// Back to zero and idle. Always reports [`RunChange::Stopped`].
    pub fn reset(&mut self) -> Option<RunChange> {
        self.active = false;
        self.running = false;
        self.paused = false;
        self.digits.reset();
        self.value.reset();
        self.display_refresh();
        Some(RunChange::Stopped)
    }

    fn clear_pause(&mut self) {
        self.paused = false;
        self.display_refresh();
        self.digits.blink_all_digits(false);
    }

    /// Project the current value onto the digit buffer. The hour has no
    /// digit of its own; a comma on the minute tens marks the second hour.
    pub fn display_refresh(&mut self) {
        self.digits[0].value = 0;
        self.digits[1].value = self.value.tenth;
        self.digits[2].value = bcd_low(self.value.second);
        self.digits[3].value = bcd_high(self.value.second);
        self.digits[4].value = bcd_low(self.value.minute);
        self.digits[5].value = bcd_high(self.value.minute);
        if self.value.hour > 0 {
            self.digits[4].comma = true;
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}
