//! Time-value arithmetic shared by the timer components
//!
//! [`TimeValue`] backs both the countdown timer and the stopwatch:
//! increments cascade carries upward without a ceiling, decrements cascade
//! borrows downward and clamp at zero. Every decrement reports whether the
//! value just reached zero; that return is the only "expired" signal the
//! callers use.

/// Millisecond reading of the monotonic counter.
///
/// The counter wraps; always compare readings through [`elapsed`].
pub type Millis = u32;

/// Wraparound-safe elapsed time between two counter readings.
#[inline]
pub fn elapsed(now: Millis, since: Millis) -> u32 {
    now.wrapping_sub(since)
}

/// Tenths/seconds/minutes/hours timekeeping value.
///
/// All fields stay non-negative. Hours carry no upper bound of their own;
/// callers impose ceilings (the stopwatch caps at 1h59m59.9s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeValue {
    /// Tenths of a second, 0-9.
    pub tenth: u8,
    /// Seconds, 0-59.
    pub second: u8,
    /// Minutes, 0-59.
    pub minute: u8,
    /// Hours. Saturates at `u8::MAX` rather than wrapping.
    pub hour: u8,
}

impl TimeValue {
    /// A value of whole minutes, all other fields zero.
    pub const fn from_minutes(minute: u8) -> Self {
        Self {
            tenth: 0,
            second: 0,
            minute,
            hour: 0,
        }
    }

    /// True when all four fields are zero.
    pub fn is_zero(&self) -> bool {
        self.tenth == 0 && self.second == 0 && self.minute == 0 && self.hour == 0
    }

    /// Reset to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by one tenth of a second, carrying upward.
    pub fn increment_tenth(&mut self) {
        self.tenth += 1;
        if self.tenth > 9 {
            self.tenth = 0;
            self.second += 1;
        }
        if self.second > 59 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute > 59 {
            self.minute = 0;
            self.hour = self.hour.saturating_add(1);
        }
    }

    /// Advance by one second, carrying upward.
    pub fn increment_second(&mut self) {
        self.second += 1;
        if self.second > 59 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute > 59 {
            self.minute = 0;
            self.hour = self.hour.saturating_add(1);
        }
    }

    /// Advance by ten seconds. On overflow the seconds field snaps to zero
    /// and the minute carries (the adjustment steps keep seconds a multiple
    /// of ten).
    pub fn increment_ten_seconds(&mut self) {
        self.second += 10;
        if self.second > 59 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute > 59 {
            self.minute = 0;
            self.hour = self.hour.saturating_add(1);
        }
    }

    /// Advance by one minute, carrying upward.
    pub fn increment_minute(&mut self) {
        self.minute += 1;
        if self.minute > 59 {
            self.minute = 0;
            self.hour = self.hour.saturating_add(1);
        }
    }

    /// Take one second off. Returns true iff the value is now exactly zero.
    pub fn decrement_second(&mut self) -> bool {
        if self.second == 0 {
            self.second = 59;
            self.borrow_minute();
        } else {
            self.second -= 1;
        }
        self.is_zero()
    }

    /// Take ten seconds off. On underflow the seconds field snaps to 59 and
    /// the minute borrows. Returns true iff the value is now exactly zero.
    pub fn decrement_ten_seconds(&mut self) -> bool {
        if self.second < 10 {
            self.second = 59;
            self.borrow_minute();
        } else {
            self.second -= 10;
        }
        self.is_zero()
    }

    /// Take one minute off. Returns true iff the value is now exactly zero.
    pub fn decrement_minute(&mut self) -> bool {
        if self.minute == 0 {
            self.minute = 59;
            self.borrow_hour();
        } else {
            self.minute -= 1;
        }
        self.is_zero()
    }

    /// Round up to the next whole, non-zero minute: tenths and seconds are
    /// zeroed (a nonzero second carries into the minute), and a zero minute
    /// count is forced to one so the result is never a zero-length duration.
    pub fn round_up_minute(&mut self) {
        self.tenth = 0;
        if self.second != 0 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute > 59 {
            self.minute = 0;
            self.hour = self.hour.saturating_add(1);
        }
        if self.minute == 0 {
            self.minute = 1;
        }
    }

    fn borrow_minute(&mut self) {
        if self.minute == 0 {
            self.minute = 59;
            self.borrow_hour();
        } else {
            self.minute -= 1;
        }
    }

    fn borrow_hour(&mut self) {
        if self.hour == 0 {
            // Borrow past zero: clamp the whole value.
            *self = Self::default();
        } else {
            self.hour -= 1;
        }
    }
}
