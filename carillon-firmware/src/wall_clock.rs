//! Wall clock stand-in
//!
//! Tracks time of day and weekday from the firmware tick, until an RTC
//! driver takes over. Weekday 0 is Sunday.

/// Time-of-day counter advanced once per second.
pub struct WallClock {
    hour: u8,
    minute: u8,
    second: u8,
    weekday: u8,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            weekday: 0,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Advance by one second, rolling the weekday over at midnight.
    pub fn advance_second(&mut self) {
        self.second += 1;
        if self.second >= 60 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
        }
        if self.hour >= 24 {
            self.hour = 0;
            self.weekday = (self.weekday + 1) % 7;
        }
    }

    /// Set the time of day; out-of-range fields clamp to zero.
    pub fn set(&mut self, hour: u8, minute: u8, second: u8, weekday: u8) {
        self.hour = if hour > 23 { 0 } else { hour };
        self.minute = if minute > 59 { 0 } else { minute };
        self.second = if second > 59 { 0 } else { second };
        self.weekday = if weekday > 6 { 0 } else { weekday };
    }

    /// Bump the hour, leaving the rest of the time alone.
    pub fn hour_increase(&mut self) {
        self.hour = if self.hour >= 23 { 0 } else { self.hour + 1 };
    }

    /// Bump the minute and restart the current second.
    pub fn minute_increase(&mut self) {
        self.minute = if self.minute >= 59 { 0 } else { self.minute + 1 };
        self.second = 0;
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}
