//! Alarm clock complication
//!
//! Fires a melody when the wall clock reaches the configured time on a day
//! the active mode covers. Supports snoozing, a ring timeout, and a
//! mode-cycling scheme where the mode digit doubles as the on-screen code.

use crate::chrono::{elapsed, Millis};
use crate::melody::{Melody, MelodyPlayer};
use crate::traits::display::{bcd_high, bcd_low};
use crate::traits::{DigitBuffer, DisplaySink, ToneOutput};

/// How long a snooze postpones the alarm.
const SNOOZE_DURATION_MS: u32 = 8 * 60_000;

/// How long the alarm rings before resetting itself.
const ALARM_DURATION_MS: u32 = 30 * 60_000;

/// Indicator blink half-period while snoozing.
const INDICATOR_BLINK_MS: u32 = 500;

/// Day coverage of the alarm. The discriminant is the code shown on the
/// mode digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlarmMode {
    Off = 0,
    Weekends = 2,
    Weekdays = 5,
    Daily = 7,
}

impl AlarmMode {
    /// Display/persistence code of this mode.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            2 => Some(Self::Weekends),
            5 => Some(Self::Weekdays),
            7 => Some(Self::Daily),
            _ => None,
        }
    }

    /// Whether this mode covers the given weekday (0 = Sunday).
    pub fn matches_weekday(self, weekday: u8) -> bool {
        match self {
            Self::Off => false,
            Self::Weekends => weekday == 0 || weekday == 6,
            Self::Weekdays => (1..=5).contains(&weekday),
            Self::Daily => true,
        }
    }
}

/// Persistable alarm configuration.
///
/// `last_mode` remembers the armed mode across an off/on toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlarmSettings {
    pub hour: u8,
    pub minute: u8,
    pub mode: AlarmMode,
    pub last_mode: AlarmMode,
}

impl AlarmSettings {
    /// Build settings from raw stored bytes, clamping anything out of
    /// range back to the defaults.
    pub fn from_raw(hour: u8, minute: u8, mode: u8, last_mode: u8) -> Self {
        Self {
            hour: if hour > 23 { 0 } else { hour },
            minute: if minute > 59 { 0 } else { minute },
            mode: AlarmMode::from_code(mode).unwrap_or(AlarmMode::Off),
            last_mode: AlarmMode::from_code(last_mode).unwrap_or(AlarmMode::Daily),
        }
    }
}

impl Default for AlarmSettings {
    fn default() -> Self {
        Self {
            hour: 0,
            minute: 0,
            mode: AlarmMode::Off,
            last_mode: AlarmMode::Daily,
        }
    }
}

/// Alarm clock state machine.
pub struct AlarmClock {
    settings: AlarmSettings,
    /// Digit projection of the configured time and mode.
    pub digits: DigitBuffer,
    /// Armed indicator; blinks while snoozing.
    pub indicator: bool,
    alarm: bool,
    snoozing: bool,
    alarm_since: Millis,
    snooze_since: Millis,
    blink_since: Millis,
    last_minute: u8,
    fired_this_minute: bool,
}

impl AlarmClock {
    pub fn new(settings: AlarmSettings) -> Self {
        let mut clock = Self {
            settings: AlarmSettings::from_raw(
                settings.hour,
                settings.minute,
                settings.mode.code(),
                settings.last_mode.code(),
            ),
            digits: DigitBuffer::default(),
            indicator: false,
            alarm: false,
            snoozing: false,
            alarm_since: 0,
            snooze_since: 0,
            blink_since: 0,
            last_minute: u8::MAX,
            fired_this_minute: false,
        };
        clock.display_refresh();
        clock
    }

    pub fn settings(&self) -> AlarmSettings {
        self.settings
    }

    /// Whether the alarm is ringing.
    pub fn is_ringing(&self) -> bool {
        self.alarm
    }

    pub fn is_snoozing(&self) -> bool {
        self.snoozing
    }

    /// Poll-loop handler. `gate` suppresses firing (e.g. while the user is
    /// in a settings view); the wall-clock fields come from the caller.
    pub fn poll<O, D>(
        &mut self,
        now: Millis,
        hour: u8,
        minute: u8,
        weekday: u8,
        gate: bool,
        melody: &mut MelodyPlayer<O>,
        display: &mut D,
    ) where
        O: ToneOutput,
        D: DisplaySink,
    {
        // The per-minute latch keeps the alarm from re-firing after an
        // acknowledge inside the same matching minute.
        if minute != self.last_minute {
            self.fired_this_minute = false;
        }

        if gate
            && !self.snoozing
            && self.settings.mode != AlarmMode::Off
            && !self.fired_this_minute
            && minute == self.settings.minute
            && hour == self.settings.hour
            && self.settings.mode.matches_weekday(weekday)
        {
            self.start_alarm(now, melody, display);
            self.fired_this_minute = true;
        }

        if self.snoozing {
            if elapsed(now, self.snooze_since) > SNOOZE_DURATION_MS {
                self.start_alarm(now, melody, display);
            } else if elapsed(now, self.blink_since) > INDICATOR_BLINK_MS {
                self.indicator = !self.indicator;
                self.blink_since = now;
            }
        }

        if self.alarm && elapsed(now, self.alarm_since) > ALARM_DURATION_MS {
            self.reset_alarm(melody, display);
        }

        self.last_minute = minute;
    }

    /// Start ringing. No-op while already ringing.
    pub fn start_alarm<O, D>(&mut self, now: Millis, melody: &mut MelodyPlayer<O>, display: &mut D)
    where
        O: ToneOutput,
        D: DisplaySink,
    {
        if self.alarm {
            return;
        }
        self.alarm = true;
        self.snoozing = false;
        self.alarm_since = now;
        display.reset_blinking();
        display.blink_all(true);
        melody.play(Melody::Alarm, now);
        self.display_refresh();
    }

    /// Postpone a ringing alarm. No-op unless ringing.
    pub fn snooze<O, D>(&mut self, now: Millis, melody: &mut MelodyPlayer<O>, display: &mut D)
    where
        O: ToneOutput,
        D: DisplaySink,
    {
        if !self.alarm || self.snoozing {
            return;
        }
        self.alarm = false;
        self.snoozing = true;
        self.snooze_since = now;
        self.blink_since = now;
        display.blink_all(false);
        melody.stop();
    }

    /// Acknowledge the alarm: stop ringing and cancel any snooze.
    pub fn reset_alarm<O, D>(&mut self, melody: &mut MelodyPlayer<O>, display: &mut D)
    where
        O: ToneOutput,
        D: DisplaySink,
    {
        if !self.alarm && !self.snoozing {
            return;
        }
        self.alarm = false;
        self.snoozing = false;
        display.blink_all(false);
        melody.stop();
        self.display_refresh();
    }

    /// Cycle Off -> Weekends -> Weekdays -> Daily -> Off.
    pub fn mode_increase(&mut self) {
        self.settings.mode = match self.settings.mode {
            AlarmMode::Off => AlarmMode::Weekends,
            AlarmMode::Weekends => AlarmMode::Weekdays,
            AlarmMode::Weekdays => AlarmMode::Daily,
            AlarmMode::Daily => {
                self.settings.last_mode = AlarmMode::Daily;
                AlarmMode::Off
            }
        };
        self.display_refresh();
    }

    /// Cycle Off -> Daily -> Weekdays -> Weekends -> Off.
    pub fn mode_decrease(&mut self) {
        self.settings.mode = match self.settings.mode {
            AlarmMode::Off => AlarmMode::Daily,
            AlarmMode::Daily => AlarmMode::Weekdays,
            AlarmMode::Weekdays => AlarmMode::Weekends,
            AlarmMode::Weekends => {
                self.settings.last_mode = AlarmMode::Daily;
                AlarmMode::Off
            }
        };
        self.display_refresh();
    }

    /// Toggle between off and the last armed mode.
    pub fn mode_toggle(&mut self) {
        if self.settings.mode == AlarmMode::Off {
            self.settings.mode = self.settings.last_mode;
        } else {
            self.settings.last_mode = self.settings.mode;
            self.settings.mode = AlarmMode::Off;
        }
        self.display_refresh();
    }

    pub fn hour_increase(&mut self) {
        self.settings.hour = if self.settings.hour >= 23 {
            0
        } else {
            self.settings.hour + 1
        };
        self.display_refresh();
    }

    pub fn hour_decrease(&mut self) {
        self.settings.hour = if self.settings.hour == 0 {
            23
        } else {
            self.settings.hour - 1
        };
        self.display_refresh();
    }

    pub fn minute_increase(&mut self) {
        self.settings.minute = if self.settings.minute >= 59 {
            0
        } else {
            self.settings.minute + 1
        };
        self.display_refresh();
    }

    pub fn minute_decrease(&mut self) {
        self.settings.minute = if self.settings.minute == 0 {
            59
        } else {
            self.settings.minute - 1
        };
        self.display_refresh();
    }

    /// Project the configured time and mode onto the digit buffer. The
    /// mode code occupies the lowest digit with a spacer next to it.
    pub fn display_refresh(&mut self) {
        for i in 0..crate::traits::NUM_DIGITS {
            self.digits[i].blank = false;
        }
        self.digits[0].value = self.settings.mode.code();
        self.digits[1].blank = true;
        self.digits[2].value = bcd_low(self.settings.minute);
        self.digits[3].value = bcd_high(self.settings.minute);
        self.digits[4].value = bcd_low(self.settings.hour);
        self.digits[5].value = bcd_high(self.settings.hour);
        self.indicator = self.settings.mode != AlarmMode::Off;
    }
}
