//! Clock console
//!
//! Pure coordination layer between the button/tick tasks and the
//! complications: owns the wall clock, countdown timer, stopwatch, alarm
//! clock and melody player, routes buttons by the active view, and runs
//! every poll handler once per tick.

use carillon_core::alarm::{AlarmClock, AlarmSettings};
use carillon_core::chrono::Millis;
use carillon_core::countdown::CountdownTimer;
use carillon_core::melody::MelodyPlayer;
use carillon_core::stopwatch::Stopwatch;
use carillon_core::traits::display::{bcd_high, bcd_low};
use carillon_core::traits::{DigitBuffer, DisplaySink, ToneOutput};
use carillon_core::RunChange;

use crate::channels::Button;
use crate::tasks::tick::TICK_INTERVAL_MS;
use crate::wall_clock::WallClock;

/// Which complication owns the display and the Set/Plus/Minus buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    Clock,
    Timer,
    Stopwatch,
    Alarm,
}

impl View {
    fn next(self) -> Self {
        match self {
            Self::Clock => Self::Timer,
            Self::Timer => Self::Stopwatch,
            Self::Stopwatch => Self::Alarm,
            Self::Alarm => Self::Clock,
        }
    }
}

/// Panel-level blink state collected from the complications.
///
/// The display task reads `blink_all` each refresh; `take_phase_reset`
/// realigns the blink phase so a fresh blink starts visible.
#[derive(Default)]
pub struct PanelBlink {
    blink_all: bool,
    phase_reset: bool,
}

impl PanelBlink {
    pub fn blink_all(&self) -> bool {
        self.blink_all
    }

    pub fn take_phase_reset(&mut self) -> bool {
        core::mem::take(&mut self.phase_reset)
    }
}

impl DisplaySink for PanelBlink {
    fn blink_all(&mut self, enable: bool) {
        self.blink_all = enable;
    }

    fn reset_blinking(&mut self) {
        self.phase_reset = true;
    }
}

/// Console state: all complications plus the view and time bookkeeping.
pub struct Console<O: ToneOutput> {
    view: View,
    wall: WallClock,
    timer: CountdownTimer,
    stopwatch: Stopwatch,
    alarm: AlarmClock,
    melody: MelodyPlayer<O>,
    panel: PanelBlink,
    clock_digits: DigitBuffer,
    /// 100ms ticks since the last whole second
    tick_count: u8,
}

impl<O: ToneOutput> Console<O> {
    pub fn new(output: O, settings: AlarmSettings) -> Self {
        let mut console = Self {
            view: View::Clock,
            wall: WallClock::new(),
            timer: CountdownTimer::new(),
            stopwatch: Stopwatch::new(),
            alarm: AlarmClock::new(settings),
            melody: MelodyPlayer::new(output),
            panel: PanelBlink::default(),
            clock_digits: DigitBuffer::default(),
            tick_count: 0,
        };
        console.refresh_clock_digits();
        console
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn wall_clock(&self) -> &WallClock {
        &self.wall
    }

    pub fn panel(&mut self) -> &mut PanelBlink {
        &mut self.panel
    }

    /// Armed/snooze indicator lamp.
    pub fn alarm_indicator(&self) -> bool {
        self.alarm.indicator
    }

    /// Digit buffer of the active view.
    pub fn current_digits(&self) -> &DigitBuffer {
        match self.view {
            View::Clock => &self.clock_digits,
            View::Timer => &self.timer.digits,
            View::Stopwatch => &self.stopwatch.digits,
            View::Alarm => &self.alarm.digits,
        }
    }

    /// 100ms time-base handler: distributes ticks and runs every poll
    /// handler once.
    pub fn on_tick(&mut self, now: Millis) -> Option<RunChange> {
        self.stopwatch.tick();

        self.tick_count += 1;
        if self.tick_count >= (1000 / TICK_INTERVAL_MS) as u8 {
            self.tick_count = 0;
            self.timer.tick();
            self.wall.advance_second();
            self.refresh_clock_digits();
        }

        self.poll(now)
    }

    fn poll(&mut self, now: Millis) -> Option<RunChange> {
        let mut change = self.stopwatch.poll();
        if let Some(c) = self.timer.poll(now, &mut self.melody, &mut self.panel) {
            change = Some(c);
        }
        self.alarm.poll(
            now,
            self.wall.hour(),
            self.wall.minute(),
            self.wall.weekday(),
            true,
            &mut self.melody,
            &mut self.panel,
        );
        self.melody.poll(now);
        change
    }

    /// Button handler. A ringing alarm takes over the whole panel until
    /// snoozed or acknowledged.
    pub fn on_button(&mut self, now: Millis, button: Button) -> Option<RunChange> {
        if self.alarm.is_ringing() {
            match button {
                Button::Set => self.alarm.snooze(now, &mut self.melody, &mut self.panel),
                _ => self.alarm.reset_alarm(&mut self.melody, &mut self.panel),
            }
            return None;
        }

        if self.timer.is_alarming() {
            return self.timer.reset_alarm(&mut self.melody, &mut self.panel);
        }

        if button == Button::Mode {
            self.view = self.view.next();
            return None;
        }

        match self.view {
            View::Clock => {
                match button {
                    Button::Plus => self.wall.hour_increase(),
                    Button::Minus => self.wall.minute_increase(),
                    _ => {}
                }
                self.refresh_clock_digits();
                None
            }
            View::Timer => match button {
                Button::Set => {
                    if self.timer.is_running() {
                        self.timer.stop()
                    } else {
                        self.timer.start()
                    }
                }
                Button::Plus => {
                    self.timer.minute_increase();
                    None
                }
                Button::Minus => {
                    self.timer.minute_decrease();
                    None
                }
                Button::Mode => None,
            },
            View::Stopwatch => match button {
                Button::Set => {
                    if self.stopwatch.is_running() {
                        self.stopwatch.stop()
                    } else {
                        self.stopwatch.start()
                    }
                }
                Button::Plus => {
                    let paused = self.stopwatch.is_paused();
                    self.stopwatch.pause(!paused, &mut self.panel);
                    None
                }
                Button::Minus => self.stopwatch.reset(),
                Button::Mode => None,
            },
            View::Alarm => {
                match button {
                    Button::Set => self.alarm.mode_toggle(),
                    Button::Plus => self.alarm.hour_increase(),
                    Button::Minus => self.alarm.minute_increase(),
                    Button::Mode => {}
                }
                None
            }
        }
    }

    fn refresh_clock_digits(&mut self) {
        self.clock_digits[0].value = bcd_low(self.wall.second());
        self.clock_digits[1].value = bcd_high(self.wall.second());
        self.clock_digits[2].value = bcd_low(self.wall.minute());
        self.clock_digits[3].value = bcd_high(self.wall.minute());
        self.clock_digits[4].value = bcd_low(self.wall.hour());
        self.clock_digits[5].value = bcd_high(self.wall.hour());
        // Commas between the hh.mm.ss groups
        self.clock_digits[2].comma = true;
        self.clock_digits[4].comma = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carillon_core::alarm::AlarmMode;

    struct MockTone(bool);

    impl ToneOutput for MockTone {
        fn set_active(&mut self, active: bool) {
            self.0 = active;
        }

        fn is_active(&self) -> bool {
            self.0
        }
    }

    fn console() -> Console<MockTone> {
        Console::new(MockTone(false), AlarmSettings::default())
    }

    /// Drive `n` ticks, 100ms apart, starting after `start_ms`.
    fn run_ticks(console: &mut Console<MockTone>, start_ms: Millis, n: u32) -> Option<RunChange> {
        let mut change = None;
        for i in 1..=n {
            if let Some(c) = console.on_tick(start_ms + i * 100) {
                change = Some(c);
            }
        }
        change
    }

    #[test]
    fn mode_button_cycles_views() {
        let mut console = console();
        assert_eq!(console.view(), View::Clock);
        console.on_button(0, Button::Mode);
        assert_eq!(console.view(), View::Timer);
        console.on_button(0, Button::Mode);
        assert_eq!(console.view(), View::Stopwatch);
        console.on_button(0, Button::Mode);
        assert_eq!(console.view(), View::Alarm);
        console.on_button(0, Button::Mode);
        assert_eq!(console.view(), View::Clock);
    }

    #[test]
    fn ticks_advance_wall_clock_once_per_second() {
        let mut console = console();
        run_ticks(&mut console, 0, 25);
        assert_eq!(console.wall_clock().second(), 2);
        // Clock view shows ss in the low digit pair.
        assert_eq!(console.current_digits()[0].value, 2);
    }

    #[test]
    fn timer_runs_from_timer_view() {
        let mut console = console();
        console.on_button(0, Button::Mode); // Timer view
        let change = console.on_button(0, Button::Set);
        assert_eq!(change, Some(RunChange::Started));

        // One second of ticks counts the timer down from 5:00.
        run_ticks(&mut console, 0, 10);
        assert_eq!(console.current_digits()[0].value, 9);
        assert_eq!(console.current_digits()[1].value, 5);

        let change = console.on_button(2000, Button::Set);
        assert_eq!(change, Some(RunChange::Stopped));
    }

    #[test]
    fn stopwatch_pause_and_reset_from_buttons() {
        let mut console = console();
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode); // Stopwatch view
        console.on_button(0, Button::Set);
        run_ticks(&mut console, 0, 7);

        console.on_button(800, Button::Plus); // pause
        run_ticks(&mut console, 800, 5);
        assert_eq!(console.current_digits()[1].value, 7);

        console.on_button(1400, Button::Plus); // unpause
        assert_eq!(console.current_digits()[1].value, 2);
        assert_eq!(console.current_digits()[2].value, 1);

        let change = console.on_button(1500, Button::Minus); // reset
        assert_eq!(change, Some(RunChange::Stopped));
        assert_eq!(console.current_digits()[1].value, 0);
    }

    #[test]
    fn ringing_alarm_hijacks_buttons() {
        let mut console = console();
        // Arm a daily alarm at 00:01 from the alarm view.
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode); // Alarm view
        console.on_button(0, Button::Set); // toggle on (Daily)
        console.on_button(0, Button::Minus); // minute -> 1
        assert!(console.alarm_indicator());

        // Let the wall clock reach 00:01.
        run_ticks(&mut console, 0, 600);
        assert!(console.alarm.is_ringing());

        // Mode no longer cycles the view; it acknowledges.
        console.on_button(60_100, Button::Mode);
        assert!(!console.alarm.is_ringing());
        assert_eq!(console.view(), View::Alarm);
    }

    #[test]
    fn set_snoozes_ringing_alarm() {
        let mut console = console();
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Set);
        console.on_button(0, Button::Minus);
        run_ticks(&mut console, 0, 600);
        assert!(console.alarm.is_ringing());

        console.on_button(60_100, Button::Set);
        assert!(console.alarm.is_snoozing());
        assert!(!console.alarm.is_ringing());
    }

    #[test]
    fn alarm_mode_toggle_round_trip() {
        let mut console = console();
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode);
        console.on_button(0, Button::Mode); // Alarm view
        console.on_button(0, Button::Set);
        assert_eq!(console.alarm.settings().mode, AlarmMode::Daily);
        console.on_button(0, Button::Set);
        assert_eq!(console.alarm.settings().mode, AlarmMode::Off);
        assert!(!console.alarm_indicator());
    }
}
