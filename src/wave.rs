//! Square-wave generator.
//!
//! Translates a tone frequency into a hardware toggle period and gates the
//! periodic interrupt source that flips the output line. Integer-only,
//! no floating point in the tick path.

use crate::hal::PulseTimer;

/// Timing base of the toggle timer in Hz (counter ticks are microseconds).
pub const TIMER_BASE_HZ: u32 = 1_000_000;

/// Frequency ceiling. Requests above this are clamped rather than rejected,
/// keeping a degenerate or malicious producer from saturating the interrupt
/// controller.
pub const MAX_FREQ_HZ: u16 = 10_000;

/// Time between successive output-line flips for the given frequency, in
/// microseconds. Each firing toggles the line once; two toggles make one
/// full wave cycle, hence the halving.
pub const fn toggle_period_us(freq_hz: u16) -> u32 {
    let freq = if freq_hz > MAX_FREQ_HZ {
        MAX_FREQ_HZ as u32
    } else {
        freq_hz as u32
    };
    (TIMER_BASE_HZ / freq) / 2
}

/// Square-wave output over a [`PulseTimer`].
///
/// Holds no waveform state of its own: the hardware counter is the phase,
/// and silence is simply the interrupt source disabled.
pub struct SquareWave<T: PulseTimer> {
    timer: T,
}

impl<T: PulseTimer> SquareWave<T> {
    /// Wrap a pulse timer. The timer starts silent.
    pub fn new(timer: T) -> Self {
        Self { timer }
    }

    /// Configure the generator for a tone.
    ///
    /// Frequency 0 disables the periodic interrupt and leaves the output
    /// line at its last level (a rest). Anything else is clamped to
    /// [`MAX_FREQ_HZ`], the counter restarted and the interrupt enabled.
    #[inline]
    pub fn set_tone(&mut self, freq_hz: u16) {
        if freq_hz == 0 {
            self.timer.disable();
            return;
        }

        self.timer.configure_period(toggle_period_us(freq_hz));
        self.timer.enable();
    }

    /// Stop toggling. Idempotent: silencing a silent generator is a no-op.
    #[inline]
    pub fn silence(&mut self) {
        self.timer.disable();
    }

    /// Access the underlying timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Consume the generator, returning the timer.
    pub fn into_timer(self) -> T {
        self.timer
    }
}
