//! Playback scheduler.
//!
//! Three-state machine (Sounding, Gap, Idle) evaluated once per tick at a
//! fixed 1 kHz rate. Consumes one queued sample at a time, counts its
//! duration in ticks, enforces a short silent gap between notes and gates
//! the square-wave generator accordingly.
//!
//! Pure logic over the [`PulseTimer`] seam, fully testable on host.

use crate::hal::PulseTimer;
use crate::queue::{ToneQueue, DEFAULT_QUEUE_LEN};
use crate::wave::SquareWave;

/// Tick rate the scheduler is designed for: one tick per millisecond.
pub const TICK_HZ: u32 = 1_000;

/// Silent ticks enforced between consecutive notes.
pub const DEFAULT_GAP_TICKS: u32 = 5;

/// What the scheduler is doing between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Queue drained, generator off, waiting for samples.
    Idle,
    /// A sample's duration is running (a rest also counts as sounding).
    Sounding,
    /// Post-note silence before the next dequeue.
    Gap,
}

/// Scheduler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SchedulerConfig {
    /// Silent ticks between consecutive notes.
    pub gap_ticks: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            gap_ticks: DEFAULT_GAP_TICKS,
        }
    }
}

/// Tick-driven playback scheduler.
///
/// # Example
///
/// ```ignore
/// static QUEUE: ToneQueue = ToneQueue::new();
///
/// let wave = SquareWave::new(EspPulseTimer::new(peripherals.timer00, buzzer_pin)?);
/// let mut scheduler = PlaybackScheduler::new(&QUEUE, wave);
///
/// // From the 1 kHz periodic context:
/// scheduler.tick();
/// ```
pub struct PlaybackScheduler<'a, T: PulseTimer, const N: usize = DEFAULT_QUEUE_LEN> {
    queue: &'a ToneQueue<N>,
    wave: SquareWave<T>,
    config: SchedulerConfig,

    /// Ticks since the current sample started (the activation tick counts
    /// as the first one).
    elapsed: u32,

    /// Duration of the sample currently sounding, 0 when idle.
    active_duration: u32,
}

impl<'a, T: PulseTimer, const N: usize> PlaybackScheduler<'a, T, N> {
    /// Create a scheduler with the default configuration.
    pub fn new(queue: &'a ToneQueue<N>, wave: SquareWave<T>) -> Self {
        Self::with_config(queue, wave, SchedulerConfig::default())
    }

    /// Create a scheduler with an explicit configuration.
    pub fn with_config(queue: &'a ToneQueue<N>, wave: SquareWave<T>, config: SchedulerConfig) -> Self {
        Self {
            queue,
            wave,
            config,
            elapsed: 0,
            active_duration: 0,
        }
    }

    /// Advance playback by one tick.
    ///
    /// Must be invoked at the fixed [`TICK_HZ`] rate from a single context;
    /// never concurrently with itself.
    ///
    /// Branches, in strict order:
    /// 1. Duration still running: count the tick and return (hot path).
    /// 2. Inside the post-note gap window: silence the generator
    ///    (idempotent) and keep counting.
    /// 3. Gap over (or idle): dequeue. A sample configures the generator and
    ///    restarts the counters; an empty queue silences everything and
    ///    leaves only the emptiness check to repeat per tick.
    #[inline]
    pub fn tick(&mut self) {
        if self.elapsed < self.active_duration {
            // Currently sounding something. Count the tick and carry on.
            self.elapsed += 1;
            return;
        }

        if self.active_duration != 0 && self.elapsed < self.active_duration + self.config.gap_ticks {
            // Inter-note gap. Re-silencing an already-silent generator is a
            // no-op, so this branch is harmless on every gap tick.
            self.wave.silence();
            self.elapsed += 1;
            return;
        }

        match self.queue.dequeue_one() {
            Some(sample) => {
                // A rest (freq 0) keeps the generator off while its
                // duration runs.
                self.wave.set_tone(sample.freq_hz);
                self.active_duration = u32::from(sample.duration_ms);
                // The activation tick is the first millisecond of playback.
                self.elapsed = 1;
            }
            None => {
                self.wave.silence();
                self.elapsed = 0;
                self.active_duration = 0;
            }
        }
    }

    /// Current playback state.
    pub fn state(&self) -> PlaybackState {
        if self.active_duration == 0 {
            PlaybackState::Idle
        } else if self.elapsed <= self.active_duration {
            PlaybackState::Sounding
        } else {
            PlaybackState::Gap
        }
    }

    /// Ticks since the current sample started (0 when idle).
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Duration of the sample currently sounding (0 when idle).
    pub fn active_duration(&self) -> u32 {
        self.active_duration
    }

    /// Access the square-wave generator (e.g. to inspect the timer).
    pub fn wave(&self) -> &SquareWave<T> {
        &self.wave
    }
}
