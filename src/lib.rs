//! # PiezoSequencer
//!
//! Queued tone sequencer driver for piezo-style buzzers.
//!
//! ## Architecture
//!
//! Data flows one direction:
//!
//! ```text
//! Producer ──▶ ToneQueue ──▶ PlaybackScheduler ──▶ SquareWave ──▶ output line
//!              (lock-free)   (1 kHz tick)          (hw interrupt)
//! ```
//!
//! - Producers push wire-encoded `(frequency, duration)` bursts into the
//!   queue; admission is all-or-nothing.
//! - The scheduler consumes one sample per activation, counts its duration
//!   in ticks and enforces a short silent gap between notes.
//! - The square-wave generator programs a hardware timer whose interrupt
//!   toggles the output line; the handler does nothing else.
//! - A one-shot startup sequencer beeps out the device revision in base 4
//!   through the same ingestion path as any other producer.
//!
//! Core logic is `no_std` and host-testable; platform glue lives behind the
//! [`hal::PulseTimer`] trait.

#![cfg_attr(not(test), no_std)]

pub mod hal;
pub mod queue;
pub mod sample;
pub mod scheduler;
pub mod startup;
pub mod wave;

pub use hal::PulseTimer;
pub use queue::{EnqueueError, ToneQueue, DEFAULT_QUEUE_LEN};
pub use sample::ToneSample;
pub use scheduler::{PlaybackScheduler, PlaybackState, SchedulerConfig, TICK_HZ};
pub use startup::play_startup_sequence;
pub use wave::{SquareWave, MAX_FREQ_HZ, TIMER_BASE_HZ};
