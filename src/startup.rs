//! Startup revision beeps.
//!
//! Encodes the 8-bit device revision as a base-4 digit sequence of tones so
//! a board's version can be checked by ear, with no other interface. Each
//! 2-bit field gets its own tone; the field value is the repeat count.
//!
//! Samples are pumped in through the public byte-ingestion path like any
//! other producer, with no privileged queue access. If the queue fills, the
//! remaining tones are simply dropped.

use crate::queue::ToneQueue;
use crate::sample::ToneSample;

/// Base tone per 2-bit field, indexed by bit position (LSB field first).
/// A descending C arpeggio, played most-significant field first.
pub const REVISION_TONES: [u16; 4] = [261, 196, 164, 130];

/// Length of each revision tone.
pub const REVISION_NOTE_MS: u16 = 150;

/// Silence between repeats of a revision tone.
pub const REVISION_REST_MS: u16 = 15;

/// Queue the audible encoding of a revision byte.
///
/// Fields are played most significant first; a field value `c` queues `c`
/// repetitions of its tone, each followed by a short rest. Call once at
/// startup, after the queue and scheduler are initialized. Non-blocking:
/// tones that do not fit are dropped, not retried.
pub fn play_startup_sequence<const N: usize>(queue: &ToneQueue<N>, revision: u8) {
    let mut dropped: u32 = 0;

    for pos in (0..4).rev() {
        let count = (revision >> (pos * 2)) & 0x3;
        let tone = ToneSample::new(REVISION_TONES[pos as usize], REVISION_NOTE_MS);
        let rest = ToneSample::rest(REVISION_REST_MS);

        for _ in 0..count {
            if queue.enqueue_bytes(&tone.to_wire()).is_err() {
                dropped += 1;
            }
            if queue.enqueue_bytes(&rest.to_wire()).is_err() {
                dropped += 1;
            }
        }
    }

    log::debug!("startup sequence queued for revision {revision:#04x}");
    if dropped > 0 {
        log::warn!("startup sequence dropped {dropped} samples (queue full)");
    }
}
