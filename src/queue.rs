//! Lock-free tone sample queue.
//!
//! SPSC (single producer, single consumer) ring buffer of [`ToneSample`]s.
//! The producer is whatever context feeds tone bursts in (task or interrupt);
//! the consumer is the playback scheduler's 1 kHz tick.
//!
//! # Architecture
//!
//! ```text
//! Producer ──enqueue_bytes──▶ ToneQueue ──dequeue_one──▶ Scheduler
//!                             (lock-free)
//! ```
//!
//! Cursors are kept modulo `N`. One slot is permanently reserved so that
//! `write_pos == read_pos` always means *empty*, never full: at most `N - 1`
//! samples are occupied at any time.
//!
//! Ingestion is all-or-nothing: a burst that does not fit is rejected without
//! touching the buffer, so a rejected producer can simply retry the whole
//! burst later.

use core::cell::UnsafeCell;
use core::fmt;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::sample::ToneSample;

/// Default queue length in slots (one of which stays reserved).
pub const DEFAULT_QUEUE_LEN: usize = 32;

/// Why an ingestion call was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueError {
    /// Byte length is not a multiple of the encoded sample width.
    MalformedLength,

    /// The burst does not fit in the remaining free capacity.
    QueueFull,
}

impl fmt::Display for EnqueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnqueueError::MalformedLength => write!(f, "length not a multiple of sample width"),
            EnqueueError::QueueFull => write!(f, "burst exceeds free queue capacity"),
        }
    }
}

/// Lock-free SPSC ring buffer for tone samples.
///
/// # Safety
///
/// This type uses `UnsafeCell` internally but is safe to use because:
/// - Single producer: only ingestion writes slots and `write_pos`
/// - Single consumer: only the scheduler tick writes `read_pos`
/// - Slot writes are published by a release store of `write_pos`; the
///   consumer acquires it before reading, so it never observes a
///   half-written burst
/// - The reserved slot keeps producer writes and the consumer's current
///   read slot disjoint
///
/// # Memory Ordering
///
/// - Producer: `read_pos` load `Acquire`, `write_pos` store `Release`
/// - Consumer: `write_pos` load `Acquire`, `read_pos` store `Release`
pub struct ToneQueue<const N: usize = DEFAULT_QUEUE_LEN> {
    /// Ring of sample slots.
    slots: UnsafeCell<[ToneSample; N]>,

    /// Next free slot (producer-owned, modulo `N`).
    write_pos: AtomicUsize,

    /// Next slot to consume (consumer-owned, modulo `N`).
    read_pos: AtomicUsize,

    /// Bursts rejected since construction (diagnostics, never cleared).
    rejected: AtomicU32,
}

// SAFETY: Single producer, single consumer, atomic cursor coordination.
// No mutable aliasing possible within those rules (see type-level docs).
unsafe impl<const N: usize> Sync for ToneQueue<N> {}
unsafe impl<const N: usize> Send for ToneQueue<N> {}

impl<const N: usize> ToneQueue<N> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            slots: UnsafeCell::new([ToneSample::rest(0); N]),
            write_pos: AtomicUsize::new(0),
            read_pos: AtomicUsize::new(0),
            rejected: AtomicU32::new(0),
        }
    }

    /// Usable capacity: total slots minus the reserved one.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Number of samples currently queued.
    #[inline]
    pub fn len(&self) -> usize {
        let write = self.write_pos.load(Ordering::Acquire);
        let read = self.read_pos.load(Ordering::Acquire);
        (write + N - read) % N
    }

    /// Check if the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples that can still be accepted before the queue is full.
    ///
    /// The reserved slot is left out of the count. With concurrent contexts
    /// this is a snapshot: the consumer may free more room at any time.
    #[inline]
    pub fn free_capacity(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Ingest a burst of wire-encoded samples, all or nothing.
    ///
    /// `bytes` must be a multiple of [`ToneSample::WIRE_SIZE`]; an empty
    /// burst is trivially satisfied and succeeds without side effects. A
    /// burst of `n` samples is admitted iff `n < free_capacity()`; otherwise
    /// the queue is left untouched and the caller may retry the whole burst
    /// later.
    ///
    /// # Timing
    ///
    /// Bounded by the supplied byte count. Never blocks, never allocates.
    /// Safe to call from interrupt context, but only from ONE producer
    /// context at a time.
    pub fn enqueue_bytes(&self, bytes: &[u8]) -> Result<(), EnqueueError> {
        if bytes.len() % ToneSample::WIRE_SIZE != 0 {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(EnqueueError::MalformedLength);
        }
        if bytes.is_empty() {
            // Nothing to enqueue: trivially satisfied.
            return Ok(());
        }

        let incoming = bytes.len() / ToneSample::WIRE_SIZE;
        let write = self.write_pos.load(Ordering::Relaxed);
        let read = self.read_pos.load(Ordering::Acquire);
        let free = self.capacity() - (write + N - read) % N;

        if incoming >= free {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(EnqueueError::QueueFull);
        }

        // Copy all samples in, wrapping at the buffer boundary, then publish
        // the cursor. The consumer cannot see the slots before the store.
        for (i, chunk) in bytes.chunks_exact(ToneSample::WIRE_SIZE).enumerate() {
            let sample = ToneSample::from_wire([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let idx = (write + i) % N;

            // SAFETY: Single producer; slots in [write, write + incoming) are
            // unpublished and the free-capacity check keeps them disjoint
            // from anything the consumer may read.
            unsafe {
                (*self.slots.get())[idx] = sample;
            }
        }

        self.write_pos
            .store((write + incoming) % N, Ordering::Release);
        Ok(())
    }

    /// Take the next sample, if any.
    ///
    /// This is the only read path and must be invoked from at most one
    /// consumer context (the playback scheduler).
    ///
    /// # Timing
    ///
    /// Completes in O(1). Never blocks, never allocates.
    #[inline]
    pub fn dequeue_one(&self) -> Option<ToneSample> {
        let write = self.write_pos.load(Ordering::Acquire);
        let read = self.read_pos.load(Ordering::Relaxed);

        if write == read {
            return None; // Empty
        }

        // SAFETY: Single consumer; the slot at `read` was published by the
        // producer's release store and will not be rewritten until `read_pos`
        // advances past it.
        let sample = unsafe { (*self.slots.get())[read] };

        self.read_pos.store((read + 1) % N, Ordering::Release);
        Some(sample)
    }

    /// Bursts rejected since construction (malformed or over capacity).
    pub fn rejected(&self) -> u32 {
        self.rejected.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for ToneQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
