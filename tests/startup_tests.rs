//! Startup revision sequence tests.

use piezo_sequencer::startup::{REVISION_NOTE_MS, REVISION_REST_MS, REVISION_TONES};
use piezo_sequencer::{play_startup_sequence, ToneQueue, ToneSample};

#[test]
fn test_fields_played_msb_first() {
    let queue: ToneQueue = ToneQueue::new();
    // Fields, MSB first: 1, 2, 3, 0
    play_startup_sequence(&queue, 0b01_10_11_00);

    // 1 + 2 + 3 tone bursts, each a (tone, rest) pair = 12 samples.
    assert_eq!(queue.len(), 12);

    let mut expect = |freq: u16, reps: usize| {
        for _ in 0..reps {
            assert_eq!(
                queue.dequeue_one(),
                Some(ToneSample::new(freq, REVISION_NOTE_MS))
            );
            assert_eq!(
                queue.dequeue_one(),
                Some(ToneSample::rest(REVISION_REST_MS))
            );
        }
    };

    expect(REVISION_TONES[3], 1);
    expect(REVISION_TONES[2], 2);
    expect(REVISION_TONES[1], 3);
    assert_eq!(queue.dequeue_one(), None);
}

#[test]
fn test_each_field_uses_its_own_tone() {
    for pos in 0..4u8 {
        let queue: ToneQueue = ToneQueue::new();
        play_startup_sequence(&queue, 1 << (pos * 2));

        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.dequeue_one(),
            Some(ToneSample::new(
                REVISION_TONES[pos as usize],
                REVISION_NOTE_MS
            ))
        );
    }
}

#[test]
fn test_overflow_drops_tail_without_blocking() {
    let queue: ToneQueue<8> = ToneQueue::new();
    play_startup_sequence(&queue, 0xFF);

    // Whatever fit is queued in order; the tail was dropped, not retried.
    assert!(queue.len() <= queue.capacity());
    assert!(queue.rejected() > 0);
    assert_eq!(
        queue.dequeue_one(),
        Some(ToneSample::new(REVISION_TONES[3], REVISION_NOTE_MS))
    );
}

#[test]
fn test_sequencer_has_no_privileged_access() {
    // Startup beeps share capacity with everything already queued.
    let queue: ToneQueue = ToneQueue::new();
    let filler: Vec<u8> = (0..29)
        .flat_map(|i| ToneSample::new(i, 1).to_wire())
        .collect();
    queue.enqueue_bytes(&filler).unwrap();

    play_startup_sequence(&queue, 0b00_00_00_01);

    // Only the leftover room was usable: the tone fit, its trailing rest
    // did not and was dropped.
    assert_eq!(queue.rejected(), 1);
    for i in 0..29u16 {
        assert_eq!(queue.dequeue_one(), Some(ToneSample::new(i, 1)));
    }
    assert_eq!(
        queue.dequeue_one(),
        Some(ToneSample::new(REVISION_TONES[0], REVISION_NOTE_MS))
    );
    assert_eq!(queue.dequeue_one(), None);
}
