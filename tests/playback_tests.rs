//! End-to-end playback: startup sequence through queue, scheduler and
//! generator, verified against the hardware event record.

mod common;

use common::{MockPulseTimer, TimerEvent};
use piezo_sequencer::{
    play_startup_sequence, PlaybackScheduler, PlaybackState, SquareWave, ToneQueue, ToneSample,
};

#[test]
fn test_startup_sequence_audible_pattern() {
    let queue: ToneQueue = ToneQueue::new();
    let mut scheduler = PlaybackScheduler::new(&queue, SquareWave::new(MockPulseTimer::new()));

    // Fields, MSB first: 1, 2, 3, 0 -> tones 130, 164, 164, 196, 196, 196.
    play_startup_sequence(&queue, 0b01_10_11_00);

    // Each (150ms tone + 5 gap + 15ms rest + 5 gap) pair is 175 ticks; the
    // tick after the sixth pair finds the queue empty.
    let mut ticks = 0;
    loop {
        scheduler.tick();
        ticks += 1;
        if scheduler.state() == PlaybackState::Idle {
            break;
        }
        assert!(ticks < 2000, "sequence never drained");
    }
    assert_eq!(ticks, 6 * 175 + 1);
    assert!(queue.is_empty());

    // One configure+enable per tone, one disable when its gap starts. The
    // rests and their gaps re-silence an already-silent generator, which
    // must not produce hardware work.
    let tone_events = |period: u32| {
        vec![
            TimerEvent::Configured(period),
            TimerEvent::Enabled,
            TimerEvent::Disabled,
        ]
    };
    let mut expected = Vec::new();
    for period in [3846, 3048, 3048, 2551, 2551, 2551] {
        expected.extend(tone_events(period));
    }
    assert_eq!(scheduler.wave().timer().events, expected);
}

#[test]
fn test_producer_can_feed_during_playback() {
    let queue: ToneQueue = ToneQueue::new();
    let mut scheduler = PlaybackScheduler::new(&queue, SquareWave::new(MockPulseTimer::new()));

    queue
        .enqueue_bytes(&ToneSample::new(440, 100).to_wire())
        .unwrap();

    // Mid-note, more samples arrive.
    for _ in 0..50 {
        scheduler.tick();
    }
    queue
        .enqueue_bytes(&ToneSample::new(660, 30).to_wire())
        .unwrap();

    // First note finishes undisturbed (remaining 50 ticks + 5 gap), then
    // the new note starts.
    for _ in 0..55 {
        scheduler.tick();
    }
    scheduler.tick();
    assert_eq!(scheduler.state(), PlaybackState::Sounding);
    assert_eq!(
        scheduler.wave().timer().configured_periods(),
        vec![1136, 757] // (1e6 / 440) / 2, (1e6 / 660) / 2
    );

    // Drain to idle.
    for _ in 0..40 {
        scheduler.tick();
    }
    assert_eq!(scheduler.state(), PlaybackState::Idle);
}
