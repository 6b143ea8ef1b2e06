//! Shared test doubles.

use piezo_sequencer::PulseTimer;

/// What the driver asked the hardware to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Configured(u32),
    Enabled,
    Disabled,
}

/// Recording stand-in for the periodic toggle source.
#[derive(Default)]
pub struct MockPulseTimer {
    pub events: Vec<TimerEvent>,
    pub enabled: bool,
    pub period_us: Option<u32>,
}

impl MockPulseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Periods from `Configured` events, in order.
    pub fn configured_periods(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Configured(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

impl PulseTimer for MockPulseTimer {
    fn configure_period(&mut self, period_us: u32) {
        self.period_us = Some(period_us);
        self.events.push(TimerEvent::Configured(period_us));
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.events.push(TimerEvent::Enabled);
    }

    fn disable(&mut self) {
        // Record only actual transitions; the driver may re-disable an
        // already-silent timer at will.
        if self.enabled {
            self.events.push(TimerEvent::Disabled);
        }
        self.enabled = false;
    }
}
