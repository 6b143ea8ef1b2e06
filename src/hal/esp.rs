//! ESP-IDF backend for the periodic toggle source.
//!
//! A general-purpose timer at 1 MHz resolution fires an alarm every toggle
//! period; the ISR callback flips the buzzer GPIO and nothing else. The
//! alarm auto-reloads, so steady-state costs one interrupt per half wave.

use core::sync::atomic::{AtomicU32, Ordering};

use esp_idf_svc::hal::gpio::{AnyOutputPin, PinDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::timer::{config::Config as TimerConfig, Timer, TimerDriver};
use esp_idf_svc::sys::EspError;

use super::PulseTimer;

/// Timer-API failures observed in the tick path (diagnostics, never cleared).
///
/// Register-level errors must not propagate into the scheduler tick, so the
/// backend counts them instead.
static CONFIG_ERRORS: AtomicU32 = AtomicU32::new(0);

/// Periodic toggle source on an ESP-IDF general-purpose timer.
pub struct EspPulseTimer<'d> {
    timer: TimerDriver<'d>,
}

impl<'d> EspPulseTimer<'d> {
    /// Take ownership of a hardware timer and the buzzer output pin.
    ///
    /// The pin is cleared low and moved into the ISR callback; the default
    /// timer configuration counts at 1 MHz, so alarm values are in
    /// microseconds.
    pub fn new(
        timer: impl Peripheral<P = impl Timer> + 'd,
        pin: AnyOutputPin,
    ) -> Result<Self, EspError> {
        let mut pin = PinDriver::output(pin)?;
        pin.set_low()?;

        let mut driver = TimerDriver::new(timer, &TimerConfig::new().auto_reload(true))?;

        // The driver registers the alarm ISR with the default (lowest)
        // priority; audio timing tolerates millisecond jitter.
        //
        // SAFETY: The callback runs in ISR context. It only toggles the
        // owned pin; interrupt status is cleared by the driver before
        // dispatch.
        unsafe {
            driver.subscribe(move || {
                let _ = pin.toggle();
            })?;
        }

        driver.enable(true)?;

        log::info!("pulse timer ready at {} Hz base", driver.tick_hz());
        Ok(Self { timer: driver })
    }

    /// Timer-API errors swallowed by the tick path so far.
    pub fn config_errors() -> u32 {
        CONFIG_ERRORS.load(Ordering::Relaxed)
    }

    fn track(result: Result<(), EspError>) {
        if result.is_err() {
            CONFIG_ERRORS.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl PulseTimer for EspPulseTimer<'_> {
    fn configure_period(&mut self, period_us: u32) {
        Self::track(self.timer.set_counter(0));
        Self::track(self.timer.set_alarm(u64::from(period_us)));
    }

    fn enable(&mut self) {
        Self::track(self.timer.enable_interrupt());
        Self::track(self.timer.enable_alarm(true));
    }

    fn disable(&mut self) {
        Self::track(self.timer.enable_alarm(false));
        Self::track(self.timer.disable_interrupt());
    }
}
