//! Hardware abstraction for the periodic toggle source.
//!
//! Thin contract around the platform timer that drives the square wave.
//! Business logic stays in the core modules; the HAL is just I/O.

#[cfg(target_os = "espidf")]
pub mod esp;

#[cfg(target_os = "espidf")]
pub use esp::EspPulseTimer;

/// A hardware timer that toggles the buzzer output line at a fixed period.
///
/// The square-wave generator drives this from the 1 kHz tick context; the
/// actual line flips happen in the platform's interrupt handler.
///
/// # Implementation contract
///
/// - The output line is cleared low once at initialization and is owned by
///   the implementation from then on.
/// - On each periodic firing the handler toggles the output line exactly
///   once and clears its own interrupt status. Nothing else: no buffer or
///   scheduler work in the handler.
/// - The interrupt is registered at a priority below time-critical sources;
///   audio timing tolerates millisecond jitter.
/// - All three methods are called from the tick context and must not block.
///   `disable` must be idempotent: disabling an already-silent timer is a
///   no-op.
pub trait PulseTimer {
    /// Reset the hardware counter and program a new toggle period.
    ///
    /// The period is in microseconds (1 MHz timing base). Two toggles make
    /// one full wave cycle.
    fn configure_period(&mut self, period_us: u32);

    /// Start firing periodic toggle interrupts.
    fn enable(&mut self);

    /// Stop firing. The output line holds its last level (silent).
    fn disable(&mut self);
}
