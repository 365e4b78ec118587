use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::diag::Diagnostics;
use crate::radio::Transceiver;
use crate::session::Session;

use super::Clock;

/// Runs a blocking loop that repeatedly calls [`Session::step`].
///
/// This is the polling scheduler for firmware without a spare timer interrupt
/// for pacing. Each iteration runs one full controller step, then waits
/// `period_ms` using a delay provider implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `session`: An initialized [`Session`].
/// - `delay`: A delay provider, typically from the HAL.
/// - `period_ms`: Pause between iterations. Keep it well below the debounce window.
///
/// # Example
/// ```rust,ignore
/// use rf_stopwatch::clock::run_polling_loop;
/// let _ = session.init();
/// run_polling_loop(&mut session, &mut delay, 1);
/// ```
///
/// # Notes
/// - This loop will never return; it is intended for single-purpose polling firmware.
/// - Results are only reported through the session's diagnostics sink.
pub fn run_polling_loop<R, C, P, D, DL>(
    session: &mut Session<R, C, P, D>,
    delay: &mut DL,
    period_ms: u32,
) -> !
where
    R: Transceiver,
    C: Clock,
    P: InputPin,
    D: Diagnostics,
    DL: DelayNs,
{
    loop {
        let _ = session.step();
        delay.delay_ms(period_ms);
    }
}
