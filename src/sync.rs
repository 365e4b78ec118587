//! Clock difference accounting between the controller and a remote target.
//!
//! The controller and each target run their own free-running millisecond
//! counters, started at different power-on instants. When a target is
//! discovered, both clocks are read "at the same time" (one exchange over the
//! link, propagation delay neglected) and the difference is kept as a
//! [`ClockSkew`]. A timestamp taken on the target can then be expressed in the
//! controller's time base and compared with a slot's start time.
//!
//! All arithmetic wraps, so both counters may overflow independently as long as
//! they do so identically.
//!
//! [`Session`](crate::session::Session) does not use this module: the `END`
//! frames it handles carry no timestamp and are timed on reception. It is
//! helper API for hosts or firmware whose targets report their own
//! timestamps.

/// Offset between the controller clock and one target clock.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ClockSkew {
    offset_ms: u64,
}

impl ClockSkew {
    /// A skew of zero, for targets sharing the controller's clock.
    pub const ZERO: ClockSkew = ClockSkew { offset_ms: 0 };

    /// Measures the skew from a pair of simultaneous readings.
    ///
    /// # Arguments
    /// - `controller_ms`: Controller time at discovery.
    /// - `target_ms`: Target time reported in the discovery reply.
    pub fn measure(controller_ms: u64, target_ms: u64) -> Self {
        Self {
            offset_ms: controller_ms.wrapping_sub(target_ms),
        }
    }

    /// Signed offset `controller - target`, in ms.
    pub fn offset_ms(&self) -> i64 {
        self.offset_ms as i64
    }

    /// Translates a target timestamp into the controller's time base.
    pub fn to_controller(&self, target_ms: u64) -> u64 {
        target_ms.wrapping_add(self.offset_ms)
    }

    /// Translates a controller timestamp into the target's time base.
    pub fn to_target(&self, controller_ms: u64) -> u64 {
        controller_ms.wrapping_sub(self.offset_ms)
    }

    /// Elapsed time between a controller-side start and a target-side stop.
    pub fn elapsed(&self, controller_start_ms: u64, target_stop_ms: u64) -> u64 {
        self.to_controller(target_stop_ms)
            .wrapping_sub(controller_start_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Slot, TimerRegistry};

    #[test]
    fn test_target_started_later() {
        // Target powered on 3 s after the controller
        let skew = ClockSkew::measure(5_000, 2_000);
        assert_eq!(skew.offset_ms(), 3_000);
        assert_eq!(skew.to_controller(2_500), 5_500);
        assert_eq!(skew.to_target(5_500), 2_500);
        assert_eq!(skew.elapsed(5_100, 2_600), 500);
    }

    #[test]
    fn test_target_started_earlier() {
        let skew = ClockSkew::measure(1_000, 4_000);
        assert_eq!(skew.offset_ms(), -3_000);
        assert_eq!(skew.to_controller(4_250), 1_250);
        assert_eq!(skew.elapsed(1_100, 4_850), 750);
    }

    #[test]
    fn test_zero_skew_is_identity() {
        assert_eq!(ClockSkew::ZERO.to_controller(1_234), 1_234);
        assert_eq!(ClockSkew::default(), ClockSkew::ZERO);
    }

    #[test]
    fn test_resolving_with_remote_timestamp() {
        let skew = ClockSkew::measure(10_000, 400);
        let mut timers = TimerRegistry::new();
        let _ = timers.arm_all(10_200);

        // Target stamped its end event at 1_350 on its own clock
        let stop = skew.to_controller(1_350);
        assert_eq!(timers.resolve(Slot::Second, stop), Some(750));
    }
}
