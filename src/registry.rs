//! Two-slot timer registry.
//!
//! The controller keeps one [`TimerSlot`] per remote target. A single start
//! event arms both slots at once; each slot is then resolved independently by
//! the `END` frame carrying its index.
//!
//! ## Lifecycle of a slot
//!
//! 1. Unarmed (`start` is `None`)
//! 2. Armed by [`TimerRegistry::arm_all`] when *both* slots are unarmed
//! 3. Resolved by [`TimerRegistry::resolve`], which returns the elapsed time and
//!    clears the slot for reuse
//!
//! A slot whose `END` frame never arrives stays armed, unless the owner opts into
//! [`TimerRegistry::expire`].

use crate::consts::SLOT_COUNT;

/// Index of a timer slot.
#[derive(PartialEq, Eq, Clone, Copy, Debug, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Slot {
    /// Slot 0, closed by `END1`.
    First = 0,
    /// Slot 1, closed by `END2`.
    Second = 1,
}

impl Slot {
    /// Every slot, in index order.
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::First, Slot::Second];

    /// Slot for a numeric index, if it is 0 or 1.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Slot for the ASCII digit carried in an `END` frame (`'1'` or `'2'`).
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1' => Some(Slot::First),
            b'2' => Some(Slot::Second),
            _ => None,
        }
    }

    /// Numeric index of the slot.
    pub fn index(self) -> usize {
        self as usize
    }

    /// ASCII digit naming this slot on the wire.
    pub fn digit(self) -> u8 {
        b'1' + self as u8
    }
}

/// Start/stop timestamps of one measurement channel, in clock milliseconds.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TimerSlot {
    /// Controller time at which the slot was armed.
    pub start: Option<u64>,
    /// Controller time at which the slot is being resolved.
    ///
    /// Only set inside [`TimerRegistry::resolve`], which clears it together
    /// with `start`; it reads `None` between calls.
    pub stop: Option<u64>,
}

impl TimerSlot {
    /// Whether a measurement is in flight on this slot.
    pub fn is_armed(&self) -> bool {
        self.start.is_some()
    }
}

/// The pair of timer slots owned by the controller.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct TimerRegistry {
    slots: [TimerSlot; SLOT_COUNT],
}

impl TimerRegistry {
    /// Creates a registry with both slots unarmed.
    pub const fn new() -> Self {
        Self {
            slots: [TimerSlot {
                start: None,
                stop: None,
            }; SLOT_COUNT],
        }
    }

    /// Read access to one slot.
    pub fn slot(&self, slot: Slot) -> &TimerSlot {
        &self.slots[slot.index()]
    }

    /// Whether any slot is currently armed.
    pub fn any_armed(&self) -> bool {
        self.slots.iter().any(TimerSlot::is_armed)
    }

    /// Arms both slots at `now_ms`.
    ///
    /// # Returns
    /// - `true` if both slots were unarmed and are now armed
    /// - `false` if a measurement is already in flight; nothing is changed
    pub fn arm_all(&mut self, now_ms: u64) -> bool {
        if self.any_armed() {
            return false;
        }
        for slot in self.slots.iter_mut() {
            slot.start = Some(now_ms);
        }
        true
    }

    /// Closes `slot` at `now_ms`.
    ///
    /// # Returns
    /// - `Some(elapsed_ms)` if the slot was armed; the slot is cleared
    /// - `None` if the slot was not armed (duplicate or orphan `END`); nothing is changed
    ///
    /// # Notes
    /// The difference is computed with wrapping arithmetic so a clock wrap between
    /// arming and resolving still yields the right elapsed time.
    pub fn resolve(&mut self, slot: Slot, now_ms: u64) -> Option<u64> {
        let entry = &mut self.slots[slot.index()];
        let start = entry.start?;
        let stop = *entry.stop.insert(now_ms);
        let elapsed = stop.wrapping_sub(start);
        *entry = TimerSlot::default();
        Some(elapsed)
    }

    /// Disarms `slot` if it has been armed for longer than `timeout_ms`.
    ///
    /// # Returns
    /// The age of the measurement (in ms) when it was dropped, or `None` if the
    /// slot was left untouched.
    pub fn expire(&mut self, slot: Slot, now_ms: u64, timeout_ms: u64) -> Option<u64> {
        let entry = &mut self.slots[slot.index()];
        let age = now_ms.wrapping_sub(entry.start?);
        if age <= timeout_ms {
            return None;
        }
        *entry = TimerSlot::default();
        Some(age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index_and_digits() {
        assert_eq!(Slot::from_index(0), Some(Slot::First));
        assert_eq!(Slot::from_index(1), Some(Slot::Second));
        assert_eq!(Slot::from_index(2), None);
        assert_eq!(Slot::from_digit(b'1'), Some(Slot::First));
        assert_eq!(Slot::from_digit(b'2'), Some(Slot::Second));
        assert_eq!(Slot::from_digit(b'3'), None);
        assert_eq!(Slot::Second.digit(), b'2');
        assert_eq!(Slot::Second.index(), 1);
    }

    #[test]
    fn test_arm_all_arms_both_slots() {
        let mut timers = TimerRegistry::new();
        assert!(!timers.any_armed());
        assert!(timers.arm_all(1_000));
        assert_eq!(timers.slot(Slot::First).start, Some(1_000));
        assert_eq!(timers.slot(Slot::Second).start, Some(1_000));
    }

    #[test]
    fn test_arming_is_idempotent_while_in_flight() {
        let mut timers = TimerRegistry::new();
        assert!(timers.arm_all(1_000));
        assert!(!timers.arm_all(2_000));
        assert_eq!(timers.slot(Slot::First).start, Some(1_000));
        assert_eq!(timers.slot(Slot::Second).start, Some(1_000));
    }

    #[test]
    fn test_partial_resolution_still_blocks_arming() {
        let mut timers = TimerRegistry::new();
        let _ = timers.arm_all(1_000);
        let _ = timers.resolve(Slot::First, 1_200);
        assert!(!timers.arm_all(1_300));
        assert_eq!(timers.slot(Slot::First).start, None);
    }

    #[test]
    fn test_resolve_computes_elapsed() {
        let mut timers = TimerRegistry::new();
        let _ = timers.arm_all(1_000);
        assert_eq!(timers.resolve(Slot::First, 1_750), Some(750));
    }

    #[test]
    fn test_resolve_resets_state() {
        let mut timers = TimerRegistry::new();
        let _ = timers.arm_all(1_000);
        let _ = timers.resolve(Slot::First, 1_750);
        assert_eq!(*timers.slot(Slot::First), TimerSlot::default());
        assert_eq!(timers.slot(Slot::First).stop, None);
        assert!(timers.slot(Slot::Second).is_armed());
        assert_eq!(timers.slot(Slot::Second).stop, None);

        let _ = timers.resolve(Slot::Second, 1_800);
        assert!(timers.arm_all(2_000));
        assert_eq!(timers.slot(Slot::First).start, Some(2_000));
    }

    #[test]
    fn test_orphan_resolve_is_noop() {
        let mut timers = TimerRegistry::new();
        assert_eq!(timers.resolve(Slot::Second, 500), None);

        let _ = timers.arm_all(100);
        let _ = timers.resolve(Slot::Second, 300);
        assert_eq!(timers.resolve(Slot::Second, 400), None);
        assert_eq!(timers.slot(Slot::First).start, Some(100));
    }

    #[test]
    fn test_arming_at_time_zero() {
        let mut timers = TimerRegistry::new();
        assert!(timers.arm_all(0));
        assert!(timers.any_armed());
        assert_eq!(timers.resolve(Slot::First, 500), Some(500));
        assert_eq!(timers.resolve(Slot::Second, 900), Some(900));
        assert!(!timers.any_armed());
    }

    #[test]
    fn test_resolve_across_clock_wrap() {
        let mut timers = TimerRegistry::new();
        let _ = timers.arm_all(u64::MAX - 9);
        assert_eq!(timers.resolve(Slot::First, 10), Some(20));
    }

    #[test]
    fn test_expire_only_after_timeout() {
        let mut timers = TimerRegistry::new();
        assert_eq!(timers.expire(Slot::First, 10_000, 100), None);

        let _ = timers.arm_all(1_000);
        assert_eq!(timers.expire(Slot::First, 1_100, 100), None);
        assert_eq!(timers.expire(Slot::First, 1_101, 100), Some(101));
        assert!(!timers.slot(Slot::First).is_armed());
        assert!(timers.slot(Slot::Second).is_armed());
    }
}
