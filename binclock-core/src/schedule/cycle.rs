//! Repeating collection cycles
//!
//! Each bin is collected every `period_days`, starting `phase_offset_days`
//! after the anchor date. The phase of a cycle on a given day is the number
//! of days until its next collection.

use crate::config::ConfigError;

/// Number of bins on the rota
pub const BIN_COUNT: usize = 3;

/// Days in a week, used for the countdown overlay
pub const DAYS_PER_WEEK: u16 = 7;

/// The kerbside bins tracked by the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BinKind {
    /// General waste, fortnightly
    Landfill,
    /// Recycling, fortnightly on the alternate week
    Recycling,
    /// Garden waste, four-weekly
    Garden,
}

impl BinKind {
    /// All bins, in display order
    pub const ALL: [BinKind; BIN_COUNT] = [BinKind::Landfill, BinKind::Recycling, BinKind::Garden];

    /// Position in per-bin tables
    pub const fn index(self) -> usize {
        match self {
            BinKind::Landfill => 0,
            BinKind::Recycling => 1,
            BinKind::Garden => 2,
        }
    }

    /// Configuration section name
    pub const fn name(self) -> &'static str {
        match self {
            BinKind::Landfill => "landfill",
            BinKind::Recycling => "recycling",
            BinKind::Garden => "garden",
        }
    }
}

/// A repeating cycle: period and offset from the anchor, in days
///
/// Invariant: `0 <= phase_offset_days < period_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleDefinition {
    period_days: u16,
    phase_offset_days: u16,
}

impl CycleDefinition {
    /// Fortnightly, due on the anchor date
    pub const LANDFILL: Self = Self {
        period_days: 14,
        phase_offset_days: 0,
    };

    /// Fortnightly, due a week after the anchor date
    pub const RECYCLING: Self = Self {
        period_days: 14,
        phase_offset_days: 7,
    };

    /// Four-weekly, due on the anchor date
    pub const GARDEN: Self = Self {
        period_days: 28,
        phase_offset_days: 0,
    };

    /// Create a cycle, rejecting a zero period or an offset past the period
    pub fn new(period_days: u16, phase_offset_days: u16) -> Result<Self, ConfigError> {
        if period_days == 0 || phase_offset_days >= period_days {
            return Err(ConfigError::InvalidCycle);
        }
        Ok(Self {
            period_days,
            phase_offset_days,
        })
    }

    /// The default cycle for a bin
    pub const fn for_bin(kind: BinKind) -> Self {
        match kind {
            BinKind::Landfill => Self::LANDFILL,
            BinKind::Recycling => Self::RECYCLING,
            BinKind::Garden => Self::GARDEN,
        }
    }

    pub fn period_days(&self) -> u16 {
        self.period_days
    }

    pub fn phase_offset_days(&self) -> u16 {
        self.phase_offset_days
    }
}

/// Days remaining until a cycle's next collection; 0 means due today
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CyclePhase(u16);

impl CyclePhase {
    pub fn days_remaining(&self) -> u16 {
        self.0
    }

    /// Collection is today
    pub fn is_due(&self) -> bool {
        self.0 == 0
    }

    /// Whole weeks until the next collection
    pub fn weeks_remaining(&self) -> u16 {
        self.0 / DAYS_PER_WEEK
    }
}

/// Phase of `cycle` on the day `day_offset` days after the anchor
///
/// Uses floored modulo, so days before the anchor (negative offsets) still
/// land in `[0, period - 1]`.
pub fn phase_of(cycle: &CycleDefinition, day_offset: i32) -> CyclePhase {
    let period = cycle.period_days as i64;
    let since_due = (day_offset as i64 - cycle.phase_offset_days as i64).rem_euclid(period);
    CyclePhase(((period - since_due) % period) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_anchor_day_phases() {
        assert_eq!(phase_of(&CycleDefinition::LANDFILL, 0).days_remaining(), 0);
        assert_eq!(phase_of(&CycleDefinition::RECYCLING, 0).days_remaining(), 7);
        assert_eq!(phase_of(&CycleDefinition::GARDEN, 0).days_remaining(), 0);
    }

    #[test]
    fn test_two_weeks_after_anchor() {
        assert_eq!(phase_of(&CycleDefinition::LANDFILL, 14).days_remaining(), 0);
        assert_eq!(phase_of(&CycleDefinition::RECYCLING, 14).days_remaining(), 7);
        assert_eq!(phase_of(&CycleDefinition::GARDEN, 14).days_remaining(), 14);
    }

    #[test]
    fn test_counts_down_to_collection() {
        let phases: [u16; 4] =
            [11, 12, 13, 14].map(|d| phase_of(&CycleDefinition::LANDFILL, d).days_remaining());
        assert_eq!(phases, [3, 2, 1, 0]);
        assert!(phase_of(&CycleDefinition::RECYCLING, 7).is_due());
        assert!(phase_of(&CycleDefinition::RECYCLING, 21).is_due());
    }

    #[test]
    fn test_before_anchor_uses_floored_modulo() {
        assert_eq!(phase_of(&CycleDefinition::LANDFILL, -1).days_remaining(), 1);
        assert_eq!(phase_of(&CycleDefinition::GARDEN, -27).days_remaining(), 27);
        assert_eq!(phase_of(&CycleDefinition::RECYCLING, -7).days_remaining(), 0);
        // Unsynchronized clock sitting at the Unix epoch
        assert!(phase_of(&CycleDefinition::GARDEN, -19_725).days_remaining() < 28);
    }

    #[test]
    fn test_weeks_remaining() {
        assert_eq!(phase_of(&CycleDefinition::GARDEN, 1).weeks_remaining(), 3);
        assert_eq!(phase_of(&CycleDefinition::GARDEN, 14).weeks_remaining(), 2);
        assert_eq!(phase_of(&CycleDefinition::GARDEN, 22).weeks_remaining(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_cycles() {
        assert_eq!(CycleDefinition::new(0, 0), Err(ConfigError::InvalidCycle));
        assert_eq!(CycleDefinition::new(14, 14), Err(ConfigError::InvalidCycle));
        assert_eq!(CycleDefinition::new(14, 7), Ok(CycleDefinition::RECYCLING));
    }

    #[test]
    fn test_bin_kind_tables_line_up() {
        for (i, kind) in BinKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    fn any_cycle() -> impl Strategy<Value = CycleDefinition> {
        (1u16..=60).prop_flat_map(|period| {
            (0..period).prop_map(move |offset| CycleDefinition::new(period, offset).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_phase_in_range(cycle in any_cycle(), day in -100_000i32..100_000) {
            let phase = phase_of(&cycle, day).days_remaining();
            prop_assert!(phase < cycle.period_days());
        }

        #[test]
        fn prop_due_iff_aligned(cycle in any_cycle(), day in -100_000i32..100_000) {
            let aligned = (day as i64 - cycle.phase_offset_days() as i64)
                .rem_euclid(cycle.period_days() as i64) == 0;
            prop_assert_eq!(phase_of(&cycle, day).is_due(), aligned);
        }

        #[test]
        fn prop_periodic(cycle in any_cycle(), day in -100_000i32..100_000) {
            let next = day + cycle.period_days() as i32;
            prop_assert_eq!(phase_of(&cycle, day), phase_of(&cycle, next));
        }

        #[test]
        fn prop_next_day_counts_down(cycle in any_cycle(), day in -100_000i32..100_000) {
            let today = phase_of(&cycle, day).days_remaining();
            let tomorrow = phase_of(&cycle, day + 1).days_remaining();
            if today == 0 {
                prop_assert_eq!(tomorrow, cycle.period_days() - 1);
            } else {
                prop_assert_eq!(tomorrow, today - 1);
            }
        }
    }
}
