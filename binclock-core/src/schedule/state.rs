//! Per-day schedule state
//!
//! Phases only change at midnight, so they are recomputed once per calendar
//! day rather than on every tick.

use super::cycle::{phase_of, BinKind, CycleDefinition, CyclePhase, BIN_COUNT};
use crate::config::ScheduleConfig;
use crate::time::{days_between, Instant};

/// Result of feeding a tick to the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleUpdate {
    /// A new calendar day was seen and phases were recomputed
    Changed,
    /// Same day as the previous tick
    Unchanged,
}

impl ScheduleUpdate {
    pub fn is_changed(&self) -> bool {
        matches!(self, ScheduleUpdate::Changed)
    }
}

/// Last computed phase of every bin
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleState {
    anchor: Instant,
    cycles: [CycleDefinition; BIN_COUNT],
    phases: [CyclePhase; BIN_COUNT],
    day_offset: i32,
    /// Calendar day last processed (None until the first tick)
    last_day: Option<Instant>,
}

impl ScheduleState {
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            anchor: config.anchor,
            cycles: config.cycles,
            phases: [CyclePhase::default(); BIN_COUNT],
            day_offset: 0,
            last_day: None,
        }
    }

    /// Recompute phases if `now` falls on a different day than last time
    ///
    /// The whole date is compared, not just the day of month, so a clock that
    /// jumps from the epoch to the same day number of another month after its
    /// first sync still triggers a recompute. Instants before the anchor are
    /// fine; they give negative day offsets.
    pub fn on_tick(&mut self, now: &Instant) -> ScheduleUpdate {
        let today = now.midnight();
        if self.last_day == Some(today) {
            return ScheduleUpdate::Unchanged;
        }

        self.day_offset = days_between(&self.anchor, now);
        for kind in BinKind::ALL {
            let i = kind.index();
            self.phases[i] = phase_of(&self.cycles[i], self.day_offset);
        }
        self.last_day = Some(today);

        ScheduleUpdate::Changed
    }

    /// Phase of one bin as of the last processed day
    pub fn phase(&self, kind: BinKind) -> CyclePhase {
        self.phases[kind.index()]
    }

    /// Days from the anchor to the last processed day
    pub fn day_offset(&self) -> i32 {
        self.day_offset
    }

    /// Bins that are due on the last processed day
    pub fn due(&self) -> impl Iterator<Item = BinKind> + '_ {
        BinKind::ALL
            .into_iter()
            .filter(move |kind| self.phase(*kind).is_due())
    }
}
