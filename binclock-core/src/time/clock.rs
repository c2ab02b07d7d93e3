//! Free-running wall clock disciplined by network time
//!
//! Holds the last synchronized Unix time together with the monotonic uptime
//! at which it was received, and extrapolates from there. Before the first
//! sync the clock counts up from the Unix epoch, which the schedule treats
//! as an ordinary (pre-anchor) date.

use super::{Instant, TimeError, TzRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct SyncPoint {
    unix_seconds: i64,
    uptime_ms: u64,
}

/// Wall clock extrapolated from the most recent time sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncedClock {
    tz: TzRule,
    last_sync: Option<SyncPoint>,
}

impl SyncedClock {
    /// Create an unsynchronized clock
    pub const fn new(tz: TzRule) -> Self {
        Self {
            tz,
            last_sync: None,
        }
    }

    /// Replace the timezone rule used for local time
    pub fn set_timezone(&mut self, tz: TzRule) {
        self.tz = tz;
    }

    /// Record a successful time sync
    ///
    /// - `unix_seconds`: network time received
    /// - `uptime_ms`: monotonic uptime when it was received
    pub fn sync(&mut self, unix_seconds: i64, uptime_ms: u64) {
        self.last_sync = Some(SyncPoint {
            unix_seconds,
            uptime_ms,
        });
    }

    /// Whether at least one sync has succeeded
    pub fn is_synchronized(&self) -> bool {
        self.last_sync.is_some()
    }

    /// Extrapolated Unix time at the given uptime
    pub fn unix_seconds_at(&self, uptime_ms: u64) -> i64 {
        match self.last_sync {
            Some(point) => {
                let elapsed_ms = uptime_ms.saturating_sub(point.uptime_ms);
                point.unix_seconds + (elapsed_ms / 1000) as i64
            }
            None => (uptime_ms / 1000) as i64,
        }
    }

    /// Local wall-clock reading at the given uptime
    pub fn local_at(&self, uptime_ms: u64) -> Result<Instant, TimeError> {
        let unix = self.unix_seconds_at(uptime_ms);
        if self.is_synchronized() {
            self.tz.to_local(unix)
        } else {
            Instant::from_epoch_seconds(unix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsynchronized_counts_from_epoch() {
        let clock = SyncedClock::new(TzRule::NEW_ZEALAND);
        assert!(!clock.is_synchronized());
        assert_eq!(
            clock.local_at(61_500).unwrap(),
            Instant::new(1970, 1, 1, 0, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_extrapolates_from_sync_point() {
        let mut clock = SyncedClock::new(TzRule::NEW_ZEALAND);
        // 2024-01-03 00:00:00 UTC, NZDT in force
        clock.sync(1_704_240_000, 10_000);

        assert_eq!(clock.unix_seconds_at(12_999), 1_704_240_002);
        assert_eq!(
            clock.local_at(10_000).unwrap(),
            Instant::new(2024, 1, 3, 13, 0, 0).unwrap()
        );
        assert_eq!(
            clock.local_at(70_000).unwrap(),
            Instant::new(2024, 1, 3, 13, 1, 0).unwrap()
        );
    }

    #[test]
    fn test_set_timezone() {
        let mut clock = SyncedClock::new(TzRule::UTC);
        clock.sync(1_704_240_000, 0);
        assert_eq!(clock.local_at(0).unwrap().hour(), 0);
        clock.set_timezone(TzRule::NEW_ZEALAND);
        assert_eq!(clock.local_at(0).unwrap().hour(), 13);
    }

    #[test]
    fn test_uptime_before_sync_point_is_clamped() {
        let mut clock = SyncedClock::new(TzRule::UTC);
        clock.sync(1_000, 5_000);
        assert_eq!(clock.unix_seconds_at(1_000), 1_000);
    }
}
