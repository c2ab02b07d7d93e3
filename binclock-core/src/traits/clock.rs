//! Wall-clock source trait

use crate::time::Instant;

/// Trait for anything that can report the current local time
///
/// Implementations always return a value. Before the first network sync
/// that value may be stale or sit at the Unix epoch; the schedule copes
/// with instants before its anchor.
pub trait ClockSource {
    /// Read the current local calendar time
    ///
    /// Takes `&mut self` because reading the time may advance internal state.
    fn now(&mut self) -> Instant;
}

impl<C: ClockSource + ?Sized> ClockSource for &mut C {
    fn now(&mut self) -> Instant {
        (**self).now()
    }
}
