//! System wall clock
//!
//! A single [`SyncedClock`] shared between the time sync task, which sets
//! it, and the render task, which reads it through [`SystemClock`].

use core::cell::RefCell;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use binclock_core::time::{Instant, Month, SyncedClock, TzRule};
use binclock_core::traits::ClockSource;

static CLOCK: Mutex<CriticalSectionRawMutex, RefCell<SyncedClock>> =
    Mutex::new(RefCell::new(SyncedClock::new(TzRule::UTC)));

fn uptime_ms() -> u64 {
    embassy_time::Instant::now().as_millis()
}

/// Install the configured timezone
pub fn set_timezone(tz: TzRule) {
    CLOCK.lock(|clock| clock.borrow_mut().set_timezone(tz));
}

/// Adopt network time: `unix_seconds` began at uptime `at_uptime_ms`
pub fn adopt(unix_seconds: i64, at_uptime_ms: u64) {
    CLOCK.lock(|clock| clock.borrow_mut().sync(unix_seconds, at_uptime_ms));
}

/// Current Unix time estimate and milliseconds into the second
pub fn unix_now() -> (i64, u32) {
    let uptime = uptime_ms();
    let unix = CLOCK.lock(|clock| clock.borrow().unix_seconds_at(uptime));
    (unix, (uptime % 1000) as u32)
}

pub fn is_synchronized() -> bool {
    CLOCK.lock(|clock| clock.borrow().is_synchronized())
}

/// [`ClockSource`] over the shared clock
pub struct SystemClock {
    /// Returned if the clock ever reads out of range
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::from_const_date(1970, Month::January, 1),
        }
    }
}

impl ClockSource for SystemClock {
    fn now(&mut self) -> Instant {
        let uptime = uptime_ms();
        match CLOCK.lock(|clock| clock.borrow().local_at(uptime)) {
            Ok(now) => self.last = now,
            Err(e) => warn!("Clock out of range: {:?}", e),
        }
        self.last
    }
}
