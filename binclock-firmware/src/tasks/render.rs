//! Render task
//!
//! Owns the clock face. Each tick reads local time from the system clock
//! and hands it to the render driver; a completed time sync triggers an
//! immediate extra tick so the face catches up with the jump.

use defmt::*;
use embassy_futures::select::{select, Either};

use binclock_core::render::TickReport;
use binclock_core::schedule::BinKind;
use binclock_core::time::Instant;
use binclock_core::traits::ClockSource;

use crate::board::ClockDriver;
use crate::channels::{SyncEvent, SYNC_EVENT};
use crate::clock::SystemClock;
use crate::tasks::tick::TICK_SIGNAL;

#[embassy_executor::task]
pub async fn render_task(mut driver: ClockDriver) {
    info!("Render task started");

    let mut clock = SystemClock::new();

    if let Err(e) = driver.clear() {
        warn!("Screen clear failed: {:?}", Debug2Format(&e));
    }

    loop {
        match select(TICK_SIGNAL.wait(), SYNC_EVENT.wait()).await {
            Either::First(_uptime_ms) => {}
            Either::Second(SyncEvent::Synced { unix_seconds }) => {
                info!("Clock set to {}", unix_seconds);
            }
            Either::Second(SyncEvent::Failed(reason)) => {
                warn!("Time sync failed: {:?}", reason);
                continue;
            }
        }

        let now = clock.now();
        match driver.tick(&now) {
            Ok(report) => log_report(&driver, &report, &now),
            Err(e) => warn!("Render failed at {}: {:?}", now, Debug2Format(&e)),
        }
    }
}

fn log_report(driver: &ClockDriver, report: &TickReport, now: &Instant) {
    trace!("Colon {:?}", report.colon);

    if report.time_redrawn {
        info!("Minute redraw at {}", now);
    }
    if report.date_redrawn {
        debug!("Date line redrawn");
    }
    if let Some(level) = report.backlight {
        info!("Backlight set to {}", level.level());
    }
    if report.day_changed {
        let schedule = driver.schedule();
        info!(
            "New day {}: landfill in {}, recycling in {}, garden in {}",
            schedule.day_offset(),
            schedule.phase(BinKind::Landfill).days_remaining(),
            schedule.phase(BinKind::Recycling).days_remaining(),
            schedule.phase(BinKind::Garden).days_remaining(),
        );
    }
}
