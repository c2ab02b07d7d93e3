//! Firmware update lifecycle hooks
//!
//! The update transport lives in the platform crate. The clock logic never
//! calls these hooks; they exist so a transport can report progress to the
//! log or the screen without knowing about either.

/// What an update is replacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateTarget {
    /// Application image
    Firmware,
    /// Data or configuration partition
    Filesystem,
}

/// Reasons an update can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Authentication with the update server failed
    Auth,
    /// Could not start the update session
    Begin,
    /// Connection to the update server failed
    Connect,
    /// Data was lost or corrupted in transfer
    Receive,
    /// Image could not be finalized
    End,
}

/// Trait for observers of a firmware update
pub trait UpdateHooks {
    /// An update has begun
    fn on_start(&mut self, target: UpdateTarget);

    /// `done` of `total` bytes have been written
    fn on_progress(&mut self, done: u32, total: u32);

    /// The update completed successfully
    fn on_end(&mut self);

    /// The update was aborted
    fn on_error(&mut self, error: UpdateError);
}

/// Percentage of `total` covered by `done`, clamped to 100
///
/// A zero total reports 0 rather than dividing by zero.
pub fn progress_percent(done: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (done as u64 * 100) / total as u64;
    pct.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        started: Option<UpdateTarget>,
        last_pct: u8,
        ended: bool,
        error: Option<UpdateError>,
    }

    impl UpdateHooks for Recorder {
        fn on_start(&mut self, target: UpdateTarget) {
            self.started = Some(target);
        }

        fn on_progress(&mut self, done: u32, total: u32) {
            self.last_pct = progress_percent(done, total);
        }

        fn on_end(&mut self) {
            self.ended = true;
        }

        fn on_error(&mut self, error: UpdateError) {
            self.error = Some(error);
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 1000), 0);
        assert_eq!(progress_percent(500, 1000), 50);
        assert_eq!(progress_percent(999, 1000), 99);
        assert_eq!(progress_percent(1000, 1000), 100);
        assert_eq!(progress_percent(2000, 1000), 100);
        assert_eq!(progress_percent(10, 0), 0);
        assert_eq!(progress_percent(u32::MAX, u32::MAX), 100);
    }

    #[test]
    fn test_hooks_lifecycle() {
        let mut hooks = Recorder::default();
        hooks.on_start(UpdateTarget::Firmware);
        hooks.on_progress(256, 1024);
        assert_eq!(hooks.last_pct, 25);
        hooks.on_end();

        assert_eq!(hooks.started, Some(UpdateTarget::Firmware));
        assert!(hooks.ended);
        assert_eq!(hooks.error, None);

        hooks.on_error(UpdateError::Receive);
        assert_eq!(hooks.error, Some(UpdateError::Receive));
    }
}
