//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use binclock_protocol::SntpError;

/// Wi-Fi link state, published by the link task
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkState {
    /// Joined and configured by DHCP
    Up,
    /// Association lost; the link task is rejoining
    Down,
}

/// Why a time sync attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum SyncFailure {
    /// Server name did not resolve
    Dns,
    /// Socket bind or send failed
    Send,
    /// No reply within the timeout
    Timeout,
    /// Reply rejected by the codec
    Reply(SntpError),
}

/// Outcome of a time sync attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum SyncEvent {
    /// Clock set to this Unix time
    Synced { unix_seconds: i64 },
    /// Attempt failed; the clock keeps free-running
    Failed(SyncFailure),
}

/// Link state changes, consumed by the time sync task
pub static LINK_STATE: Signal<CriticalSectionRawMutex, LinkState> = Signal::new();

/// Time sync results, consumed by the render task
pub static SYNC_EVENT: Signal<CriticalSectionRawMutex, SyncEvent> = Signal::new();
