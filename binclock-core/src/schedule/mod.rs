//! Bin collection rota
//!
//! Derives, from a fixed anchor date, how many days remain until each bin
//! is next collected.

pub mod cycle;
pub mod state;

pub use cycle::{phase_of, BinKind, CycleDefinition, CyclePhase, BIN_COUNT, DAYS_PER_WEEK};
pub use state::{ScheduleState, ScheduleUpdate};
