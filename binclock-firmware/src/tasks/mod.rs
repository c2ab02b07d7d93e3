//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod link;
pub mod net;
pub mod render;
pub mod tick;
pub mod time_sync;

pub use link::link_task;
pub use net::{net_task, wifi_task};
pub use render::render_task;
pub use tick::tick_task;
pub use time_sync::time_sync_task;
