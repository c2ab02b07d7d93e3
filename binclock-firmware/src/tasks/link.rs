//! Wi-Fi link task
//!
//! Joins the configured network, waits for DHCP and publishes the link
//! state. When the association drops it leaves, waits briefly and joins
//! again; the clock keeps running from its last sync meanwhile.

use cyw43::JoinOptions;
use defmt::*;
use embassy_net::Stack;
use embassy_time::{Duration, Timer};

use binclock_core::config::NetworkConfig;

use crate::channels::{LinkState, LINK_STATE};

/// Pause between join attempts
const REJOIN_DELAY: Duration = Duration::from_millis(500);

#[embassy_executor::task]
pub async fn link_task(
    mut control: cyw43::Control<'static>,
    stack: Stack<'static>,
    network: NetworkConfig,
) {
    info!("Link task started");

    loop {
        join(&mut control, &network).await;

        info!("Joined {}, waiting for DHCP", network.ssid.as_str());
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            info!("IP address {}", config.address);
        }
        LINK_STATE.signal(LinkState::Up);

        stack.wait_link_down().await;
        warn!("Link down, rejoining");
        LINK_STATE.signal(LinkState::Down);
        control.leave().await;
        Timer::after(REJOIN_DELAY).await;
    }
}

async fn join(control: &mut cyw43::Control<'static>, network: &NetworkConfig) {
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let options = if network.password.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(network.password.as_bytes())
        };
        match control.join(network.ssid.as_str(), options).await {
            Ok(()) => return,
            Err(e) => {
                debug!("Join attempt {} failed: status {}", attempts, e.status);
                Timer::after(REJOIN_DELAY).await;
            }
        }
    }
}
