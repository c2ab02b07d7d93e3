//! Time sync task
//!
//! Sets the system clock from an SNTP server once the link is up, then
//! again every hour. Failed attempts back off through [`RETRY_DELAYS`].

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_net::dns::DnsQueryType;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration, Instant, Timer};
use heapless::String;

use binclock_core::config::MAX_HOST_LEN;
use binclock_protocol::{encode_request, NtpTimestamp, SntpResponse, NTP_PORT, PACKET_LEN};

use crate::channels::{LinkState, SyncEvent, SyncFailure, LINK_STATE, SYNC_EVENT};
use crate::clock;

/// Interval between successful syncs
const RESYNC_INTERVAL: Duration = Duration::from_secs(3600);

/// Delays after consecutive failures; the last one repeats
const RETRY_DELAYS: [Duration; 4] = [
    Duration::from_secs(10),
    Duration::from_secs(30),
    Duration::from_secs(60),
    Duration::from_secs(300),
];

/// How long to wait for a reply
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

#[embassy_executor::task]
pub async fn time_sync_task(stack: Stack<'static>, server: String<MAX_HOST_LEN>) {
    info!("Time sync task started");

    let mut link = LINK_STATE.wait().await;

    loop {
        if link == LinkState::Down {
            link = LINK_STATE.wait().await;
            continue;
        }

        let mut failures: usize = 0;
        loop {
            let delay = match sync_once(stack, server.as_str()).await {
                Ok(unix_seconds) => {
                    failures = 0;
                    SYNC_EVENT.signal(SyncEvent::Synced { unix_seconds });
                    RESYNC_INTERVAL
                }
                Err(reason) => {
                    let delay = RETRY_DELAYS[failures.min(RETRY_DELAYS.len() - 1)];
                    failures += 1;
                    SYNC_EVENT.signal(SyncEvent::Failed(reason));
                    delay
                }
            };

            // A link change interrupts the wait
            if let Either::Second(state) = select(Timer::after(delay), LINK_STATE.wait()).await {
                link = state;
                break;
            }
        }
    }
}

/// One SNTP exchange; adopts the result and returns the Unix time set
async fn sync_once(stack: Stack<'static>, server: &str) -> Result<i64, SyncFailure> {
    let addresses = stack
        .dns_query(server, DnsQueryType::A)
        .await
        .map_err(|e| {
            warn!("DNS lookup of {} failed: {:?}", server, e);
            SyncFailure::Dns
        })?;
    let address = *addresses.first().ok_or(SyncFailure::Dns)?;
    debug!("NTP server {} is {}", server, address);

    let mut rx_meta = [PacketMetadata::EMPTY; 1];
    let mut rx_buffer = [0u8; 128];
    let mut tx_meta = [PacketMetadata::EMPTY; 1];
    let mut tx_buffer = [0u8; 128];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket.bind(0).map_err(|e| {
        warn!("Socket bind failed: {:?}", e);
        SyncFailure::Send
    })?;

    // Our own clock estimate doubles as the request nonce
    let (unix, millis) = clock::unix_now();
    let sent = NtpTimestamp::from_unix(unix, millis);
    let request = encode_request(sent);

    let sent_at = Instant::now();
    socket
        .send_to(&request, (address, NTP_PORT))
        .await
        .map_err(|e| {
            warn!("NTP send failed: {:?}", e);
            SyncFailure::Send
        })?;

    let mut reply = [0u8; PACKET_LEN];
    let (len, _from) = with_timeout(REPLY_TIMEOUT, socket.recv_from(&mut reply))
        .await
        .map_err(|_| SyncFailure::Timeout)?
        .map_err(|e| {
            warn!("NTP receive failed: {:?}", e);
            SyncFailure::Timeout
        })?;
    let received_at = Instant::now();

    let response = SntpResponse::decode(&reply[..len], sent).map_err(SyncFailure::Reply)?;

    // The transmit second started `millis` before the reply left the server,
    // which was about half a round trip ago
    let round_trip_ms = (received_at - sent_at).as_millis();
    let second_started_ms = received_at
        .as_millis()
        .saturating_sub(round_trip_ms / 2 + response.transmit.millis() as u64);

    let unix_seconds = response.unix_seconds();
    clock::adopt(unix_seconds, second_started_ms);
    info!(
        "Synced to stratum {} server, round trip {} ms",
        response.stratum, round_trip_ms
    );

    Ok(unix_seconds)
}
