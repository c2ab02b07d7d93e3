//! SNTP client codec
//!
//! This crate encodes the client request and decodes the server reply of
//! the Simple Network Time Protocol (RFC 4330), which the clock uses to set
//! itself over Wi-Fi. It only deals with bytes; sockets, DNS and retries
//! live in the firmware.
//!
//! # Packet Overview
//!
//! Every message is a fixed 48-byte UDP payload sent to port 123:
//! ```text
//! byte  0      LI (2 bits) | VN (3 bits) | Mode (3 bits)
//! byte  1      stratum
//! bytes 2..16  poll, precision, root delay, root dispersion, reference id
//! bytes 16..24 reference timestamp
//! bytes 24..32 originate timestamp
//! bytes 32..40 receive timestamp
//! bytes 40..48 transmit timestamp
//! ```
//!
//! Timestamps are 32.32 fixed-point seconds since 1900-01-01.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sntp;
pub mod timestamp;

pub use sntp::{
    encode_request, LeapIndicator, SntpError, SntpResponse, NTP_PORT, PACKET_LEN,
};
pub use timestamp::{NtpTimestamp, NTP_UNIX_OFFSET};
