//! SNTP request and response packets

use crate::timestamp::NtpTimestamp;

/// Length of every SNTP packet
pub const PACKET_LEN: usize = 48;

/// Well-known NTP server port
pub const NTP_PORT: u16 = 123;

/// Protocol version sent in requests
const VERSION: u8 = 3;

const MODE_CLIENT: u8 = 3;
const MODE_SERVER: u8 = 4;
const MODE_BROADCAST: u8 = 5;

const TRANSMIT_OFFSET: usize = 40;

/// Errors that can occur decoding a server reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SntpError {
    /// Reply shorter than 48 bytes
    TooShort,
    /// Reply is not from a server
    BadMode,
    /// Reply does not echo our request's transmit timestamp
    OriginMismatch,
    /// Kiss-o'-death (stratum 0); the four-byte code is included
    KissOfDeath([u8; 4]),
    /// Server clock is not synchronized (leap indicator 3)
    Unsynchronized,
    /// Server sent a zero transmit timestamp
    NoTimestamp,
    /// Timestamp falls before 1970
    BeforeUnixEpoch,
}

/// Leap second warning carried in every reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LeapIndicator {
    NoWarning,
    /// Last minute of the day has 61 seconds
    AddSecond,
    /// Last minute of the day has 59 seconds
    RemoveSecond,
    /// Server clock not synchronized
    Unsynchronized,
}

impl LeapIndicator {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => LeapIndicator::NoWarning,
            1 => LeapIndicator::AddSecond,
            2 => LeapIndicator::RemoveSecond,
            _ => LeapIndicator::Unsynchronized,
        }
    }
}

/// Build a client request
///
/// `transmit` is echoed by the server as the originate timestamp, which
/// lets [`SntpResponse::decode`] pair the reply with this request. Pass
/// [`NtpTimestamp::ZERO`] to skip the check.
pub fn encode_request(transmit: NtpTimestamp) -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    // LI = 0, VN = 3, Mode = 3 gives 0x1B
    packet[0] = (VERSION << 3) | MODE_CLIENT;
    packet[TRANSMIT_OFFSET..].copy_from_slice(&transmit.to_bytes());
    packet
}

/// Decoded server reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SntpResponse {
    pub leap: LeapIndicator,
    pub version: u8,
    pub stratum: u8,
    /// Echo of the request's transmit timestamp
    pub originate: NtpTimestamp,
    /// When the request arrived at the server
    pub receive: NtpTimestamp,
    /// When the reply left the server
    pub transmit: NtpTimestamp,
}

impl SntpResponse {
    /// Decode and sanity-check a reply to a request sent with `sent`
    pub fn decode(bytes: &[u8], sent: NtpTimestamp) -> Result<Self, SntpError> {
        if bytes.len() < PACKET_LEN {
            return Err(SntpError::TooShort);
        }

        let mode = bytes[0] & 0b111;
        if mode != MODE_SERVER && mode != MODE_BROADCAST {
            return Err(SntpError::BadMode);
        }

        let stratum = bytes[1];
        if stratum == 0 {
            let mut code = [0u8; 4];
            code.copy_from_slice(&bytes[12..16]);
            return Err(SntpError::KissOfDeath(code));
        }

        let leap = LeapIndicator::from_bits(bytes[0] >> 6);
        if leap == LeapIndicator::Unsynchronized {
            return Err(SntpError::Unsynchronized);
        }

        let response = Self {
            leap,
            version: (bytes[0] >> 3) & 0b111,
            stratum,
            originate: timestamp_at(bytes, 24),
            receive: timestamp_at(bytes, 32),
            transmit: timestamp_at(bytes, TRANSMIT_OFFSET),
        };

        if !sent.is_zero() && response.originate != sent {
            return Err(SntpError::OriginMismatch);
        }
        if response.transmit.is_zero() {
            return Err(SntpError::NoTimestamp);
        }
        if response.unix_seconds() < 0 {
            return Err(SntpError::BeforeUnixEpoch);
        }

        Ok(response)
    }

    /// Server transmit time as Unix seconds
    pub fn unix_seconds(&self) -> i64 {
        self.transmit.unix_seconds()
    }
}

fn timestamp_at(bytes: &[u8], offset: usize) -> NtpTimestamp {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    NtpTimestamp::from_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 2024-01-03 00:00:00 UTC
    const JAN_3_2024: u32 = 3_913_228_800;

    fn reply(li: u8, mode: u8, stratum: u8, transmit_secs: u32) -> [u8; PACKET_LEN] {
        let mut packet = [0u8; PACKET_LEN];
        packet[0] = (li << 6) | (4 << 3) | mode;
        packet[1] = stratum;
        packet[32..36].copy_from_slice(&(transmit_secs - 1).to_be_bytes());
        packet[40..44].copy_from_slice(&transmit_secs.to_be_bytes());
        packet
    }

    #[test]
    fn test_request_header() {
        let packet = encode_request(NtpTimestamp::ZERO);
        assert_eq!(packet[0], 0x1B);
        assert!(packet[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_request_carries_transmit_time() {
        let sent = NtpTimestamp {
            seconds: JAN_3_2024,
            fraction: 7,
        };
        let packet = encode_request(sent);
        assert_eq!(&packet[40..44], &JAN_3_2024.to_be_bytes());
        assert_eq!(&packet[44..48], &7u32.to_be_bytes());
    }

    #[test]
    fn test_decode_server_reply() {
        let response = SntpResponse::decode(&reply(0, 4, 2, JAN_3_2024), NtpTimestamp::ZERO)
            .unwrap();
        assert_eq!(response.unix_seconds(), 1_704_240_000);
        assert_eq!(response.stratum, 2);
        assert_eq!(response.version, 4);
        assert_eq!(response.leap, LeapIndicator::NoWarning);
        assert_eq!(response.receive.seconds, JAN_3_2024 - 1);
    }

    #[test]
    fn test_decode_accepts_longer_buffer() {
        let mut buf = [0u8; 68];
        buf[..PACKET_LEN].copy_from_slice(&reply(1, 4, 1, JAN_3_2024));
        let response = SntpResponse::decode(&buf, NtpTimestamp::ZERO).unwrap();
        assert_eq!(response.leap, LeapIndicator::AddSecond);
    }

    #[test]
    fn test_decode_rejects_bad_replies() {
        let zero = NtpTimestamp::ZERO;
        let packet = reply(0, 4, 2, JAN_3_2024);
        assert_eq!(
            SntpResponse::decode(&packet[..47], zero),
            Err(SntpError::TooShort)
        );
        assert_eq!(
            SntpResponse::decode(&reply(0, 3, 2, JAN_3_2024), zero),
            Err(SntpError::BadMode)
        );
        assert_eq!(
            SntpResponse::decode(&reply(3, 4, 2, JAN_3_2024), zero),
            Err(SntpError::Unsynchronized)
        );

        let mut kod = reply(0, 4, 0, JAN_3_2024);
        kod[12..16].copy_from_slice(b"RATE");
        assert_eq!(
            SntpResponse::decode(&kod, zero),
            Err(SntpError::KissOfDeath(*b"RATE"))
        );

        let mut empty = reply(0, 4, 2, 1);
        empty[40..48].fill(0);
        assert_eq!(
            SntpResponse::decode(&empty, zero),
            Err(SntpError::NoTimestamp)
        );

        // 1969: inside era 0 but before the Unix epoch
        let early = reply(0, 4, 2, 2_200_000_000);
        assert_eq!(
            SntpResponse::decode(&early, zero),
            Err(SntpError::BeforeUnixEpoch)
        );
    }

    #[test]
    fn test_decode_checks_origin() {
        let sent = NtpTimestamp {
            seconds: JAN_3_2024,
            fraction: 42,
        };
        let mut packet = reply(0, 4, 2, JAN_3_2024 + 1);
        assert_eq!(
            SntpResponse::decode(&packet, sent),
            Err(SntpError::OriginMismatch)
        );

        packet[24..32].copy_from_slice(&sent.to_bytes());
        let response = SntpResponse::decode(&packet, sent).unwrap();
        assert_eq!(response.originate, sent);
    }

    proptest! {
        #[test]
        fn prop_decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = SntpResponse::decode(&bytes, NtpTimestamp::ZERO);
        }

        #[test]
        fn prop_valid_reply_decodes(secs in 2_208_988_800u32..=u32::MAX, stratum in 1u8..16) {
            let response = SntpResponse::decode(&reply(0, 4, stratum, secs), NtpTimestamp::ZERO)
                .unwrap();
            prop_assert_eq!(response.unix_seconds(), secs as i64 - 2_208_988_800);
        }
    }
}
