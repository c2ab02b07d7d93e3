//! NTP timestamps

/// Seconds from 1900-01-01 (NTP epoch) to 1970-01-01 (Unix epoch)
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

/// Length of one NTP era in seconds
const ERA_SECONDS: i64 = 1 << 32;

/// 32.32 fixed-point NTP timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NtpTimestamp {
    pub seconds: u32,
    pub fraction: u32,
}

impl NtpTimestamp {
    /// All-zero timestamp, meaning "not set"
    pub const ZERO: Self = Self {
        seconds: 0,
        fraction: 0,
    };

    /// Read a big-endian timestamp from 8 bytes
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self {
            seconds: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            fraction: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    pub fn to_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.seconds.to_be_bytes());
        out[4..].copy_from_slice(&self.fraction.to_be_bytes());
        out
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Seconds since the Unix epoch, resolving the 2036 rollover
    ///
    /// With the top bit set the timestamp is in era 0 (1968-2036); with it
    /// clear it is taken to be in era 1 (2036-2104).
    pub fn unix_seconds(&self) -> i64 {
        let mut ntp = self.seconds as i64;
        if self.seconds & 0x8000_0000 == 0 {
            ntp += ERA_SECONDS;
        }
        ntp - NTP_UNIX_OFFSET
    }

    /// Fractional part in milliseconds
    pub fn millis(&self) -> u32 {
        ((self.fraction as u64 * 1000) >> 32) as u32
    }

    /// Timestamp for a Unix time, wrapping into the current era
    pub fn from_unix(unix_seconds: i64, millis: u32) -> Self {
        let ntp = (unix_seconds + NTP_UNIX_OFFSET).rem_euclid(ERA_SECONDS);
        Self {
            seconds: ntp as u32,
            fraction: (((millis.min(999) as u64) << 32) / 1000) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unix_epoch() {
        let ts = NtpTimestamp {
            seconds: NTP_UNIX_OFFSET as u32,
            fraction: 0,
        };
        assert_eq!(ts.unix_seconds(), 0);
    }

    #[test]
    fn test_known_date() {
        // 2024-01-03 00:00:00 UTC
        let ts = NtpTimestamp {
            seconds: 3_913_228_800,
            fraction: 0,
        };
        assert_eq!(ts.unix_seconds(), 1_704_240_000);
    }

    #[test]
    fn test_era_rollover() {
        // 2036-02-07 06:28:16 UTC is the end of era 0
        let last = NtpTimestamp {
            seconds: u32::MAX,
            fraction: 0,
        };
        let first = NtpTimestamp {
            seconds: 0,
            fraction: 0,
        };
        assert_eq!(first.unix_seconds(), last.unix_seconds() + 1);
        assert_eq!(first.unix_seconds(), 2_085_978_496);
    }

    #[test]
    fn test_fraction_millis() {
        let half = NtpTimestamp {
            seconds: 0,
            fraction: 0x8000_0000,
        };
        assert_eq!(half.millis(), 500);
        assert_eq!(NtpTimestamp::from_unix(0, 250).millis(), 250);
    }

    proptest! {
        #[test]
        fn prop_unix_round_trip(unix in 0i64..4_000_000_000, millis in 0u32..1000) {
            let ts = NtpTimestamp::from_unix(unix, millis);
            prop_assert_eq!(ts.unix_seconds(), unix);
            prop_assert_eq!(NtpTimestamp::from_bytes(ts.to_bytes()), ts);
            prop_assert!(ts.millis().abs_diff(millis) <= 1);
        }
    }
}
