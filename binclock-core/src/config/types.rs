//! Configuration type definitions

use heapless::String;

use super::{ConfigError, Layout, Palette};
use crate::backlight::Intensity;
use crate::schedule::{BinKind, CycleDefinition, BIN_COUNT};
use crate::time::{Instant, Month, TzRule};

/// Maximum SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum NTP server host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum hostname prefix length
pub const MAX_PREFIX_LEN: usize = 16;

/// Prefix plus "-" plus six hex digits
pub const MAX_HOSTNAME_LEN: usize = MAX_PREFIX_LEN + 7;

/// Bin rota configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleConfig {
    /// Date all cycles are measured from
    pub anchor: Instant,
    /// Cycle per bin, in [`BinKind::ALL`] order
    pub cycles: [CycleDefinition; BIN_COUNT],
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            anchor: Self::DEFAULT_ANCHOR,
            cycles: BinKind::ALL.map(CycleDefinition::for_bin),
        }
    }
}

impl ScheduleConfig {
    /// Wednesday 3 January 2024, a landfill and garden collection day
    pub const DEFAULT_ANCHOR: Instant = Instant::from_const_date(2024, Month::January, 3);

    /// Replace the anchor with midnight of the given date
    pub fn set_anchor(&mut self, year: i32, month: u8, day: u8) -> Result<(), ConfigError> {
        self.anchor = Instant::date(year, month, day).map_err(|_| ConfigError::InvalidAnchor)?;
        Ok(())
    }
}

/// Night dimming configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightConfig {
    /// Level during the night window
    pub low: Intensity,
    /// Level outside the night window
    pub high: Intensity,
    /// First night hour, 0-23
    pub night_start: u8,
    /// First day hour, 0-23
    pub night_end: u8,
}

impl Default for BacklightConfig {
    fn default() -> Self {
        Self {
            low: Intensity::LOW,
            high: Intensity::HIGH,
            night_start: 21,
            night_end: 6,
        }
    }
}

impl BacklightConfig {
    /// Check the night window hours
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.night_start > 23 || self.night_end > 23 {
            return Err(ConfigError::InvalidHour);
        }
        Ok(())
    }
}

/// Wi-Fi and time server settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig {
    pub ssid: String<MAX_SSID_LEN>,
    /// Empty for an open network
    pub password: String<MAX_PASSWORD_LEN>,
    pub ntp_server: String<MAX_HOST_LEN>,
    pub hostname_prefix: String<MAX_PREFIX_LEN>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let mut config = Self {
            ssid: String::new(),
            password: String::new(),
            ntp_server: String::new(),
            hostname_prefix: String::new(),
        };
        // Both fit their capacity
        let _ = config.ntp_server.push_str("nz.pool.ntp.org");
        let _ = config.hostname_prefix.push_str("clock");
        config
    }
}

impl NetworkConfig {
    /// Device hostname, e.g. `clock-A1B2C3` from the last three MAC bytes
    pub fn hostname(&self, mac: &[u8; 6]) -> String<MAX_HOSTNAME_LEN> {
        use core::fmt::Write;

        let mut name = String::new();
        // Cannot overflow: prefix is capped at MAX_PREFIX_LEN
        let _ = write!(
            name,
            "{}-{:02X}{:02X}{:02X}",
            self.hostname_prefix, mac[3], mac[4], mac[5]
        );
        name
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub network: NetworkConfig,
    pub timezone: TzRule,
    pub schedule: ScheduleConfig,
    pub backlight: BacklightConfig,
    pub palette: Palette,
    pub layout: Layout,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            timezone: TzRule::NEW_ZEALAND,
            schedule: ScheduleConfig::default(),
            backlight: BacklightConfig::default(),
            palette: Palette::default(),
            layout: Layout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_anchor() {
        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.anchor, Instant::date(2024, 1, 3).unwrap());
        assert_eq!(schedule.cycles[1], CycleDefinition::RECYCLING);
    }

    #[test]
    fn test_set_anchor_rejects_bad_date() {
        let mut schedule = ScheduleConfig::default();
        assert_eq!(
            schedule.set_anchor(2023, 2, 29),
            Err(ConfigError::InvalidAnchor)
        );
        schedule.set_anchor(2024, 2, 29).unwrap();
        assert_eq!(schedule.anchor.month(), 2);
    }

    #[test]
    fn test_hostname_from_mac() {
        let network = NetworkConfig::default();
        let mac = [0x28, 0xCD, 0xC1, 0x0A, 0xB2, 0x3F];
        assert_eq!(network.hostname(&mac).as_str(), "clock-0AB23F");
    }

    #[test]
    fn test_backlight_validate() {
        assert!(BacklightConfig::default().validate().is_ok());
        let bad = BacklightConfig {
            night_start: 24,
            ..BacklightConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidHour));
    }
}
