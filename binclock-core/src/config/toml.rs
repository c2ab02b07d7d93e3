//! Minimal TOML parser for the clock configuration
//!
//! Handles only the subset `clock.toml` needs:
//!
//! - `key = value` pairs (string, integer, boolean)
//! - `[section]` and `[section.subsection]` headers
//! - Comments (`# ...`), including trailing ones
//!
//! Keys the clock does not know are skipped so older firmware accepts newer
//! files. Unknown sections and malformed values are errors. Missing keys keep
//! their [`ClockConfig::default`] value.

use heapless::String;

use super::{ClockConfig, ConfigError};
use crate::backlight::Intensity;
use crate::schedule::{BinKind, CycleDefinition, BIN_COUNT};
use crate::time::TzRule;

/// Parse failure with the 1-based line it occurred on
///
/// Line 0 means the error was found after the last line, while
/// cross-checking values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub error: ConfigError,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Network,
    Time,
    Schedule,
    Cycle(BinKind),
    Backlight,
}

/// Cycle fields seen so far, checked together once the file is read
#[derive(Debug, Clone, Copy)]
struct PendingCycle {
    period_days: u16,
    phase_offset_days: u16,
}

/// Parse TOML text into a [`ClockConfig`]
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;
    let mut cycles = config.schedule.cycles.map(|c| PendingCycle {
        period_days: c.period_days(),
        phase_offset_days: c.phase_offset_days(),
    });

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let at = |error: ConfigError| ParseError {
            line: line_no,
            error,
        };
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1]).map_err(at)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ConfigError::InvalidValue))?;
        apply_value(section, key, value, &mut config, &mut cycles).map_err(at)?;
    }

    let at_end = |error: ConfigError| ParseError { line: 0, error };
    for (i, pending) in cycles.iter().enumerate() {
        config.schedule.cycles[i] =
            CycleDefinition::new(pending.period_days, pending.phase_offset_days)
                .map_err(at_end)?;
    }
    config.backlight.validate().map_err(at_end)?;

    Ok(config)
}

/// Drop a `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse a section header like "network" or "schedule.garden"
fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    let header = header.trim();

    if let Some(name) = header.strip_prefix("schedule.") {
        return BinKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name.trim())
            .map(Section::Cycle)
            .ok_or(ConfigError::InvalidSection);
    }

    match header {
        "network" => Ok(Section::Network),
        "time" => Ok(Section::Time),
        "schedule" => Ok(Section::Schedule),
        "backlight" => Ok(Section::Backlight),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)
}

/// Parse a quoted string into a fixed-capacity buffer
fn parse_bounded<const N: usize>(value: &str) -> Result<String<N>, ConfigError> {
    let s = parse_string(value)?;
    String::try_from(s).map_err(|_| ConfigError::ValueTooLong)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Parse a date string like "2024-01-03" into (year, month, day)
fn parse_date(value: &str) -> Result<(i32, u8, u8), ConfigError> {
    let s = parse_string(value)?;
    let mut parts = s.splitn(3, '-');
    let mut next = || parts.next().ok_or(ConfigError::InvalidAnchor);
    let year = next()?.parse().map_err(|_| ConfigError::InvalidAnchor)?;
    let month = next()?.parse().map_err(|_| ConfigError::InvalidAnchor)?;
    let day = next()?.parse().map_err(|_| ConfigError::InvalidAnchor)?;
    Ok((year, month, day))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
    cycles: &mut [PendingCycle; BIN_COUNT],
) -> Result<(), ConfigError> {
    match section {
        Section::Root => {}
        Section::Network => {
            let network = &mut config.network;
            match key {
                "ssid" => network.ssid = parse_bounded(value)?,
                "password" => network.password = parse_bounded(value)?,
                "ntp_server" => network.ntp_server = parse_bounded(value)?,
                "hostname_prefix" => network.hostname_prefix = parse_bounded(value)?,
                _ => {}
            }
        }
        Section::Time => {
            if key == "timezone" {
                let rule = parse_string(value)?;
                config.timezone = TzRule::parse(rule).map_err(|_| ConfigError::InvalidTimezone)?;
            }
        }
        Section::Schedule => {
            if key == "anchor" {
                let (year, month, day) = parse_date(value)?;
                config.schedule.set_anchor(year, month, day)?;
            }
        }
        Section::Cycle(kind) => {
            let pending = &mut cycles[kind.index()];
            match key {
                "period_days" => pending.period_days = parse_int(value)?,
                "phase_offset_days" => pending.phase_offset_days = parse_int(value)?,
                "show_weeks" => {
                    config.layout.indicators[kind.index()].show_weeks = parse_bool(value)?
                }
                "due_within_days" => {
                    config.layout.indicators[kind.index()].due_within_days = parse_int(value)?
                }
                _ => {}
            }
        }
        Section::Backlight => {
            let backlight = &mut config.backlight;
            match key {
                "low" => backlight.low = Intensity(parse_int(value)?),
                "high" => backlight.high = Intensity(parse_int(value)?),
                "night_start" => backlight.night_start = parse_int(value)?,
                "night_end" => backlight.night_end = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}
