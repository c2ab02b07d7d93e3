//! Build script for binclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates clock.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate clock.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");

    if !config_path.exists() {
        fail(
            "clock.toml not found",
            &["The firmware embeds clock.toml from the binclock-firmware directory."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read clock.toml", &[&e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid TOML syntax in clock.toml", &lines)
        }
    };

    let mut errors = Vec::new();
    validate_network(&config, &mut errors);
    validate_time(&config, &mut errors);
    validate_schedule(&config, &mut errors);
    validate_backlight(&config, &mut errors);

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid values in clock.toml", &lines);
    }

    println!("cargo:warning=clock.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn table<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        _ => None,
    }
}

fn check_string(t: &toml::Table, section: &str, key: &str, max: usize, errors: &mut Vec<String>) {
    match t.get(key) {
        None => {}
        Some(toml::Value::String(s)) if s.len() <= max => {}
        Some(toml::Value::String(_)) => {
            errors.push(format!("[{}] {} is longer than {} bytes", section, key, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be a string", section, key)),
    }
}

fn check_int(
    t: &toml::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match t.get(key) {
        None => None,
        Some(toml::Value::Integer(v)) if range.contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn validate_network(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(network) = table(config, "network") else {
        errors.push("Missing [network] section".to_string());
        return;
    };

    match network.get("ssid") {
        Some(toml::Value::String(s)) if s.is_empty() => {
            errors.push("[network] ssid must not be empty".to_string())
        }
        None => errors.push("[network] missing 'ssid'".to_string()),
        _ => check_string(network, "network", "ssid", 32, errors),
    }

    check_string(network, "network", "password", 64, errors);
    if let Some(toml::Value::String(pw)) = network.get("password") {
        if !pw.is_empty() && pw.len() < 8 {
            errors.push("[network] password must be empty or 8+ characters".to_string());
        }
    }

    check_string(network, "network", "ntp_server", 64, errors);
    check_string(network, "network", "hostname_prefix", 16, errors);
}

fn validate_time(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(time) = table(config, "time") {
        check_string(time, "time", "timezone", 64, errors);
    }
}

fn validate_schedule(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(schedule) = table(config, "schedule") else {
        return;
    };

    if let Some(anchor) = schedule.get("anchor") {
        let valid = match anchor {
            toml::Value::String(s) => {
                let parts: Vec<&str> = s.split('-').collect();
                parts.len() == 3 && parts.iter().all(|p| p.parse::<u32>().is_ok())
            }
            _ => false,
        };
        if !valid {
            errors.push("[schedule] anchor must be a \"YYYY-MM-DD\" string".to_string());
        }
    }

    for (name, value) in schedule {
        let toml::Value::Table(cycle) = value else {
            continue;
        };
        if !["landfill", "recycling", "garden"].contains(&name.as_str()) {
            errors.push(format!("[schedule.{}] is not a known bin", name));
            continue;
        }

        let section = format!("schedule.{}", name);
        let period = check_int(cycle, &section, "period_days", 1..=365, errors);
        let offset = check_int(cycle, &section, "phase_offset_days", 0..=364, errors);
        check_int(cycle, &section, "due_within_days", 0..=365, errors);
        if let (Some(period), Some(offset)) = (period, offset) {
            if offset >= period {
                errors.push(format!(
                    "[{}] phase_offset_days must be below period_days",
                    section
                ));
            }
        }
    }
}

fn validate_backlight(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(backlight) = table(config, "backlight") else {
        return;
    };

    check_int(backlight, "backlight", "low", 0..=255, errors);
    check_int(backlight, "backlight", "high", 0..=255, errors);
    check_int(backlight, "backlight", "night_start", 0..=23, errors);
    check_int(backlight, "backlight", "night_end", 0..=23, errors);
}
