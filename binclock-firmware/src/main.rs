//! Binclock - NTP desk clock firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W with a 1.8" ST7735 TFT.
//! Shows the local time and date, keeps them set from an SNTP server over
//! Wi-Fi, and marks which kerbside bins go out today.

#![no_std]
#![no_main]

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, DhcpConfig, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use binclock_core::config::{parse_config, ClockConfig};
use binclock_core::render::RenderDriver;
use binclock_display::GraphicsSurface;

use crate::board::{PwmBacklight, TftPins};

mod board;
mod channels;
mod clock;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

/// Network stack random seed, mixed with the MAC address
const NET_SEED: u64 = 0x7c8f_3a2e_9d14_6b5a;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<5>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Binclock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    clock::set_timezone(config.timezone);
    info!("Configuration loaded");

    // Display first, so the face runs even without a network
    let tft = unwrap!(board::init_display(TftPins {
        spi: p.SPI1,
        sck: p.PIN_10,
        mosi: p.PIN_11,
        cs: p.PIN_9,
        dc: p.PIN_8,
        rst: p.PIN_12,
    }));
    let backlight = PwmBacklight::new(p.PWM_SLICE6, p.PIN_13);
    let surface = GraphicsSurface::new(tft, config.palette.background);
    let driver = RenderDriver::new(surface, backlight, &config);
    info!("Display initialized");

    spawner.spawn(unwrap!(tasks::tick_task()));
    spawner.spawn(unwrap!(tasks::render_task(driver)));

    // Radio: power on GPIO23, SPI over PIO0 on GPIO24/25/29
    let fw = cyw43_firmware::CYW43_43439A0;
    let clm = cyw43_firmware::CYW43_43439A0_CLM;

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(unwrap!(tasks::wifi_task(runner)));

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let mac = control.address().await;
    let hostname = config.network.hostname(&mac);
    info!("Hostname {}", hostname.as_str());

    let mut dhcp = DhcpConfig::default();
    dhcp.hostname = heapless::String::try_from(hostname.as_str()).ok();

    let mut seed_bytes = [0u8; 8];
    seed_bytes[..6].copy_from_slice(&mac);
    let seed = NET_SEED ^ u64::from_le_bytes(seed_bytes);

    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(dhcp),
        NET_RESOURCES.init(StackResources::<5>::new()),
        seed,
    );
    spawner.spawn(unwrap!(tasks::net_task(runner)));

    spawner.spawn(unwrap!(tasks::link_task(
        control,
        stack,
        config.network.clone()
    )));
    spawner.spawn(unwrap!(tasks::time_sync_task(
        stack,
        config.network.ntp_server.clone()
    )));

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!(
            "Main loop heartbeat, synchronized={}",
            clock::is_synchronized()
        );
    }
}

/// Parse the embedded clock.toml
///
/// Falls back to the built-in defaults if it is broken; build.rs should
/// have caught that already.
fn load_config() -> ClockConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!(
                "Failed to parse embedded config at line {}: {:?}",
                e.line, e.error
            );
            error!("Using default configuration");
            ClockConfig::default()
        }
    }
}
