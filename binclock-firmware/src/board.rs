//! Pico W board wiring
//!
//! Pin assignments for the 1.8" ST7735 TFT module:
//! - SPI1 SCK = GPIO10, MOSI = GPIO11, CS = GPIO9
//! - DC = GPIO8, RST = GPIO12
//! - Backlight = GPIO13 (PWM slice 6, channel B)

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{PIN_10, PIN_11, PIN_12, PIN_13, PIN_8, PIN_9, PWM_SLICE6, SPI1};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embassy_rp::Peri;
use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7735s;
use mipidsi::options::{ColorOrder, Orientation, Rotation};
use mipidsi::Builder;
use static_cell::StaticCell;

use binclock_core::backlight::Intensity;
use binclock_core::render::RenderDriver;
use binclock_core::traits::BacklightOutput;
use binclock_display::GraphicsSurface;

/// Panel size before rotation
const PANEL_WIDTH: u16 = 128;
const PANEL_HEIGHT: u16 = 160;

/// SPI clock for the panel
const SPI_FREQUENCY_HZ: u32 = 16_000_000;

/// Backlight PWM period in counter ticks
const BACKLIGHT_TOP: u16 = 0x0FFF;

type TftBus = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;
type TftInterface = SpiInterface<'static, TftBus, Output<'static>>;

/// The TFT panel, landscape
pub type Tft = mipidsi::Display<TftInterface, ST7735s, Output<'static>>;

/// The render driver as wired on this board
pub type ClockDriver = RenderDriver<GraphicsSurface<Tft>, PwmBacklight>;

/// Errors bringing up the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum BoardError {
    /// SPI device could not take the chip select
    ChipSelect,
    /// Panel did not accept its init sequence
    DisplayInit,
}

/// TFT pins, taken from the peripherals at boot
pub struct TftPins {
    pub spi: Peri<'static, SPI1>,
    pub sck: Peri<'static, PIN_10>,
    pub mosi: Peri<'static, PIN_11>,
    pub cs: Peri<'static, PIN_9>,
    pub dc: Peri<'static, PIN_8>,
    pub rst: Peri<'static, PIN_12>,
}

static TFT_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Reset and initialise the TFT
pub fn init_display(pins: TftPins) -> Result<Tft, BoardError> {
    let mut config = SpiConfig::default();
    config.frequency = SPI_FREQUENCY_HZ;
    let spi = Spi::new_blocking_txonly(pins.spi, pins.sck, pins.mosi, config);

    let cs = Output::new(pins.cs, Level::High);
    let bus = ExclusiveDevice::new_no_delay(spi, cs).map_err(|_| BoardError::ChipSelect)?;

    let dc = Output::new(pins.dc, Level::Low);
    let rst = Output::new(pins.rst, Level::High);
    let interface = SpiInterface::new(bus, dc, TFT_BUFFER.init([0; 512]));

    Builder::new(ST7735s, interface)
        .reset_pin(rst)
        .display_size(PANEL_WIDTH, PANEL_HEIGHT)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .color_order(ColorOrder::Bgr)
        .init(&mut Delay)
        .map_err(|_| BoardError::DisplayInit)
}

/// PWM-dimmed backlight
pub struct PwmBacklight {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmBacklight {
    /// Start at full brightness
    pub fn new(slice: Peri<'static, PWM_SLICE6>, pin: Peri<'static, PIN_13>) -> Self {
        let mut config = PwmConfig::default();
        config.top = BACKLIGHT_TOP;
        config.compare_b = Intensity::HIGH.duty(BACKLIGHT_TOP);
        let pwm = Pwm::new_output_b(slice, pin, config.clone());
        Self { pwm, config }
    }
}

impl BacklightOutput for PwmBacklight {
    fn set_level(&mut self, level: Intensity) {
        self.config.compare_b = level.duty(self.config.top);
        self.pwm.set_config(&self.config);
    }
}
