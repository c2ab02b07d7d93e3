//! Display colours

use crate::schedule::{BinKind, BIN_COUNT};

/// 16-bit RGB565 colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Colour(pub u16);

impl Colour {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const YELLOW: Self = Self(0xFFE0);
    /// Orange used for the time digits
    pub const AMBER: Self = Self(0xFBE0);
    /// Dim grey-green left behind by unlit segments
    pub const GHOST: Self = Self(0x39C4);

    /// Pack 8-bit channels into RGB565
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3))
    }

    /// Raw RGB565 value
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Red channel, 0-31
    pub const fn r5(&self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Green channel, 0-63
    pub const fn g6(&self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// Blue channel, 0-31
    pub const fn b5(&self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

/// Colour for every element on the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    pub background: Colour,
    /// Date line
    pub date: Colour,
    /// Lit time digits and the colon on even seconds
    pub digits: Colour,
    /// "88:88" under-paint and the colon on odd seconds
    pub ghost: Colour,
    /// Indicator colour per bin, in [`BinKind::ALL`] order
    pub bins: [Colour; BIN_COUNT],
    /// Week countdown drawn over an indicator
    pub overlay: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Colour::BLACK,
            date: Colour::GREEN,
            digits: Colour::AMBER,
            ghost: Colour::GHOST,
            bins: [Colour::RED, Colour::YELLOW, Colour::GREEN],
            overlay: Colour::WHITE,
        }
    }
}

impl Palette {
    pub fn bin(&self, kind: BinKind) -> Colour {
        self.bins[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb888_packing() {
        assert_eq!(Colour::from_rgb888(0, 0, 0), Colour::BLACK);
        assert_eq!(Colour::from_rgb888(255, 255, 255), Colour::WHITE);
        assert_eq!(Colour::from_rgb888(255, 0, 0), Colour::RED);
        assert_eq!(Colour::from_rgb888(0, 255, 0), Colour::GREEN);
    }

    #[test]
    fn test_channels() {
        assert_eq!(Colour::AMBER.r5(), 31);
        assert_eq!(Colour::AMBER.g6(), 31);
        assert_eq!(Colour::AMBER.b5(), 0);
    }

    #[test]
    fn test_default_bin_colours() {
        let palette = Palette::default();
        assert_eq!(palette.bin(BinKind::Landfill), Colour::RED);
        assert_eq!(palette.bin(BinKind::Recycling), Colour::YELLOW);
        assert_eq!(palette.bin(BinKind::Garden), Colour::GREEN);
    }
}
