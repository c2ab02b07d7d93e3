//! Seven-segment numeral geometry
//!
//! Segments are named in the usual way:
//! ```text
//!  aaa
//! f   b
//!  ggg
//! e   c
//!  ddd
//! ```

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Width of a digit's segments
pub const DIGIT_WIDTH: u32 = 24;

/// Height of a digit
pub const DIGIT_HEIGHT: u32 = 48;

/// Stroke width of one segment
pub const SEGMENT_THICKNESS: u32 = 5;

/// Horizontal advance after a digit, including the gap
pub const DIGIT_ADVANCE: u16 = 28;

/// Horizontal advance after a colon
pub const COLON_ADVANCE: u16 = 14;

/// Lit segments for 0-9, bit 0 = a through bit 6 = g
const DIGIT_SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Rectangles making up the glyphs, relative to a glyph origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentGeometry {
    width: u32,
    height: u32,
    thickness: u32,
}

impl Default for SegmentGeometry {
    fn default() -> Self {
        Self::new(DIGIT_WIDTH, DIGIT_HEIGHT, SEGMENT_THICKNESS)
    }
}

impl SegmentGeometry {
    pub const fn new(width: u32, height: u32, thickness: u32) -> Self {
        Self {
            width,
            height,
            thickness,
        }
    }

    /// Segment bitmask for a digit character, None for anything else
    pub fn segments_for(digit: char) -> Option<u8> {
        let value = digit.to_digit(10)?;
        DIGIT_SEGMENTS.get(value as usize).copied()
    }

    /// Rectangle of segment `index` (0 = a .. 6 = g) for a glyph at `origin`
    pub fn segment(&self, origin: Point, index: u8) -> Rectangle {
        let (w, h, t) = (self.width, self.height, self.thickness);
        let mid = (h - t) / 2;
        let bar = Size::new(w - 2 * t, t);
        let upper = Size::new(t, mid - t);
        let lower = Size::new(t, h - t - (mid + t));

        let (offset, size) = match index {
            0 => (Point::new(t as i32, 0), bar),
            1 => (Point::new((w - t) as i32, t as i32), upper),
            2 => (Point::new((w - t) as i32, (mid + t) as i32), lower),
            3 => (Point::new(t as i32, (h - t) as i32), bar),
            4 => (Point::new(0, (mid + t) as i32), lower),
            5 => (Point::new(0, t as i32), upper),
            _ => (Point::new(t as i32, mid as i32), bar),
        };
        Rectangle::new(origin + offset, size)
    }

    /// The lit rectangles of `digit`
    pub fn digit(&self, origin: Point, digit: char) -> Option<impl Iterator<Item = Rectangle>> {
        let mask = Self::segments_for(digit)?;
        let geometry = *self;
        Some(
            (0..7u8)
                .filter(move |i| mask & (1 << i) != 0)
                .map(move |i| geometry.segment(origin, i)),
        )
    }

    /// The two dots of a colon
    pub fn colon(&self, origin: Point) -> [Rectangle; 2] {
        let t = self.thickness;
        let x = (COLON_ADVANCE as i32 - t as i32) / 2;
        let dot = Size::new(t, t);
        [
            Rectangle::new(origin + Point::new(x, (self.height / 3) as i32), dot),
            Rectangle::new(origin + Point::new(x, (2 * self.height / 3) as i32), dot),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_counts() {
        let geometry = SegmentGeometry::default();
        let lit = |d| geometry.digit(Point::zero(), d).unwrap().count();
        assert_eq!(lit('8'), 7);
        assert_eq!(lit('1'), 2);
        assert_eq!(lit('7'), 3);
        assert_eq!(lit('0'), 6);
        assert!(geometry.digit(Point::zero(), 'x').is_none());
    }

    #[test]
    fn test_segments_stay_inside_cell() {
        let geometry = SegmentGeometry::default();
        let cell = Rectangle::new(Point::zero(), Size::new(DIGIT_WIDTH, DIGIT_HEIGHT));
        for i in 0..7 {
            let seg = geometry.segment(Point::zero(), i);
            assert!(cell.contains(seg.top_left));
            assert!(cell.contains(seg.bottom_right().unwrap()));
        }
    }

    #[test]
    fn test_segments_do_not_overlap() {
        let geometry = SegmentGeometry::default();
        for a in 0..7 {
            for b in (a + 1)..7 {
                let ra = geometry.segment(Point::zero(), a);
                let rb = geometry.segment(Point::zero(), b);
                assert!(ra.intersection(&rb).is_zero_sized(), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_colon_dots_inside_advance() {
        let geometry = SegmentGeometry::default();
        for dot in geometry.colon(Point::new(10, 0)) {
            assert!(dot.top_left.x >= 10);
            assert!(dot.bottom_right().unwrap().x < 10 + COLON_ADVANCE as i32);
        }
    }
}
