// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colors, and the banding scheme that turns escape counts into them.

use image::{Pixel, Rgba};

/// An 8-bit-per-channel RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 255 is fully opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black, the color of the set itself.
    pub const BLACK: Color = Color::gray(0);

    /// An opaque gray with all three channels at `level`.
    pub const fn gray(level: u8) -> Color {
        Color {
            r: level,
            g: level,
            b: level,
            a: 255,
        }
    }

    /// The `image` crate's view of this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba::from_channels(self.r, self.g, self.b, self.a)
    }

    /// Reads a color back out of an image pixel.
    pub fn from_rgba(pixel: &Rgba<u8>) -> Color {
        let c = pixel.channels();
        Color {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        }
    }
}

/// Maps an escape-time result to a color.  Zero is the interior and
/// is black; anything else is a gray of `(245 * result) mod 255`.
/// The bands repeat as the result grows, which gives the outside of
/// the set its striped look.
pub fn shade(result: usize) -> Color {
    if result == 0 {
        return Color::BLACK;
    }
    Color::gray(((245 * result as u64) % 255) as u8)
}
