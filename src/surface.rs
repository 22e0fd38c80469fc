// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The capabilities the sampler needs from whatever shows the image.
//!
//! Drawing is split from the rest of the display: a `Plotter` takes a
//! draw color and plots points, and is the only part handed to the
//! sampling workers (behind a mutex).  The `DisplaySurface` owns the
//! plotter along with presentation, the event pump, and teardown,
//! none of which ever leave the main thread.

use image::RgbaImage;

use crate::error::Result;
use crate::palette::Color;

/// A draw-color-then-plot target.
pub trait Plotter {
    /// Sets the color used by subsequent `plot_point` calls.
    fn set_draw_color(&mut self, color: Color);

    /// Plots one point at device coordinates.  Fractional coordinates
    /// are truncated; points outside the surface are dropped.
    fn plot_point(&mut self, x: f64, y: f64);
}

/// A window, or anything standing in for one.
pub trait DisplaySurface {
    /// The drawing half of the surface.
    type Plotter: Plotter + Send;

    /// Logical width and height in device coordinates.
    fn size(&self) -> (usize, usize);

    /// Access to the drawing half.
    fn plotter(&mut self) -> &mut Self::Plotter;

    /// Shows everything plotted so far.
    fn present(&mut self) -> Result<()>;

    /// Pumps pending input and reports whether the user asked to quit.
    /// May block until input arrives.
    fn poll_quit_requested(&mut self) -> Result<bool>;

    /// Releases the surface.
    fn destroy(self)
    where
        Self: Sized;
}

/// An in-memory RGBA surface.  Used on its own for headless renders,
/// and as the back buffer of the window.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    color: Color,
    frames: usize,
}

impl Canvas {
    /// A canvas of the given logical size, cleared to opaque black.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            image: RgbaImage::from_pixel(width as u32, height as u32, Color::BLACK.to_rgba()),
            color: Color::BLACK,
            frames: 0,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// The color at a pixel, if it is on the canvas.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(Color::from_rgba(self.image.get_pixel(x as u32, y as u32)))
    }

    /// The raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.image
    }

    /// How many times the canvas has been presented.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Plotter for Canvas {
    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn plot_point(&mut self, x: f64, y: f64) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, self.color.to_rgba());
        }
    }
}

impl DisplaySurface for Canvas {
    type Plotter = Canvas;

    fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn plotter(&mut self) -> &mut Canvas {
        self
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    // Nobody can close a canvas, so there is nothing to wait for.
    fn poll_quit_requested(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn destroy(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_black() {
        let canvas = Canvas::new(3, 2);
        assert_eq!(canvas.size(), (3, 2));
        assert_eq!(canvas.color_at(2, 1), Some(Color::BLACK));
        assert_eq!(canvas.color_at(3, 0), None);
        assert_eq!(canvas.as_bytes().len(), 3 * 2 * 4);
    }

    #[test]
    fn plots_with_the_current_color() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_draw_color(Color::gray(245));
        canvas.plot_point(1.0, 2.0);
        canvas.plot_point(3.9, 3.9);
        assert_eq!(canvas.color_at(1, 2), Some(Color::gray(245)));
        assert_eq!(canvas.color_at(3, 3), Some(Color::gray(245)));
        assert_eq!(canvas.color_at(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn drops_points_off_the_canvas() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set_draw_color(Color::gray(9));
        canvas.plot_point(-0.5, 0.0);
        canvas.plot_point(2.0, 0.0);
        canvas.plot_point(0.0, 7.0);
        assert!(canvas.as_bytes().chunks(4).all(|p| p == &[0u8, 0, 0, 255][..]));
    }

    #[test]
    fn counts_presented_frames() {
        let mut canvas = Canvas::new(1, 1);
        canvas.present().unwrap();
        canvas.present().unwrap();
        assert_eq!(canvas.frames(), 2);
        assert!(canvas.poll_quit_requested().unwrap());
    }
}
