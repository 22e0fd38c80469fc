// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a discrete sampling grid with an origin at 0,0 and a
//! rectangle on the complex plane.  A grid coordinate is first
//! normalized into [0, 1), then linearly interpolated across the
//! viewport.  The mapping is pure: the same grid coordinate always
//! lands on the same complex number.
use num::Complex;

use crate::config::Viewport;

/// Describes the x, y of a cell in the sampling grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// `lerp(a, b, t) = a + t * (b - a)`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

// Cell `i` of `cells` lands on device index `i * span / cells`.
fn first_on_axis(i: usize, span: usize, cells: usize) -> bool {
    i == 0 || i * span / cells != (i - 1) * span / cells
}

/// Maps a `columns` x `rows` grid onto a viewport.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Number of grid cells along x.
    pub columns: usize,
    /// Number of grid cells along y.
    pub rows: usize,
    /// The region of the complex plane being sampled.
    pub viewport: Viewport,
}

impl PlaneMapper {
    /// Constructor.  Grid coordinates are normalized by the extent of
    /// the grid along each axis.
    pub fn new(columns: usize, rows: usize, viewport: Viewport) -> PlaneMapper {
        PlaneMapper {
            columns,
            rows,
            viewport,
        }
    }

    /// The total number of cells in the grid.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// True if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// The normalized (u, v) position of a grid cell.  Both lie in
    /// [0, 1) for any cell inside the grid.
    pub fn normalize(&self, pixel: &Pixel) -> (f64, f64) {
        (
            (pixel.0 as f64) / (self.columns as f64),
            (pixel.1 as f64) / (self.rows as f64),
        )
    }

    /// Given a cell of the grid, return the complex number at the
    /// equivalent location in the viewport.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let (u, v) = self.normalize(pixel);
        Complex::new(
            lerp(self.viewport.min_re, self.viewport.max_re, u),
            lerp(self.viewport.min_im, self.viewport.max_im, v),
        )
    }

    /// Where a grid cell lands on a surface of `width` x `height`
    /// device pixels.  This is `(u * width, v * height)`, multiplied
    /// out before dividing so a grid the same size as the surface
    /// lands on whole pixels exactly.
    pub fn device_point(&self, pixel: &Pixel, width: usize, height: usize) -> (f64, f64) {
        (
            (pixel.0 as f64) * (width as f64) / (self.columns as f64),
            (pixel.1 as f64) * (height as f64) / (self.rows as f64),
        )
    }

    /// True if `pixel` is the first cell, along both axes, to land on
    /// its device pixel.  When the grid is larger than the surface
    /// several cells share a device pixel; only the owner is drawn, so
    /// the image does not depend on which cell happens to plot last.
    pub fn owns_device_pixel(&self, pixel: &Pixel, width: usize, height: usize) -> bool {
        first_on_axis(pixel.0, width, self.columns) && first_on_axis(pixel.1, height, self.rows)
    }
}
