#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot viewer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c` never carries `z`
//! off to infinity.  In practice we give each point a fixed number of
//! iterations and a threshold: if the squared magnitude of `z` passes
//! the threshold within the budget, the point has escaped, and how
//! quickly it escaped picks its shade of gray.  Points that never
//! escape are painted black.
//!
//! The viewer samples one fixed region of the plane at one fixed
//! resolution, spreads the work across every CPU, shows the result in
//! a window until it is closed, and reports how long the render took.

extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod error;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod sampler;
pub mod surface;
pub mod window;

pub use config::{FractalConfig, GridBounds, RenderConfig, Resolution, Viewport};
pub use error::{Error, Result};
pub use escape::evaluate;
pub use palette::{shade, Color};
pub use sampler::{FieldSampler, PixelSample};
pub use surface::{Canvas, DisplaySurface, Plotter};
pub use window::WindowSurface;
