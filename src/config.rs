// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Startup configuration.  Everything the viewer needs to know is
//! fixed here before the first pixel is sampled: the escape-time
//! parameters, the region of the complex plane, the size of the
//! window, and how many workers to spread the grid across.

use num::Complex;

use crate::error::{Error, Result};

/// Default number of escape-time iterations per point.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default squared-magnitude threshold; a radius of 2.
pub const DEFAULT_THRESHOLD: f64 = 4.0;

/// Describes the left-lower and right-upper corners of the region of
/// the complex plane that gets mapped onto the pixel grid.  The real
/// part is the x-component, the imaginary part the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Smallest real value sampled.
    pub min_re: f64,
    /// Largest real value (approached, never reached, by the grid).
    pub max_re: f64,
    /// Smallest imaginary value sampled.
    pub min_im: f64,
    /// Largest imaginary value (approached, never reached).
    pub max_im: f64,
}

impl Viewport {
    /// Builds a viewport from its left-lower and right-upper corners.
    pub fn from_corners(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Viewport {
        Viewport {
            min_re: leftlower.re,
            max_re: rightupper.re,
            min_im: leftlower.im,
            max_im: rightupper.im,
        }
    }

    /// The left-lower corner.
    pub fn leftlower(&self) -> Complex<f64> {
        Complex::new(self.min_re, self.min_im)
    }

    /// The right-upper corner.
    pub fn rightupper(&self) -> Complex<f64> {
        Complex::new(self.max_re, self.max_im)
    }

    fn validate(&self) -> Result<()> {
        let corners = [self.min_re, self.max_re, self.min_im, self.max_im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(Error::invalid("viewport corners must be finite"));
        }
        if self.max_re <= self.min_re {
            return Err(Error::invalid(
                "the left lower corner is not to the left of the right upper corner",
            ));
        }
        if self.max_im <= self.min_im {
            return Err(Error::invalid(
                "the left lower corner is not lower than the right upper corner",
            ));
        }
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            min_re: -2.0,
            max_re: 2.0,
            min_im: -2.0,
            max_im: 2.0,
        }
    }
}

/// The escape-time parameters.  Once a sampling pass starts it holds
/// a shared borrow of this struct, so the mutators below can only run
/// between passes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalConfig {
    /// Maximum number of iterations per point.
    pub iterations: usize,
    /// The value `z` starts from before the first iteration.
    pub starting_point: Complex<f64>,
    /// Squared magnitude above which a point has escaped.
    pub threshold: f64,
    /// Region of the complex plane to sample.
    pub viewport: Viewport,
}

impl FractalConfig {
    /// A configuration with the given iteration budget and starting
    /// point, and default threshold and viewport.
    pub fn new(iterations: usize, starting_point: Complex<f64>) -> Self {
        FractalConfig {
            iterations,
            starting_point,
            ..FractalConfig::default()
        }
    }

    /// Resets the iteration budget.
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Sets an explicit squared-magnitude threshold under which the
    /// orbit is considered bounded.
    pub fn set_explicit_threshold(&mut self, threshold: f64) -> &mut Self {
        self.threshold = threshold;
        self
    }

    /// Moves the starting point of every orbit.
    pub fn set_starting_point(&mut self, starting_point: Complex<f64>) -> &mut Self {
        self.starting_point = starting_point;
        self
    }

    /// Replaces the sampled region.
    pub fn set_viewport(&mut self, viewport: Viewport) -> &mut Self {
        self.viewport = viewport;
        self
    }

    /// Rejects configurations that cannot produce a meaningful image.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::invalid("iteration budget must be positive"));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::invalid(
                "divergence threshold must be a positive finite number",
            ));
        }
        if !self.starting_point.re.is_finite() || !self.starting_point.im.is_finite() {
            return Err(Error::invalid("starting point must be finite"));
        }
        self.viewport.validate()
    }
}

impl Default for FractalConfig {
    fn default() -> Self {
        FractalConfig {
            iterations: DEFAULT_ITERATIONS,
            starting_point: Complex::new(0.0, 0.0),
            threshold: DEFAULT_THRESHOLD,
            viewport: Viewport::default(),
        }
    }
}

/// Logical size of the image and the factor by which the window
/// enlarges it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Logical width in pixels.
    pub width: usize,
    /// Logical height in pixels.
    pub height: usize,
    /// Device pixels per logical pixel.
    pub scale: usize,
}

impl Resolution {
    /// Width and height of the window in device pixels.
    pub fn physical(&self) -> (usize, usize) {
        (self.width * self.scale, self.height * self.scale)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid("resolution must be positive in both dimensions"));
        }
        if self.scale == 0 {
            return Err(Error::invalid("display scale must be positive"));
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution {
            width: 400,
            height: 400,
            scale: 2,
        }
    }
}

/// Which extent the sampling grid takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridBounds {
    /// A square grid as wide as the iteration budget, normalized by
    /// the budget.  Raising the budget also raises the sample count;
    /// kept to reproduce the classic viewer pixel for pixel.  A budget
    /// below the surface size leaves gaps: device pixels no cell lands
    /// on keep the surface's initial black, which reads as "inside".
    IterationBudget,
    /// One sample per logical pixel, normalized by width and height.
    Resolution,
}

impl Default for GridBounds {
    fn default() -> Self {
        GridBounds::Resolution
    }
}

/// Everything a run needs, gathered at startup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Escape-time parameters.
    pub fractal: FractalConfig,
    /// Image and window size.
    pub resolution: Resolution,
    /// Grid extent policy.
    pub grid: GridBounds,
    /// Number of sampling workers.
    pub threads: usize,
}

impl RenderConfig {
    /// Validates every part of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.fractal.validate()?;
        self.resolution.validate()?;
        if self.threads == 0 {
            return Err(Error::invalid("thread count must be positive"));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            fractal: FractalConfig::default(),
            resolution: Resolution::default(),
            grid: GridBounds::default(),
            threads: num_cpus::get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_viewer() {
        let config = RenderConfig::default();
        assert_eq!(config.fractal.iterations, 1000);
        assert_eq!(config.fractal.starting_point, Complex::new(0.0, 0.0));
        assert_eq!(config.fractal.threshold, 4.0);
        assert_eq!(config.fractal.viewport, Viewport::default());
        assert_eq!(config.resolution.physical(), (800, 800));
        assert!(config.threads >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn set_iterations_is_idempotent() {
        let mut once = FractalConfig::default();
        once.set_iterations(250);
        let mut twice = FractalConfig::default();
        twice.set_iterations(250).set_iterations(250);
        assert_eq!(once, twice);
    }

    #[test]
    fn setters_chain() {
        let mut config = FractalConfig::new(50, Complex::new(0.0, 0.0));
        config
            .set_explicit_threshold(9.0)
            .set_starting_point(Complex::new(0.1, -0.1));
        assert_eq!(config.iterations, 50);
        assert_eq!(config.threshold, 9.0);
        assert_eq!(config.starting_point, Complex::new(0.1, -0.1));
    }

    #[test]
    fn rejects_zero_iterations() {
        let mut config = FractalConfig::default();
        config.set_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_thresholds() {
        for threshold in &[0.0, -4.0, std::f64::NAN, std::f64::INFINITY] {
            let mut config = FractalConfig::default();
            config.set_explicit_threshold(*threshold);
            assert!(config.validate().is_err(), "accepted {}", threshold);
        }
    }

    #[test]
    fn rejects_bad_shape() {
        let mut config = FractalConfig::default();
        config.set_viewport(Viewport::from_corners(
            Complex::new(-1.0, 1.0),
            Complex::new(1.0, -1.0),
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_resolution() {
        let mut config = RenderConfig::default();
        config.resolution.width = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.resolution.scale = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_threads() {
        let mut config = RenderConfig::default();
        config.threads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn viewport_corners_round_trip() {
        let v = Viewport::from_corners(Complex::new(-1.5, -1.0), Complex::new(0.5, 1.0));
        assert_eq!(v.leftlower(), Complex::new(-1.5, -1.0));
        assert_eq!(v.rightupper(), Complex::new(0.5, 1.0));
    }
}
