// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The field sampler walks every cell of the sampling grid, runs the
//! escape-time test on the matching point of the complex plane, and
//! plots the shaded result onto a display surface.
//!
//! The grid is flattened into a single stream of (column, row) pairs
//! shared by a pool of scoped worker threads; each worker pulls a
//! batch from the stream, evaluates it without holding any lock, and
//! only takes the display's mutex for the color-and-plot pair.  Once
//! every worker has joined, the surface is presented exactly once.
//!
//! A grid larger than the surface folds several cells onto each
//! device pixel.  Only the first cell on each device row and column is
//! evaluated and drawn, so the picture is the same whatever order the
//! workers finish in.

use itertools::iproduct;
use log::{debug, info};
use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::{FractalConfig, GridBounds, RenderConfig, Resolution};
use crate::error::{Error, Result};
use crate::escape::evaluate;
use crate::palette::{shade, Color};
use crate::planes::{Pixel, PlaneMapper};
use crate::surface::{DisplaySurface, Plotter};

type CellQueue = Arc<Mutex<itertools::Product<Range<usize>, Range<usize>>>>;

// Cells handed to a worker per trip to the queue.
const BATCH: usize = 256;

/// One evaluated grid cell.  Produced and consumed within a pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelSample {
    /// Column in the sampling grid.
    pub grid_x: usize,
    /// Row in the sampling grid.
    pub grid_y: usize,
    /// Column normalized into [0, 1).
    pub u: f64,
    /// Row normalized into [0, 1).
    pub v: f64,
    /// What `evaluate` said about the cell's point.
    pub iterations: usize,
}

impl PixelSample {
    /// The color this sample is drawn with.
    pub fn color(&self) -> Color {
        shade(self.iterations)
    }
}

/// Holds the escape-time configuration between passes, the policy
/// for sizing the grid, and the duration of the last completed pass.
#[derive(Debug)]
pub struct FieldSampler {
    config: FractalConfig,
    grid: GridBounds,
    threads: usize,
    last_run: Option<Duration>,
}

impl FieldSampler {
    /// Builds a sampler from a validated startup configuration.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(FieldSampler {
            config: config.fractal,
            grid: config.grid,
            threads: config.threads,
            last_run: None,
        })
    }

    /// The escape-time parameters in effect.
    pub fn config(&self) -> &FractalConfig {
        &self.config
    }

    /// Resets the iteration budget for the next pass.
    pub fn set_iterations(&mut self, iterations: usize) {
        self.config.set_iterations(iterations);
    }

    /// Sets the divergence threshold for the next pass.
    pub fn set_explicit_threshold(&mut self, threshold: f64) {
        self.config.set_explicit_threshold(threshold);
    }

    /// Elapsed seconds of the last completed pass, if any.
    pub fn last_run_duration_seconds(&self) -> Option<f64> {
        self.last_run.map(|d| d.as_secs_f64())
    }

    /// The one-line timing report, e.g. `Timing: 0.842s`.
    pub fn time_log(&self) -> Option<String> {
        self.last_run_duration_seconds()
            .map(|secs| format!("Timing: {:.3}s", secs))
    }

    /// The grid a pass at `resolution` walks.
    pub fn grid_for(&self, resolution: &Resolution) -> PlaneMapper {
        match self.grid {
            GridBounds::IterationBudget => PlaneMapper::new(
                self.config.iterations,
                self.config.iterations,
                self.config.viewport,
            ),
            GridBounds::Resolution => {
                PlaneMapper::new(resolution.width, resolution.height, self.config.viewport)
            }
        }
    }

    /// Evaluates a single cell of `plane`.
    pub fn sample_cell(&self, plane: &PlaneMapper, pixel: Pixel) -> PixelSample {
        let (u, v) = plane.normalize(&pixel);
        PixelSample {
            grid_x: pixel.0,
            grid_y: pixel.1,
            u,
            v,
            iterations: evaluate(plane.pixel_to_point(&pixel), &self.config),
        }
    }

    /// Samples the whole grid onto `display`, presents it once, and
    /// returns the elapsed seconds.  `resolution` must match the
    /// surface the samples are plotted on.
    pub fn sample<D: DisplaySurface>(
        &mut self,
        resolution: &Resolution,
        display: &mut D,
    ) -> Result<f64> {
        self.config.validate()?;
        let plane = self.grid_for(resolution);
        let (width, height) = display.size();
        debug!(
            "sampling {}x{} grid, {} iterations, {} threads",
            plane.columns, plane.rows, self.config.iterations, self.threads
        );

        let start = Instant::now();
        self.plot_all(&plane, width, height, display.plotter())?;
        display.present()?;
        let elapsed = start.elapsed();

        self.last_run = Some(elapsed);
        info!("sampled {} cells in {:?}", plane.len(), elapsed);
        Ok(elapsed.as_secs_f64())
    }

    fn plot_all<P: Plotter + Send>(
        &self,
        plane: &PlaneMapper,
        width: usize,
        height: usize,
        plotter: &mut P,
    ) -> Result<()> {
        let plotter = Mutex::new(plotter);
        let cells: CellQueue = Arc::new(Mutex::new(iproduct!(0..plane.columns, 0..plane.rows)));
        crossbeam::scope(|spawner| {
            for _ in 0..self.threads {
                let cells = cells.clone();
                let plotter = &plotter;
                spawner.spawn(move |_| loop {
                    let batch: Vec<(usize, usize)> =
                        { cells.lock().unwrap().by_ref().take(BATCH).collect() };
                    if batch.is_empty() {
                        break;
                    }
                    for (column, row) in batch {
                        let pixel = Pixel(column, row);
                        if !plane.owns_device_pixel(&pixel, width, height) {
                            continue;
                        }
                        let color = self.sample_cell(plane, pixel).color();
                        let (x, y) = plane.device_point(&pixel, width, height);
                        let mut surface = plotter.lock().unwrap();
                        surface.set_draw_color(color);
                        surface.plot_point(x, y);
                    }
                });
            }
        })
        .map_err(|_| Error::Worker)
    }
}
