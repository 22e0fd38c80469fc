// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate mandelbrot;
extern crate num;
extern crate rand;

use mandelbrot::planes::{Pixel, PlaneMapper};
use mandelbrot::{
    evaluate, Canvas, Color, DisplaySurface, FieldSampler, FractalConfig, GridBounds,
    RenderConfig, Resolution, Viewport,
};
use num::Complex;
use rand::Rng;

fn config(iterations: usize, size: usize, grid: GridBounds, threads: usize) -> RenderConfig {
    RenderConfig {
        fractal: FractalConfig::new(iterations, Complex::new(0.0, 0.0)),
        resolution: Resolution {
            width: size,
            height: size,
            scale: 2,
        },
        grid,
        threads,
    }
}

fn render(config: &RenderConfig) -> Canvas {
    let mut sampler = FieldSampler::new(config).unwrap();
    let mut canvas = Canvas::new(config.resolution.width, config.resolution.height);
    sampler.sample(&config.resolution, &mut canvas).unwrap();
    canvas
}

// Grid cell whose point lies closest to `point` without exceeding it,
// on a square grid over the default viewport.
fn nearest(size: usize, point: Complex<f64>) -> (usize, usize) {
    let v = Viewport::default();
    let x = (point.re - v.min_re) / (v.max_re - v.min_re) * size as f64;
    let y = (point.im - v.min_im) / (v.max_im - v.min_im) * size as f64;
    (x as usize, y as usize)
}

#[test]
fn classifies_known_points_at_one_hundred() {
    for grid in &[GridBounds::Resolution, GridBounds::IterationBudget] {
        let canvas = render(&config(100, 100, *grid, 4));
        assert_eq!(canvas.frames(), 1);

        let (x, y) = nearest(100, Complex::new(-0.5, 0.0));
        assert_eq!(canvas.color_at(x, y), Some(Color::BLACK));

        let (x, y) = nearest(100, Complex::new(1.5, 1.5));
        let outside = canvas.color_at(x, y).unwrap();
        assert_ne!(outside, Color::BLACK);
        assert_eq!(outside, Color::gray(245));
    }
}

#[test]
fn coupled_grid_oversamples_onto_the_surface() {
    let canvas = render(&config(200, 100, GridBounds::IterationBudget, 4));
    let (x, y) = nearest(100, Complex::new(-0.5, 0.0));
    assert_eq!(canvas.color_at(x, y), Some(Color::BLACK));
    assert_eq!(canvas.color_at(0, 0), Some(Color::gray(245)));
}

#[test]
fn every_pixel_is_written_when_grid_matches_surface() {
    let canvas = render(&config(30, 64, GridBounds::Resolution, 3));
    let expected = PlaneMapper::new(64, 64, Viewport::default());
    let fractal = FractalConfig::new(30, Complex::new(0.0, 0.0));
    for x in 0..64 {
        for y in 0..64 {
            let c = expected.pixel_to_point(&Pixel(x, y));
            let color = mandelbrot::shade(evaluate(c, &fractal));
            assert_eq!(canvas.color_at(x, y), Some(color), "pixel {},{}", x, y);
        }
    }
}

#[test]
fn coupled_passes_are_deterministic_across_thread_counts() {
    // 250 cells per axis fold onto 100 device pixels.
    let single = render(&config(250, 100, GridBounds::IterationBudget, 1));
    for _ in 0..4 {
        let many = render(&config(250, 100, GridBounds::IterationBudget, 8));
        assert_eq!(single.as_bytes(), many.as_bytes());
    }
}

#[test]
fn coupled_pass_draws_the_first_cell_on_each_device_pixel() {
    let canvas = render(&config(250, 100, GridBounds::IterationBudget, 8));
    let plane = PlaneMapper::new(250, 250, Viewport::default());
    let fractal = FractalConfig::new(250, Complex::new(0.0, 0.0));
    for x in 0..100 {
        for y in 0..100 {
            // First cell on device pixel k is ceil(k * 250 / 100).
            let cell = Pixel((x * 250 + 99) / 100, (y * 250 + 99) / 100);
            let color = mandelbrot::shade(evaluate(plane.pixel_to_point(&cell), &fractal));
            assert_eq!(canvas.color_at(x, y), Some(color), "pixel {},{}", x, y);
        }
    }
}

#[test]
fn passes_are_deterministic_across_thread_counts() {
    let single = render(&config(60, 80, GridBounds::Resolution, 1));
    let many = render(&config(60, 80, GridBounds::Resolution, 8));
    let again = render(&config(60, 80, GridBounds::Resolution, 8));
    assert_eq!(single.as_bytes(), many.as_bytes());
    assert_eq!(many.as_bytes(), again.as_bytes());
}

#[test]
fn points_beyond_radius_two_escape_at_once() {
    let fractal = FractalConfig::new(50, Complex::new(0.0, 0.0));
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let r = rng.gen_range(2.01, 100.0);
        let theta = rng.gen_range(0.0, 2.0 * std::f64::consts::PI);
        let c = Complex::from_polar(&r, &theta);
        assert_eq!(evaluate(c, &fractal), 1, "{} did not escape", c);
    }
}

#[test]
fn repeated_passes_reuse_the_sampler() {
    let config = config(40, 32, GridBounds::Resolution, 2);
    let mut sampler = FieldSampler::new(&config).unwrap();
    let mut first = Canvas::new(32, 32);
    let mut second = Canvas::new(32, 32);
    sampler.sample(&config.resolution, &mut first).unwrap();
    sampler.sample(&config.resolution, &mut second).unwrap();
    assert_eq!(first.as_bytes(), second.as_bytes());
    assert!(sampler.last_run_duration_seconds().is_some());
    assert!(second.poll_quit_requested().unwrap());
    second.destroy();
}
