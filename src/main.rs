// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use log::debug;
use mandelbrot::{
    DisplaySurface, Error, FieldSampler, FractalConfig, GridBounds, RenderConfig, Resolution,
    Result, Viewport, WindowSurface,
};
use num::Complex;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(
    s: &str,
    separator: char,
    err: &str,
) -> std::result::Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const SIZE: &str = "size";
const SCALE: &str = "scale";
const ITERATIONS: &str = "iterations";
const START: &str = "start";
const THRESHOLD: &str = "threshold";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const COUPLED: &str = "coupled";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version("0.1.0")
        .about("Escape-time Mandelbrot viewer")
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("400x400")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse image size"))
                .help("Logical size of the image"),
        )
        .arg(
            Arg::with_name(SCALE)
                .long(SCALE)
                .takes_value(true)
                .default_value("2")
                .validator(|s| validate_number::<usize>(&s, "Could not parse display scale"))
                .help("Window pixels per image pixel"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| validate_number::<usize>(&s, "Could not parse iteration count"))
                .help("Number of escape-time iterations per point"),
        )
        .arg(
            Arg::with_name(START)
                .long(START)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse starting point"))
                .help("Starting value of z for every orbit"),
        )
        .arg(
            Arg::with_name(THRESHOLD)
                .long(THRESHOLD)
                .takes_value(true)
                .default_value("4")
                .validator(|s| validate_number::<f64>(&s, "Could not parse threshold"))
                .help("Squared magnitude beyond which a point has escaped"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,-2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the sampled region"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2,2")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the sampled region"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| validate_number::<usize>(&s, "Could not parse thread count"))
                .help("Number of sampling threads [default: number of CPUs]"),
        )
        .arg(
            Arg::with_name(COUPLED)
                .long(COUPLED)
                .help(
                    "Size the sampling grid by the iteration budget instead of the image; \
                     a budget below the image size leaves unplotted black gaps",
                ),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| Error::InvalidConfig(format!("could not read --{}", name)))
}

fn pair<T: FromStr>(matches: &ArgMatches, name: &str, separator: char) -> Result<(T, T)> {
    matches
        .value_of(name)
        .and_then(|s| parse_pair(s, separator))
        .ok_or_else(|| Error::InvalidConfig(format!("could not read --{}", name)))
}

fn complex(matches: &ArgMatches, name: &str) -> Result<Complex<f64>> {
    matches
        .value_of(name)
        .and_then(parse_complex)
        .ok_or_else(|| Error::InvalidConfig(format!("could not read --{}", name)))
}

fn render_config(matches: &ArgMatches) -> Result<RenderConfig> {
    let (width, height) = pair::<usize>(matches, SIZE, 'x')?;
    let mut fractal = FractalConfig::new(value(matches, ITERATIONS)?, complex(matches, START)?);
    fractal
        .set_explicit_threshold(value(matches, THRESHOLD)?)
        .set_viewport(Viewport::from_corners(
            complex(matches, LEFTLOWER)?,
            complex(matches, RIGHTUPPER)?,
        ));
    let threads = match matches.value_of(THREADS) {
        Some(_) => value(matches, THREADS)?,
        None => num_cpus::get(),
    };
    let grid = if matches.is_present(COUPLED) {
        GridBounds::IterationBudget
    } else {
        GridBounds::Resolution
    };

    Ok(RenderConfig {
        fractal,
        resolution: Resolution {
            width,
            height,
            scale: value(matches, SCALE)?,
        },
        grid,
        threads,
    })
}

fn run(config: &RenderConfig) -> Result<()> {
    debug!("{:?}", config);
    let mut sampler = FieldSampler::new(config)?;
    let mut display = WindowSurface::open(&config.resolution)?;

    sampler.sample(&config.resolution, &mut display)?;
    while !display.poll_quit_requested()? {}
    display.destroy();

    if let Some(timing) = sampler.time_log() {
        println!("{}", timing);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = render_config(&matches).and_then(|config| run(&config)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
