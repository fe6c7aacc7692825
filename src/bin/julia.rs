extern crate clap;
extern crate env_logger;
extern crate juliabrot;
extern crate log;
extern crate minifb;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use juliabrot::{Field, Options};
use log::{debug, info};
use minifb::{Key, Window, WindowOptions};
use num::Complex;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Given a string and a separator, returns the two values separated by
/// the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const SIZE: &str = "size";
const ITERATIONS: &str = "iterations";
const DELTA: &str = "delta";
const DELAY: &str = "delay";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("julia")
        .version("0.1.0")
        .about("Interactive Julia set viewer; the arrow keys steer the constant")
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| {
                    validate_pair::<usize>(&s, 'x', "Window size must look like WIDTHxHEIGHT")
                })
                .help("Size of the window and the cell grid"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("20")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse the iteration cap",
                        "Iteration cap must be between 1 and 10000",
                    )
                })
                .help("Escape-time iteration cap"),
        )
        .arg(
            Arg::with_name(DELTA)
                .required(false)
                .long(DELTA)
                .short("d")
                .takes_value(true)
                .default_value("0.01")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0,
                        2.0,
                        "Step delta must be a number",
                        "Step delta must be between 0 and 2",
                    )
                })
                .help("How far one key press nudges the constant"),
        )
        .arg(
            Arg::with_name(DELAY)
                .required(false)
                .long(DELAY)
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        10_000,
                        "Could not parse the input delay",
                        "Input delay must be between 0 and 10000 milliseconds",
                    )
                })
                .help("Minimum milliseconds between accepted updates"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse the thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Worker threads per generation pass; defaults to one per CPU"),
        )
        .get_matches()
}

fn options_from(matches: &ArgMatches) -> Options {
    let mut opts = Options::default();
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing window size");
    opts.width = width;
    opts.height = height;
    opts.max_iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Error parsing the iteration cap");
    opts.step_delta =
        f64::from_str(matches.value_of(DELTA).unwrap()).expect("Error parsing the step delta");
    opts.input_delay = Duration::from_millis(
        u64::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing the input delay"),
    );
    if let Some(threads) = matches.value_of(THREADS) {
        opts.threads = usize::from_str(threads).expect("Error parsing the thread count");
    }
    opts
}

/// Reads the arrow keys and derives the next candidate constant, or
/// None when no relevant key is held.  Left and Right walk the real
/// component; Up and Down walk the imaginary one, Up toward -i so the
/// image follows the key directions on screen.
fn steered_constant(window: &Window, current: Complex<f64>, delta: f64) -> Option<Complex<f64>> {
    let mut candidate = current;
    let mut steered = false;

    if window.is_key_down(Key::Left) {
        debug!("left");
        candidate.re -= delta;
        steered = true;
    }
    if window.is_key_down(Key::Right) {
        debug!("right");
        candidate.re += delta;
        steered = true;
    }
    if window.is_key_down(Key::Up) {
        debug!("up");
        candidate.im -= delta;
        steered = true;
    }
    if window.is_key_down(Key::Down) {
        debug!("down");
        candidate.im += delta;
        steered = true;
    }

    if steered {
        Some(candidate)
    } else {
        None
    }
}

fn main() {
    env_logger::init();
    let matches = args();
    let opts = options_from(&matches);

    // No display surface means no viewer; abort startup.
    let mut window = Window::new(
        "Julia Set Fractal",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )
    .expect("Could not open a window");
    window.limit_update_rate(Some(Duration::from_micros(16_600)));

    info!(
        "field {}x{}, {} workers, iteration cap {}",
        opts.width, opts.height, opts.threads, opts.max_iterations
    );

    let started = Instant::now();
    let mut field = Field::with_options(&opts);
    info!("initial pass in {:?}", started.elapsed());

    let mut frame: Vec<u32> = field.cells().iter().map(|cell| cell.color.pack()).collect();
    // Backdated so the very first key press lands without waiting out
    // the debounce interval.
    let mut last_accepted = Instant::now() - opts.input_delay;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Debounce: a minimum interval between accepted updates, never
        // a sleep, so idle frames keep polling for close events.
        if !field.is_updating() && last_accepted.elapsed() >= opts.input_delay {
            if let Some(candidate) = steered_constant(&window, field.constant(), opts.step_delta) {
                let pass = Instant::now();
                field.set_constant(candidate);
                for (slot, cell) in frame.iter_mut().zip(field.cells()) {
                    *slot = cell.color.pack();
                }
                last_accepted = Instant::now();
                info!(
                    "c = {:.5}{:+.5}i in {:?}",
                    field.constant().re,
                    field.constant().im,
                    pass.elapsed()
                );
            }
        }

        window
            .update_with_buffer(&frame, opts.width, opts.height)
            .expect("Could not present the frame");
    }
}
