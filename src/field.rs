// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time field.
//!
//! A field is a fixed grid of cells stretched over the square of the
//! complex plane with corners at -2-2i and 2+2i.  Each cell holds the
//! number of rounds of z <- z^2 + c its own plane point survived
//! before leaving the escape radius, plus the color that count maps
//! to.  The constant c is shared by every cell; replacing it through
//! `set_constant` recomputes the entire grid before returning.
//!
//! A generation pass carves the rows into contiguous bands, one per
//! worker, and fans the bands out to scoped threads.  Bands never
//! overlap and every worker carries its own copy of the constant, so
//! the finished grid is bit-identical no matter how many workers ran
//! or in what order they were scheduled.

extern crate crossbeam;

use num::{clamp, Complex};
use std::cmp;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};

use itertools::iproduct;

use options::Options;
use planes::{Pixel, PlaneMapper};

/// The constant every field starts from, a seed that renders a swirl
/// of connected tendrils rather than disconnected dust.
pub const DEFAULT_CONSTANT: Complex<f64> = Complex {
    re: -0.7,
    im: 0.27015,
};

/// Bound on either component of the constant.  `set_constant` pins
/// components to [-CONSTANT_LIMIT, CONSTANT_LIMIT]; wandering further
/// out renders nothing but instant escapes.
pub const CONSTANT_LIMIT: f64 = 2.0;

// Corners of the plane square the grid is stretched over.
const PLANE_LEFTLOWER: Complex<f64> = Complex { re: -2.0, im: -2.0 };
const PLANE_RIGHTUPPER: Complex<f64> = Complex { re: 2.0, im: 2.0 };

// Escape radius, squared.  Once |z| reaches 2 the orbit cannot return.
const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// An 8-bit red, green, blue triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Packs the triple into the 0RGB word a display buffer wants.
    pub fn pack(&self) -> u32 {
        (u32::from(self.0) << 16) | (u32::from(self.1) << 8) | u32::from(self.2)
    }
}

/// One cell of the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Rounds the cell's point survived, capped at the field's
    /// iteration limit.  A capped count means the point never escaped
    /// and is treated as a member of the set.
    pub iterations: usize,
    /// The palette color for that count.
    pub color: Rgb,
}

/// A width x height grid of escape-time cells plus the constant that
/// parameterizes them.  The grid never resizes after construction, and
/// nothing hands out a mutable view of it: readers get slices, and the
/// only writer is the generation pass inside `set_constant`.
pub struct Field {
    plane: PlaneMapper,
    cells: Vec<Cell>,
    c: Complex<f64>,
    limit: usize,
    workers: usize,
    updating: AtomicBool,
}

impl Field {
    /// Builds a field with the default constant and default tunables
    /// and runs one full generation pass before returning, so the grid
    /// is never observable half-built.
    ///
    /// Precondition, unchecked: `width` and `height` are positive.
    pub fn new(width: usize, height: usize) -> Field {
        Field::with_options(&Options {
            width,
            height,
            ..Options::default()
        })
    }

    /// As `new`, honoring the configured iteration limit and worker
    /// count as well as the grid dimensions.
    pub fn with_options(opts: &Options) -> Field {
        let plane = PlaneMapper::new(
            opts.width,
            opts.height,
            PLANE_LEFTLOWER,
            PLANE_RIGHTUPPER,
        );
        let cells = vec![Cell::default(); plane.len()];
        let mut field = Field {
            plane,
            cells,
            c: DEFAULT_CONSTANT,
            limit: opts.max_iterations,
            workers: opts.threads,
            updating: AtomicBool::new(false),
        };
        field.set_constant(DEFAULT_CONSTANT);
        field
    }

    /// Replaces the constant and regenerates every cell before
    /// returning.  The updating flag reads true for the whole pass.
    /// Components of `new_c` are pinned to the clamp bound, so feeding
    /// deltas in here can never walk the constant off the plane.
    ///
    /// Callers watching `is_updating` must not overlap a second call
    /// with a running pass, nor read the grid mid-pass.
    pub fn set_constant(&mut self, new_c: Complex<f64>) {
        self.updating.store(true, Ordering::SeqCst);
        self.c = Complex::new(
            clamp(new_c.re, -CONSTANT_LIMIT, CONSTANT_LIMIT),
            clamp(new_c.im, -CONSTANT_LIMIT, CONSTANT_LIMIT),
        );
        let workers = self.workers;
        self.generate(workers);
        self.updating.store(false, Ordering::SeqCst);
    }

    /// True while a generation pass is overwriting the grid.
    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }

    /// The constant currently parameterizing the set, post-clamp.
    pub fn constant(&self) -> Complex<f64> {
        self.c
    }

    /// Grid width, in cells.
    pub fn width(&self) -> usize {
        self.plane.width()
    }

    /// Grid height, in cells.
    pub fn height(&self) -> usize {
        self.plane.height()
    }

    /// The iteration cap.  Counts equal to this mark interior points.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// A row-major, read-only view of the grid.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Walks the grid in row-major order, yielding each cell alongside
    /// its pixel position.  This is the draw interface: presentation
    /// iterates it and puts `color` at `position`.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (Pixel, &'a Cell)> + 'a {
        iproduct!(0..self.plane.height(), 0..self.plane.width())
            .zip(self.cells.iter())
            .map(|((row, column), cell)| (Pixel(column, row), cell))
    }

    /// One full generation pass.  Carves the rows into one band per
    /// worker, fans the bands out under a crossbeam scope, and joins
    /// before returning, so every write is visible once this call is
    /// done.  Each worker gets a copy of the constant; nothing mutates
    /// shared state mid-pass.
    fn generate(&mut self, workers: usize) {
        let c = self.c;
        let limit = self.limit;
        let plane = &self.plane;
        let width = plane.width();
        let spans = band_spans(plane.height(), workers);
        let cells: &mut [Cell] = &mut self.cells;

        crossbeam::scope(|spawner| {
            let mut rest = cells;
            for span in spans {
                let slice = mem::replace(&mut rest, &mut []);
                let (band, tail) = slice.split_at_mut((span.1 - span.0) * width);
                rest = tail;
                spawner.spawn(move |_| fill_band(band, span.0, plane, c, limit));
            }
        })
        .unwrap();
    }
}

/// Carves `height` rows into contiguous, disjoint bands, one per
/// worker.  Every band takes height / workers rows; the last band also
/// absorbs the remainder.  Worker counts beyond the row count collapse
/// so no band is ever empty.  Returns (first row, one-past-last row)
/// pairs that concatenate to exactly 0..height.
fn band_spans(height: usize, workers: usize) -> Vec<(usize, usize)> {
    let bands = cmp::max(1, cmp::min(workers, height));
    let rows_per_band = height / bands;
    (0..bands)
        .map(|band| {
            let start = band * rows_per_band;
            let end = if band == bands - 1 {
                height
            } else {
                start + rows_per_band
            };
            (start, end)
        })
        .collect()
}

/// Computes every cell of one band.  `first_row` anchors the band
/// within the full grid so each cell maps to its own plane point.
fn fill_band(
    band: &mut [Cell],
    first_row: usize,
    plane: &PlaneMapper,
    c: Complex<f64>,
    limit: usize,
) {
    let width = plane.width();
    for (offset, cell) in band.iter_mut().enumerate() {
        let pixel = Pixel(offset % width, first_row + offset / width);
        let count = escape_time(plane.pixel_to_point(&pixel), c, limit);
        *cell = Cell {
            iterations: count,
            color: colorize(count, limit),
        };
    }
}

/// The number of rounds of z <- z^2 + c a point survives before
/// leaving the escape radius, capped at `limit`.  The orbit starts at
/// the point itself; a point already outside the radius counts zero.
fn escape_time(start: Complex<f64>, c: Complex<f64>, limit: usize) -> usize {
    let mut z = start;
    for round in 0..limit {
        if z.norm_sqr() >= ESCAPE_RADIUS_SQUARED {
            return round;
        }
        z = z * z + c;
    }
    limit
}

/// Maps an escape count to its palette color.  Capped counts are
/// interior points and paint solid black; everything else lands on a
/// banded gradient that starts at cyan for instant escapes and heats
/// up as the count climbs.
fn colorize(count: usize, limit: usize) -> Rgb {
    if count == limit {
        return Rgb(0, 0, 0);
    }
    let hue = (255.0 * (count as f64) / (limit as f64)).round() as u8;
    Rgb(hue, 255 - hue, 255 - hue / 2)
}
