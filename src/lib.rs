#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set viewer
//!
//! A Julia set is the Mandelbrot's sibling.  Both repeatedly square a
//! complex number and add a constant, watching how quickly the result
//! runs off to infinity, but they cast the two numbers in opposite
//! roles.  The Mandelbrot varies the constant per-pixel and always
//! starts the orbit at zero; a Julia set fixes one constant for the
//! whole image and starts each orbit at the pixel's own coordinate on
//! the plane.  Every choice of constant therefore yields a different
//! Julia set, and sliding the constant around even slightly makes the
//! whole image bloom, shatter, or curl in on itself.
//!
//! That sliding is the point of this crate.  The field module computes
//! the escape velocity of every cell of a fixed grid, in parallel
//! bands, each time the constant moves; the `julia` binary puts the
//! grid in a window and lets the arrow keys do the moving.

extern crate crossbeam;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod field;
pub mod options;
pub mod planes;

pub use field::{Cell, Field, Rgb, CONSTANT_LIMIT, DEFAULT_CONSTANT};
pub use options::Options;
pub use planes::{Pixel, PlaneMapper};
