//! The viewer's tunables, gathered in one place with their defaults.

extern crate num_cpus;

use std::time::Duration;

/// Everything adjustable about a viewing session.  The `julia` binary
/// fills this from its command line; every field falls back to the
/// default below when left alone.
#[derive(Clone, Debug)]
pub struct Options {
    /// Width of the cell grid, and of the window, in pixels.
    pub width: usize,
    /// Height of the cell grid, and of the window, in pixels.
    pub height: usize,
    /// The escape-time iteration cap.  Points still bounded after this
    /// many rounds count as members of the set and paint black.
    pub max_iterations: usize,
    /// How far one held arrow key nudges a component of the constant,
    /// per accepted update.
    pub step_delta: f64,
    /// Minimum interval between two accepted constant updates.  Keeps
    /// a held key from flooding the field with regeneration passes.
    pub input_delay: Duration,
    /// Worker threads per generation pass.  One band of rows each.
    pub threads: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            width: 1920,
            height: 1080,
            max_iterations: 20,
            step_delta: 0.01,
            input_delay: Duration::from_millis(100),
            threads: num_cpus::get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!((opts.width, opts.height), (1920, 1080));
        assert_eq!(opts.max_iterations, 20);
        assert_eq!(opts.step_delta, 0.01);
        assert_eq!(opts.input_delay, Duration::from_millis(100));
        // num_cpus never reports zero, so a pass always has a worker.
        assert!(opts.threads >= 1);
    }
}
