//! Error taxonomy (spec §7, §10.1).
//!
//! The teacher's `error.rs` is a hand-written four-variant enum with a manual
//! `Display`/`Error` impl. The spec's taxonomy needs structured fields (out-of-bounds
//! field name/value/range, solver context, block-wrapping) that don't fit that shape
//! cleanly, so this core derives with `thiserror` the way the rest of the example
//! corpus does for comparable error enums.

use thiserror::Error;

/// Errors raised by [`crate::solver::BrentSolver`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SolverError {
    #[error(
        "could not bracket a root after {attempts} widening attempts (last bracket [{a}, {b}])"
    )]
    NotBracketed { a: f64, b: f64, attempts: u32 },

    #[error(
        "Brent iteration did not converge within {max_iter} iterations (last estimate {x}, residual {residual})"
    )]
    NotConverged {
        x: f64,
        residual: f64,
        max_iter: usize,
    },
}

/// Crate-wide error type returned by fallible constructors and process blocks.
#[derive(Debug, Error)]
pub enum PsychroError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("{field} = {value} is out of bounds [{min}, {max}]")]
    ArgumentOutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("incompatible state: {0}")]
    IncompatibleState(String),

    #[error("numerical error: {0}")]
    Numerical(String),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("process '{process}' failed: {source}")]
    Process {
        process: &'static str,
        #[source]
        source: Box<PsychroError>,
    },
}

impl PsychroError {
    /// Out-of-bounds helper — keeps call sites at fluid/flow constructors terse.
    pub fn out_of_bounds(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        PsychroError::ArgumentOutOfBounds {
            field,
            value,
            min,
            max,
        }
    }

    /// Wraps `self` with the name of the process block that encountered it, per the
    /// spec §7 propagation rule ("Blocks... wrap [solver errors] with block context and
    /// re-raise").
    pub fn in_process(self, process: &'static str) -> Self {
        PsychroError::Process {
            process,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PsychroError>;
