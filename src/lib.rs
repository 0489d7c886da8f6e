//! Interval-based verification of transcendental math kernels.
//!
//! A kernel under test (GPU, SIMD, or anything else) produces an output
//! buffer from an input buffer. `floaty` evaluates the function in `f64`,
//! widens each result into an acceptable [`Floaty`] interval according to
//! the [`PrecisionMode`] and [`PrecisionClass`], and checks every logical
//! lane of the observed buffer against it.

pub mod config;
pub mod error;
pub mod floaty;
pub mod inputs;
pub mod kernel;
pub mod lanes;
pub mod precision;
pub mod reference;
pub mod verify;

pub use config::VerifierConfig;
pub use error::{FloatyError, Result};
pub use floaty::Floaty;
pub use lanes::{ElementWidth, Lane};
pub use precision::{PrecisionClass, PrecisionMode};
pub use reference::FunctionKind;
pub use verify::{LaneFailure, VerificationReport, Verifier};

/// Number of vector groups per generated buffer.
pub const INPUT_SIZE: usize = 1 << 14;
