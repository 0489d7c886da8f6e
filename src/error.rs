//! Error types for floaty verification passes.
//!
//! Numeric values never produce errors: NaN, infinities and out-of-domain
//! inputs all map to a defined interval and a pass/fail outcome. The errors
//! below cover malformed buffers, invalid tolerance configuration, and the
//! single failure signal a harness raises from a failing report.

use std::fmt;

/// Errors that can occur while building or running a verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloatyError {
    /// The input and observed buffers do not hold the same number of slots.
    LengthMismatch {
        /// Number of slots in the input buffer.
        inputs: usize,
        /// Number of slots in the observed buffer.
        observed: usize,
    },
    /// The buffer length is not a whole number of vector groups.
    MisalignedBuffer {
        /// Number of slots in the buffer.
        len: usize,
        /// Physical stride of one group.
        stride: usize,
    },
    /// Tolerance configuration is inconsistent.
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },
    /// A verification pass found at least one failing lane.
    VerificationFailed {
        /// Name of the failing check.
        check: String,
        /// Number of failing lanes.
        failures: usize,
        /// Rendered failure report.
        message: String,
    },
}

impl fmt::Display for FloatyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatyError::LengthMismatch { inputs, observed } => write!(
                f,
                "Buffer length mismatch: {} input slots vs {} observed slots",
                inputs, observed
            ),
            FloatyError::MisalignedBuffer { len, stride } => write!(
                f,
                "Misaligned buffer: {} slots is not a multiple of the group stride {}",
                len, stride
            ),
            FloatyError::InvalidConfig { message } => {
                write!(f, "Invalid verifier configuration: {}", message)
            }
            FloatyError::VerificationFailed {
                check,
                failures,
                message,
            } => write!(
                f,
                "Incorrect output for {} ({} failing lanes):\n{}",
                check, failures, message
            ),
        }
    }
}

impl std::error::Error for FloatyError {}

/// Result type alias for floaty operations.
pub type Result<T> = std::result::Result<T, FloatyError>;

/// Creates a length mismatch error.
pub fn length_mismatch(inputs: usize, observed: usize) -> FloatyError {
    FloatyError::LengthMismatch { inputs, observed }
}

/// Creates a misaligned buffer error.
pub fn misaligned_buffer(len: usize, stride: usize) -> FloatyError {
    FloatyError::MisalignedBuffer { len, stride }
}

/// Creates a configuration error.
pub fn invalid_config(message: impl Into<String>) -> FloatyError {
    FloatyError::InvalidConfig {
        message: message.into(),
    }
}

/// Creates a verification failure error.
pub fn verification_failed(
    check: impl Into<String>,
    failures: usize,
    message: impl Into<String>,
) -> FloatyError {
    FloatyError::VerificationFailed {
        check: check.into(),
        failures,
        message: message.into(),
    }
}
