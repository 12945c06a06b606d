//! # Error Module - Custom *Textcol* Error Type
//!
//! Defines the unified error type for Textcol.
//!
//! ## Features
//! - Covers unsupported options and operations, operand type mismatches,
//! strict cast failures, device allocation exhaustion, pattern compilation,
//! and row-count mismatches.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.

use std::error::Error;
use std::fmt;

/// Catch all error type for `Textcol`
#[derive(Debug, PartialEq)]
pub enum TextcolError {
    /// A non-default value was passed for a parameter this revision does not
    /// implement. Raised before any device work is dispatched, so callers can
    /// probe capability by catching it.
    UnsupportedOption {
        param: &'static str,
    },
    /// An operand of the wrong kind for the requested operation.
    TypeMismatch {
        from: &'static str,
        to: &'static str,
        message: Option<String>,
    },
    /// A structurally valid operation that is not implemented for this
    /// column kind or arity.
    UnsupportedOperation {
        op: String,
        lhs: &'static str,
        rhs: &'static str,
    },
    /// A non-null row could not be converted to the requested type during a
    /// cast. Fails the whole cast; there is no partial output.
    ParseFailure {
        row: usize,
        value: String,
        target: &'static str,
    },
    /// Device memory exhausted. Propagated verbatim; retry policy belongs to
    /// the caller.
    AllocationFailure {
        bytes: usize,
    },
    /// Element-wise operands with differing row counts.
    LengthMismatch {
        expected: usize,
        found: usize,
    },
    /// A value does not fit the target representation.
    Overflow {
        value: String,
        target: &'static str,
    },
    /// The pattern engine rejected the supplied pattern.
    InvalidPattern {
        message: String,
    },
}

impl fmt::Display for TextcolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextcolError::UnsupportedOption { param } => {
                write!(f, "`{}` parameter is not yet supported.", param)
            }
            TextcolError::TypeMismatch { from, to, message } => {
                if let Some(msg) = message {
                    write!(f, "Type mismatch: cannot use '{}' as '{}': {}", from, to, msg)
                } else {
                    write!(f, "Type mismatch: cannot use '{}' as '{}'.", from, to)
                }
            }
            TextcolError::UnsupportedOperation { op, lhs, rhs } => {
                write!(
                    f,
                    "'{}' operator not supported between {} and {}.",
                    op, lhs, rhs
                )
            }
            TextcolError::ParseFailure { row, value, target } => {
                write!(
                    f,
                    "Parse failure: row {} value '{}' cannot be converted to '{}'.",
                    row, value, target
                )
            }
            TextcolError::AllocationFailure { bytes } => {
                write!(f, "Device allocation of {} bytes failed.", bytes)
            }
            TextcolError::LengthMismatch { expected, found } => {
                write!(
                    f,
                    "Row count mismatch: expected {}, found {}.",
                    expected, found
                )
            }
            TextcolError::Overflow { value, target } => {
                write!(
                    f,
                    "Overflow: value '{}' cannot be represented in type '{}'.",
                    value, target
                )
            }
            TextcolError::InvalidPattern { message } => {
                write!(f, "Invalid pattern: {}", message)
            }
        }
    }
}

impl Error for TextcolError {}
