//! # DType Module - *Column type tagging for self-documenting data*
//!
//! Unified representations of the data types this engine produces.
//!
//! ## Overview
//! - Covers the string column itself, the fixed-stride outputs of its
//!   kernels (lengths, comparison booleans, numeric casts), and optional
//!   timestamp types with explicit units.
//! - A single discriminant used across the crate for column typing,
//!   serialization headers, and the interchange format.
//! - `Null` tags the degenerate all-null payload used by the interchange
//!   format when a column carries no values at all.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// # TimeUnit
///
/// Resolution of epoch ticks carried by a timestamp column.
///
/// ## Behaviour
/// - The unit is declared by the target `DType::Timestamp` and stored on the
/// produced column, so tick values are meaningless without it.
/// - String parsing and formatting honour the unit; there is no implicit
/// rescaling between columns of different units.
#[cfg(feature = "datetime")]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum TimeUnit {
    /// Seconds since the Unix epoch.
    #[default]
    Seconds,
    /// Milliseconds since the Unix epoch.
    Milliseconds,
    /// Microseconds since the Unix epoch.
    Microseconds,
    /// Nanoseconds since the Unix epoch.
    Nanoseconds,
}

#[cfg(feature = "datetime")]
impl TimeUnit {
    /// Nanoseconds spanned by one tick at this unit.
    #[inline]
    pub fn nanos_per_tick(&self) -> i128 {
        match self {
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Nanoseconds => 1,
        }
    }
}

#[cfg(feature = "datetime")]
impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TimeUnit::Seconds => f.write_str("s"),
            TimeUnit::Milliseconds => f.write_str("ms"),
            TimeUnit::Microseconds => f.write_str("us"),
            TimeUnit::Nanoseconds => f.write_str("ns"),
        }
    }
}

/// # DType
///
/// Logical type tag for every column kind this engine constructs.
///
/// ## Purpose
/// - Drives dtype-directed casting (`astype`) and tags serialization
///   headers so a column can be reconstructed without sender context.
/// - For timestamps the physical storage is always 64-bit epoch ticks; the
///   variant carries the declared unit.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum DType {
    /// Degenerate all-null payload with no value buffers.
    Null,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    #[cfg(feature = "datetime")]
    Timestamp(TimeUnit),
    /// Variable-length UTF-8 string.
    Str,
}

impl DType {
    /// Fixed element width in bytes, or `None` for variable-length and null
    /// payloads.
    #[inline]
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            DType::Null | DType::Str => None,
            DType::Bool | DType::Int8 => Some(1),
            DType::Int16 => Some(2),
            DType::Int32 | DType::Float32 => Some(4),
            DType::Int64 | DType::Float64 => Some(8),
            #[cfg(feature = "datetime")]
            DType::Timestamp(_) => Some(8),
        }
    }

    /// True for the integer variants.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64
        )
    }

    /// True for the float variants.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DType::Null => f.write_str("null"),
            DType::Bool => f.write_str("bool"),
            DType::Int8 => f.write_str("int8"),
            DType::Int16 => f.write_str("int16"),
            DType::Int32 => f.write_str("int32"),
            DType::Int64 => f.write_str("int64"),
            DType::Float32 => f.write_str("float32"),
            DType::Float64 => f.write_str("float64"),
            #[cfg(feature = "datetime")]
            DType::Timestamp(unit) => write!(f, "timestamp[{}]", unit),
            DType::Str => f.write_str("str"),
        }
    }
}
