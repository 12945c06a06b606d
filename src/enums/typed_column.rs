//! # **TypedColumn Module** - *High-Level Column Type for Unified Dispatch*
//!
//! TypedColumn unifies the string column and every fixed-stride column this
//! engine produces into a single enum, so dtype-driven operations
//! (`astype`, inverse casts, binary operators) can return one type and
//! callers can match on what they received.

use std::fmt::{Display, Formatter};

use crate::enums::dtype::DType;
use crate::structs::bitmask::Bitmask;
use crate::structs::primitive_column::PrimitiveColumn;
use crate::structs::string_column::StringColumn;

/// # TypedColumn
///
/// Unified column container.
///
/// ## Purpose
/// The return type of dtype-directed casting: `astype(DType::Int32)` hands
/// back `TypedColumn::Int32(..)`, and so on. Sub-32-bit integer variants
/// exist because string parsing narrows through a 32-bit intermediate.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedColumn {
    Int8(PrimitiveColumn<i8>),
    Int16(PrimitiveColumn<i16>),
    Int32(PrimitiveColumn<i32>),
    Int64(PrimitiveColumn<i64>),
    Float32(PrimitiveColumn<f32>),
    Float64(PrimitiveColumn<f64>),
    Bool(PrimitiveColumn<bool>),
    /// Epoch ticks at the unit declared by the column's dtype tag.
    #[cfg(feature = "datetime")]
    Timestamp(PrimitiveColumn<i64>),
    Str(StringColumn),
}

impl TypedColumn {
    /// Logical row count.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            TypedColumn::Int8(c) => c.len(),
            TypedColumn::Int16(c) => c.len(),
            TypedColumn::Int32(c) => c.len(),
            TypedColumn::Int64(c) => c.len(),
            TypedColumn::Float32(c) => c.len(),
            TypedColumn::Float64(c) => c.len(),
            TypedColumn::Bool(c) => c.len(),
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => c.len(),
            TypedColumn::Str(c) => c.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached null count.
    #[inline]
    pub fn null_count(&self) -> usize {
        match self {
            TypedColumn::Int8(c) => c.null_count(),
            TypedColumn::Int16(c) => c.null_count(),
            TypedColumn::Int32(c) => c.null_count(),
            TypedColumn::Int64(c) => c.null_count(),
            TypedColumn::Float32(c) => c.null_count(),
            TypedColumn::Float64(c) => c.null_count(),
            TypedColumn::Bool(c) => c.null_count(),
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => c.null_count(),
            TypedColumn::Str(c) => c.null_count(),
        }
    }

    /// The column's dtype tag.
    #[inline]
    pub fn dtype(&self) -> DType {
        match self {
            TypedColumn::Int8(c) => c.dtype(),
            TypedColumn::Int16(c) => c.dtype(),
            TypedColumn::Int32(c) => c.dtype(),
            TypedColumn::Int64(c) => c.dtype(),
            TypedColumn::Float32(c) => c.dtype(),
            TypedColumn::Float64(c) => c.dtype(),
            TypedColumn::Bool(c) => c.dtype(),
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => c.dtype(),
            TypedColumn::Str(_) => DType::Str,
        }
    }

    /// The column name.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            TypedColumn::Int8(c) => c.name(),
            TypedColumn::Int16(c) => c.name(),
            TypedColumn::Int32(c) => c.name(),
            TypedColumn::Int64(c) => c.name(),
            TypedColumn::Float32(c) => c.name(),
            TypedColumn::Float64(c) => c.name(),
            TypedColumn::Bool(c) => c.name(),
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => c.name(),
            TypedColumn::Str(c) => c.name(),
        }
    }

    /// The validity bitmap, absent when no row is null.
    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        match self {
            TypedColumn::Int8(c) => c.null_mask(),
            TypedColumn::Int16(c) => c.null_mask(),
            TypedColumn::Int32(c) => c.null_mask(),
            TypedColumn::Int64(c) => c.null_mask(),
            TypedColumn::Float32(c) => c.null_mask(),
            TypedColumn::Float64(c) => c.null_mask(),
            TypedColumn::Bool(c) => c.null_mask(),
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => c.null_mask(),
            TypedColumn::Str(c) => c.mask(),
        }
    }

    /// Static operand-kind name used by operator error messages.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypedColumn::Int8(_) => "int8",
            TypedColumn::Int16(_) => "int16",
            TypedColumn::Int32(_) => "int32",
            TypedColumn::Int64(_) => "int64",
            TypedColumn::Float32(_) => "float32",
            TypedColumn::Float64(_) => "float64",
            TypedColumn::Bool(_) => "bool",
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(_) => "timestamp",
            TypedColumn::Str(_) => "str",
        }
    }

    /// Borrow the string variant, if that is what this is.
    #[inline]
    pub fn as_str_column(&self) -> Option<&StringColumn> {
        match self {
            TypedColumn::Str(c) => Some(c),
            _ => None,
        }
    }
}

impl Display for TypedColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypedColumn::Int8(c) => Display::fmt(c, f),
            TypedColumn::Int16(c) => Display::fmt(c, f),
            TypedColumn::Int32(c) => Display::fmt(c, f),
            TypedColumn::Int64(c) => Display::fmt(c, f),
            TypedColumn::Float32(c) => Display::fmt(c, f),
            TypedColumn::Float64(c) => Display::fmt(c, f),
            TypedColumn::Bool(c) => Display::fmt(c, f),
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => Display::fmt(c, f),
            TypedColumn::Str(c) => Display::fmt(c, f),
        }
    }
}
