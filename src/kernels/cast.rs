//! Conversion kernels between string rows and fixed-stride values.
//!
//! Parsing is strict: a non-null row that fails to parse fails the whole
//! cast with `ParseFailure` naming the row — there is no partial output and
//! no silent null. Null rows are skipped; their output slot holds the type
//! default and stays masked.
//!
//! Formatting (the inverse direction) renders every non-null row and
//! preserves the mask unchanged.

use std::any::type_name;

use num_traits::NumCast;
use rayon::prelude::*;

use crate::enums::error::TextcolError;
use crate::structs::bitmask::Bitmask;
use crate::structs::device_buffer::DeviceBuffer;
use crate::structs::string_storage::StringStorage;
use crate::traits::type_unions::{Float, Integer, Numeric};

#[cfg(feature = "datetime")]
use crate::enums::dtype::TimeUnit;
#[cfg(feature = "datetime")]
use crate::utils::{format_timestamp_nanos, parse_timestamp_nanos};

/// Parses every non-null row as `T`.
pub fn parse_numeric<T: Numeric>(storage: &StringStorage) -> Result<DeviceBuffer, TextcolError> {
    let values: Vec<T> = (0..storage.len())
        .into_par_iter()
        .map(|i| match storage.value(i) {
            None => Ok(T::default()),
            Some(s) => s.trim().parse::<T>().map_err(|_| TextcolError::ParseFailure {
                row: i,
                value: s.to_string(),
                target: type_name::<T>(),
            }),
        })
        .collect::<Result<Vec<T>, TextcolError>>()?;
    DeviceBuffer::from_slice(&values)
}

/// Narrows already-parsed 32-bit intermediates into a sub-32-bit integer
/// type, failing on any non-null out-of-range row.
pub fn narrow_integers<T: Integer>(
    values: &[i32],
    null_mask: Option<&Bitmask>,
) -> Result<DeviceBuffer, TextcolError> {
    let narrowed: Vec<T> = values
        .par_iter()
        .enumerate()
        .map(|(i, &v)| {
            if !null_mask.is_none_or(|m| m.get(i)) {
                return Ok(T::default());
            }
            <T as NumCast>::from(v).ok_or(TextcolError::ParseFailure {
                row: i,
                value: v.to_string(),
                target: type_name::<T>(),
            })
        })
        .collect::<Result<Vec<T>, TextcolError>>()?;
    DeviceBuffer::from_slice(&narrowed)
}

/// Parses every non-null row as `"true"` / `"false"`.
pub fn parse_bool(storage: &StringStorage) -> Result<DeviceBuffer, TextcolError> {
    let values: Vec<bool> = (0..storage.len())
        .into_par_iter()
        .map(|i| match storage.value(i) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(s) => Err(TextcolError::ParseFailure {
                row: i,
                value: s.to_string(),
                target: "bool",
            }),
        })
        .collect::<Result<Vec<bool>, TextcolError>>()?;
    DeviceBuffer::from_slice(&values)
}

/// Parses every non-null row as a timestamp into epoch ticks at `unit`.
#[cfg(feature = "datetime")]
pub fn parse_timestamp(
    storage: &StringStorage,
    unit: TimeUnit,
) -> Result<DeviceBuffer, TextcolError> {
    let per_tick = unit.nanos_per_tick();
    let values: Vec<i64> = (0..storage.len())
        .into_par_iter()
        .map(|i| match storage.value(i) {
            None => Ok(0i64),
            Some(s) => {
                let nanos = parse_timestamp_nanos(s).ok_or_else(|| TextcolError::ParseFailure {
                    row: i,
                    value: s.to_string(),
                    target: "timestamp",
                })?;
                i64::try_from(nanos / per_tick).map_err(|_| TextcolError::ParseFailure {
                    row: i,
                    value: s.to_string(),
                    target: "timestamp",
                })
            }
        })
        .collect::<Result<Vec<i64>, TextcolError>>()?;
    DeviceBuffer::from_slice(&values)
}

/// Formats integers row-wise, preserving nulls.
pub fn format_integers<T: Integer>(
    values: &[T],
    null_mask: Option<&Bitmask>,
) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<String>> = values
        .par_iter()
        .enumerate()
        .map(|(i, v)| {
            if null_mask.is_none_or(|m| m.get(i)) {
                Some(v.to_string())
            } else {
                None
            }
        })
        .collect();
    StringStorage::from_host(&rows)
}

/// Formats floats row-wise with the shortest round-trippable rendering,
/// preserving nulls.
pub fn format_floats<T: Float>(
    values: &[T],
    null_mask: Option<&Bitmask>,
) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<String>> = values
        .par_iter()
        .enumerate()
        .map(|(i, &v)| {
            if null_mask.is_none_or(|m| m.get(i)) {
                let mut buf = ryu::Buffer::new();
                Some(buf.format(v).to_string())
            } else {
                None
            }
        })
        .collect();
    StringStorage::from_host(&rows)
}

/// Formats booleans row-wise, preserving nulls.
pub fn format_booleans(
    values: &[bool],
    null_mask: Option<&Bitmask>,
) -> Result<StringStorage, TextcolError> {
    let rows: Vec<Option<&str>> = values
        .par_iter()
        .enumerate()
        .map(|(i, &v)| {
            if null_mask.is_none_or(|m| m.get(i)) {
                Some(if v { "true" } else { "false" })
            } else {
                None
            }
        })
        .collect();
    StringStorage::from_host(&rows)
}

/// Formats epoch ticks at `unit` as RFC3339 rows, preserving nulls.
#[cfg(feature = "datetime")]
pub fn format_timestamps(
    values: &[i64],
    unit: TimeUnit,
    null_mask: Option<&Bitmask>,
) -> Result<StringStorage, TextcolError> {
    let per_tick = unit.nanos_per_tick();
    let rows: Vec<Option<String>> = values
        .par_iter()
        .enumerate()
        .map(|(i, &v)| {
            if !null_mask.is_none_or(|m| m.get(i)) {
                return Ok(None);
            }
            let nanos = v as i128 * per_tick;
            match format_timestamp_nanos(nanos) {
                Some(s) => Ok(Some(s)),
                None => Err(TextcolError::Overflow {
                    value: v.to_string(),
                    target: "timestamp",
                }),
            }
        })
        .collect::<Result<Vec<Option<String>>, TextcolError>>()?;
    StringStorage::from_host(&rows)
}
