//! # Interchange Module - *Zero-Copy Columnar Export/Import*
//!
//! The buffer-level representation used to hand a column to or from an
//! external columnar system without reparsing strings: a packed validity
//! bitmap (LSB-first, 1=valid), an `i32` offsets array of length N+1, and a
//! flat byte buffer of length `offsets[N]`.
//!
//! Export is zero-copy — the produced [`ColumnBuffers`] shares the column's
//! device buffers by reference count. An all-null column exports as a
//! degenerate null-typed payload with no string buffers at all, and imports
//! back as an all-null column.

use crate::enums::dtype::DType;
use crate::enums::error::TextcolError;
use crate::structs::bitmask::Bitmask;
use crate::structs::device_buffer::DeviceBuffer;
use crate::structs::string_column::StringColumn;
use crate::structs::string_storage::StringStorage;

/// # ColumnBuffers
///
/// The three-buffer interchange layout.
///
/// ## Fields
/// - `dtype`: `Str` for a regular column, `Null` for the degenerate all-null
///   payload (which carries no value buffers).
/// - `validity`: packed bitmap, absent when every row is valid — or when the
///   payload is null-typed, where `null_count == row_count` says it all.
/// - `offsets` / `chars`: the string layout buffers, shared zero-copy.
#[derive(Debug, Clone)]
pub struct ColumnBuffers {
    pub dtype: DType,
    pub row_count: usize,
    pub null_count: usize,
    pub validity: Option<Bitmask>,
    pub offsets: Option<DeviceBuffer>,
    pub chars: Option<DeviceBuffer>,
}

impl ColumnBuffers {
    /// True for the degenerate all-null payload.
    #[inline]
    pub fn is_null_typed(&self) -> bool {
        matches!(self.dtype, DType::Null)
    }
}

impl StringColumn {
    /// Exports the column's buffers without copying. An all-null column
    /// becomes a null-typed payload with zero value buffers.
    pub fn to_interchange(&self) -> ColumnBuffers {
        if self.len() > 0 && self.null_count() == self.len() {
            return ColumnBuffers {
                dtype: DType::Null,
                row_count: self.len(),
                null_count: self.null_count(),
                validity: None,
                offsets: None,
                chars: None,
            };
        }
        ColumnBuffers {
            dtype: DType::Str,
            row_count: self.len(),
            null_count: self.null_count(),
            validity: self.mask().cloned(),
            offsets: Some(self.storage().offsets_buffer().clone()),
            chars: Some(self.storage().chars_buffer().clone()),
        }
    }

    /// Reconstructs a column from interchange buffers. String payloads adopt
    /// the buffers zero-copy; null payloads rebuild the all-null layout.
    pub fn from_interchange(
        name: impl Into<String>,
        buffers: ColumnBuffers,
    ) -> Result<StringColumn, TextcolError> {
        match buffers.dtype {
            DType::Null => Ok(StringColumn::new(
                name,
                StringStorage::all_null(buffers.row_count)?,
            )),
            DType::Str => {
                let offsets = buffers.offsets.ok_or(TextcolError::TypeMismatch {
                    from: "interchange",
                    to: "str",
                    message: Some("string payload is missing its offsets buffer".to_string()),
                })?;
                let chars = buffers.chars.ok_or(TextcolError::TypeMismatch {
                    from: "interchange",
                    to: "str",
                    message: Some("string payload is missing its chars buffer".to_string()),
                })?;
                let n_offsets = offsets.typed_len::<i32>();
                if n_offsets != buffers.row_count + 1 {
                    return Err(TextcolError::LengthMismatch {
                        expected: buffers.row_count + 1,
                        found: n_offsets,
                    });
                }
                Ok(StringColumn::new(
                    name,
                    StringStorage::from_parts(offsets, chars, buffers.validity),
                ))
            }
            other => Err(TextcolError::TypeMismatch {
                from: "interchange",
                to: "str",
                message: Some(format!("unsupported interchange dtype {}", other)),
            }),
        }
    }
}
