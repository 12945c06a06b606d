//! # StringStorage Module - *Device-Resident Variable-Length String Storage*
//!
//! Stores N variable-length strings in a fixed-stride device memory model:
//! an (N+1)-entry `i32` offset array delimiting each row's byte range, one
//! flat UTF-8 character buffer, and an optional packed validity bitmap.
//!
//! ## Overview
//! - **offsets**: length = `len + 1`; i-th string = `chars[offsets[i]..offsets[i+1]]`
//! - **chars**: concatenated UTF-8 bytes, `offsets[len]` of them
//! - **null_mask** *(optional)*: `Bitmask` where `1 = valid`, `0 = null`
//! - A null row has a zero-length span; it is distinguished from an empty
//!   string solely by the validity bitmap.
//! - Immutable once constructed: every "mutating" primitive returns a fresh
//!   storage built from newly allocated device buffers.
//!
//! ## Primitives
//! The operation set is closed and enumerated here — search (`contains`),
//! transformation (`replace`, `lower`, `upper`, `cat`, `fillna_*`),
//! restructuring (`split`, `extract`, `gather`), ordering (`order`),
//! interchange export (`to_offsets`, `set_null_bitmask`), and the strict
//! numeric/temporal casts with their inverses. There is no dynamic
//! passthrough; anything not listed is a compile-time-visible gap.

use std::fmt::{Display, Formatter};

use crate::enums::error::TextcolError;
use crate::kernels::{cast, search, sort, split, transform};
use crate::structs::bitmask::Bitmask;
use crate::structs::device_buffer::DeviceBuffer;
use crate::traits::print::MAX_PREVIEW;
use crate::traits::type_unions::{Float, Integer, Numeric};
use crate::utils::{packed_byte_len, validate_null_mask_len};

#[cfg(feature = "datetime")]
use crate::enums::dtype::TimeUnit;

/// # StringStorage
///
/// Device-resident representation of N variable-length, nullable strings.
///
/// ## Fields
/// - **Offsets**: prefix sums into `chars`. The i-th string is at
///   `chars[offsets[i]..offsets[i+1]]`.
/// - **Chars**: concatenated UTF-8 bytes for all strings.
/// - **Null mask**: optional bit-packed validity bitmap (1=valid, 0=null).
///
/// ## Invariants
/// `offsets[0] == 0`; offsets are non-decreasing; `chars` holds exactly
/// `offsets[len]` bytes; the mask, when present, has exactly `len` bits.
///
/// ## Example
/// ```rust
/// use textcol::StringStorage;
///
/// let s = StringStorage::from_host(&[Some("alpha"), None, Some("gamma")]).unwrap();
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.null_count(), 1);
/// assert_eq!(s.value(0), Some("alpha"));
/// assert_eq!(s.value(1), None);
/// ```
#[derive(Clone, Debug)]
pub struct StringStorage {
    /// Offsets into the chars buffer (`i32`, len + 1 entries).
    offsets: DeviceBuffer,
    /// Concatenated UTF-8 byte values for all strings.
    chars: DeviceBuffer,
    /// Optional null mask (bit-packed; 1=valid, 0=null).
    null_mask: Option<Bitmask>,
    /// Logical row count.
    len: usize,
    /// Cached count of unset validity bits.
    null_count: usize,
}

impl StringStorage {
    /// Takes ownership of device-resident **offsets**, **chars**, and an
    /// optional null bitmap. The usual invariants must hold (`offsets[0]==0`,
    /// last offset == `chars.byte_len()`, monotonically non-decreasing) and
    /// the character bytes must be valid UTF-8.
    pub fn from_parts(
        offsets: DeviceBuffer,
        chars: DeviceBuffer,
        null_mask: Option<Bitmask>,
    ) -> Self {
        let n_offsets = offsets.typed_len::<i32>();
        assert!(n_offsets >= 1, "offsets must hold at least one entry");
        let len = n_offsets - 1;
        {
            let view = offsets.as_slice::<i32>();
            assert_eq!(view[0], 0, "offsets[0] must be 0");
            assert_eq!(
                view[len] as usize,
                chars.byte_len(),
                "last offset must equal the chars byte length"
            );
            debug_assert!(
                view.windows(2).all(|w| w[0] <= w[1]),
                "offsets must be non-decreasing"
            );
        }
        validate_null_mask_len(len, &null_mask);
        let null_count = null_mask.as_ref().map_or(0, |m| m.count_zeros());
        StringStorage {
            offsets,
            chars,
            null_mask,
            len,
            null_count,
        }
    }

    /// Uploads a host sequence of nullable strings wholesale.
    pub fn from_host<S: AsRef<str>>(rows: &[Option<S>]) -> Result<Self, TextcolError> {
        let mut offsets: Vec<i32> = Vec::with_capacity(rows.len() + 1);
        let mut chars: Vec<u8> = Vec::new();
        let mut any_null = false;

        offsets.push(0);
        for row in rows {
            if let Some(s) = row {
                chars.extend_from_slice(s.as_ref().as_bytes());
            } else {
                any_null = true;
            }
            let end = i32::try_from(chars.len()).map_err(|_| TextcolError::Overflow {
                value: chars.len().to_string(),
                target: "i32",
            })?;
            offsets.push(end);
        }

        let null_mask = if any_null {
            let valid: Vec<bool> = rows.iter().map(|r| r.is_some()).collect();
            Some(Bitmask::from_bools(&valid)?)
        } else {
            None
        };

        Ok(Self::from_parts(
            DeviceBuffer::from_slice(&offsets)?,
            DeviceBuffer::from_slice(&chars)?,
            null_mask,
        ))
    }

    /// Uploads a dense host sequence (no nulls).
    pub fn from_strs(rows: &[&str]) -> Result<Self, TextcolError> {
        let rows: Vec<Option<&str>> = rows.iter().map(|s| Some(*s)).collect();
        Self::from_host(&rows)
    }

    /// Broadcasts one scalar (or null) across `len` rows.
    pub fn from_scalar(value: Option<&str>, len: usize) -> Result<Self, TextcolError> {
        match value {
            Some(s) => {
                let rows: Vec<Option<&str>> = vec![Some(s); len];
                Self::from_host(&rows)
            }
            None => Self::all_null(len),
        }
    }

    /// A storage of `len` null rows.
    pub fn all_null(len: usize) -> Result<Self, TextcolError> {
        let offsets = vec![0i32; len + 1];
        let mask = if len > 0 {
            Some(Bitmask::new_set_all(len, false)?)
        } else {
            None
        };
        Ok(Self::from_parts(
            DeviceBuffer::from_slice(&offsets)?,
            DeviceBuffer::empty(),
            mask,
        ))
    }

    /// Logical row count.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cached count of null rows.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// The validity bitmap, absent when no row is null.
    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        self.null_mask.as_ref()
    }

    /// Offset view (`len + 1` entries).
    #[inline]
    pub fn offsets(&self) -> &[i32] {
        self.offsets.as_slice::<i32>()
    }

    /// Flat character bytes.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        self.chars.as_slice::<u8>()
    }

    /// The backing offsets buffer.
    #[inline]
    pub fn offsets_buffer(&self) -> &DeviceBuffer {
        &self.offsets
    }

    /// The backing character buffer.
    #[inline]
    pub fn chars_buffer(&self) -> &DeviceBuffer {
        &self.chars
    }

    /// Total character bytes across all rows.
    #[inline]
    pub fn total_bytes(&self) -> usize {
        self.chars.byte_len()
    }

    /// Returns true if the value at the given index is null.
    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        match &self.null_mask {
            Some(mask) => !mask.get(idx),
            None => false,
        }
    }

    /// The string at `idx`, or `None` when null.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn value(&self, idx: usize) -> Option<&str> {
        if self.is_null(idx) {
            return None;
        }
        let offsets = self.offsets();
        let start = offsets[idx] as usize;
        let end = offsets[idx + 1] as usize;
        Some(unsafe { std::str::from_utf8_unchecked(&self.chars()[start..end]) })
    }

    /// Raw byte span of row `idx`, ignoring validity.
    #[inline]
    pub fn value_bytes(&self, idx: usize) -> &[u8] {
        let offsets = self.offsets();
        &self.chars()[offsets[idx] as usize..offsets[idx + 1] as usize]
    }

    /// Iterates `Option<&str>` per row.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.len).map(move |i| self.value(i))
    }

    /// Copies every row to the host.
    pub fn to_host(&self) -> Vec<Option<String>> {
        self.iter().map(|v| v.map(str::to_string)).collect()
    }

    /// Deep copy into freshly allocated device buffers.
    pub fn to_owned_copy(&self) -> Result<Self, TextcolError> {
        let mask = match &self.null_mask {
            Some(m) => Some(m.to_owned_copy()?),
            None => None,
        };
        Ok(Self::from_parts(
            self.offsets.to_owned_copy()?,
            self.chars.to_owned_copy()?,
            mask,
        ))
    }

    // ------------------------- device primitives -------------------------

    /// Per-row byte length into a fresh `i32` device array.
    pub fn length(&self) -> Result<DeviceBuffer, TextcolError> {
        search::length_kernel(self)
    }

    /// Per-row substring / pattern containment into a fresh `bool` device
    /// array. Null rows report `false`; the caller re-applies the mask.
    pub fn contains(&self, pattern: &str, is_regex: bool) -> Result<DeviceBuffer, TextcolError> {
        if is_regex {
            search::contains_pattern(self, pattern)
        } else {
            search::contains_literal(self, pattern)
        }
    }

    /// Replaces up to `max_count` leftmost, non-overlapping matches per row;
    /// `-1` (or `0`, matching the upstream engines) means unlimited.
    /// A replaced span is never rescanned.
    pub fn replace(
        &self,
        pattern: &str,
        replacement: &str,
        max_count: i64,
        is_regex: bool,
    ) -> Result<StringStorage, TextcolError> {
        transform::replace_kernel(self, pattern, replacement, max_count, is_regex)
    }

    /// Splits each row around a literal delimiter into one storage per
    /// output column; ragged rows carry null in the missing trailing
    /// columns. `None` delimiter means a single space; `max_splits <= 0`
    /// means unlimited.
    pub fn split(
        &self,
        delimiter: Option<&str>,
        max_splits: i64,
    ) -> Result<Vec<StringStorage>, TextcolError> {
        split::split_kernel(self, delimiter.unwrap_or(" "), max_splits)
    }

    /// Extracts the capturing groups of `pattern` from the first match of
    /// each row: one storage per group, null where the overall match fails.
    pub fn extract(&self, pattern: &str) -> Result<Vec<StringStorage>, TextcolError> {
        split::extract_kernel(self, pattern)
    }

    /// Element-wise concatenation with `other`. A null operand nulls the
    /// result row unless `na_rep` substitutes for it.
    pub fn cat(
        &self,
        other: &StringStorage,
        sep: Option<&str>,
        na_rep: Option<&str>,
    ) -> Result<StringStorage, TextcolError> {
        transform::cat_kernel(self, other, sep.unwrap_or(""), na_rep)
    }

    /// Joins all rows into one host string; null rows are omitted unless
    /// `na_rep` substitutes for them.
    pub fn join_rows(&self, sep: &str, na_rep: Option<&str>) -> String {
        transform::join_rows(self, sep, na_rep)
    }

    /// Simple (ASCII) lowercase mapping; non-locale-aware.
    pub fn lower(&self) -> Result<StringStorage, TextcolError> {
        transform::case_kernel(self, false)
    }

    /// Simple (ASCII) uppercase mapping; non-locale-aware.
    pub fn upper(&self) -> Result<StringStorage, TextcolError> {
        transform::case_kernel(self, true)
    }

    /// Replaces every null row with the scalar `value`; the result has no
    /// nulls.
    pub fn fillna_scalar(&self, value: &str) -> Result<StringStorage, TextcolError> {
        transform::fillna_scalar(self, value)
    }

    /// Replaces every null row with the corresponding row of `other`, which
    /// must be at least as long as `self`.
    pub fn fillna_column(&self, other: &StringStorage) -> Result<StringStorage, TextcolError> {
        transform::fillna_column(self, other)
    }

    /// Gathers rows by index into a new storage; out-of-range indices are a
    /// caller bug and panic.
    pub fn gather(&self, indices: &[i32]) -> Result<StringStorage, TextcolError> {
        transform::gather_kernel(self, indices)
    }

    /// Produces the permutation of row indices that sorts rows
    /// lexicographically by raw bytes. Nulls go to the front when
    /// `nulls_first`, to the back otherwise, regardless of `ascending`.
    pub fn order(&self, ascending: bool, nulls_first: bool) -> Result<DeviceBuffer, TextcolError> {
        sort::order_kernel(self, ascending, nulls_first)
    }

    // ------------------------- interchange export -------------------------

    /// Exports offsets, chars, and validity into caller-provided buffers.
    ///
    /// `dst_chars` must hold `total_bytes()` bytes, `dst_offsets` must hold
    /// `len + 1` entries, and `dst_mask`, when given, must hold the packed
    /// byte length for `len` rows. All-valid bits are written when the
    /// storage has no mask.
    pub fn to_offsets(
        &self,
        dst_chars: &mut [u8],
        dst_offsets: &mut [i32],
        dst_mask: Option<&mut [u8]>,
    ) -> Result<(), TextcolError> {
        if dst_chars.len() != self.total_bytes() {
            return Err(TextcolError::LengthMismatch {
                expected: self.total_bytes(),
                found: dst_chars.len(),
            });
        }
        if dst_offsets.len() != self.len + 1 {
            return Err(TextcolError::LengthMismatch {
                expected: self.len + 1,
                found: dst_offsets.len(),
            });
        }
        dst_chars.copy_from_slice(self.chars());
        dst_offsets.copy_from_slice(self.offsets());
        if let Some(dst_mask) = dst_mask {
            self.set_null_bitmask(dst_mask)?;
        }
        Ok(())
    }

    /// Exports the validity bitmap into a caller-provided packed buffer;
    /// all bits are set when the storage has no mask.
    pub fn set_null_bitmask(&self, dst: &mut [u8]) -> Result<(), TextcolError> {
        let needed = packed_byte_len(self.len);
        if dst.len() != needed {
            return Err(TextcolError::LengthMismatch {
                expected: needed,
                found: dst.len(),
            });
        }
        match &self.null_mask {
            Some(mask) => dst.copy_from_slice(mask.as_bytes()),
            None => {
                dst.fill(0xFF);
                // trailing padding stays zeroed
                if self.len & 7 != 0 {
                    if let Some(last) = dst.last_mut() {
                        *last = (1u8 << (self.len & 7)) - 1;
                    }
                }
            }
        }
        Ok(())
    }

    // ------------------------- numeric casts -------------------------

    /// Parses every non-null row as `T` into a fresh device array; any
    /// unparsable non-null row fails the whole cast.
    pub fn to_numeric<T: Numeric>(&self) -> Result<DeviceBuffer, TextcolError> {
        cast::parse_numeric::<T>(self)
    }

    /// Parses every non-null row as `"true"` / `"false"`.
    pub fn to_bool(&self) -> Result<DeviceBuffer, TextcolError> {
        cast::parse_bool(self)
    }

    /// Parses every non-null row as a timestamp into 64-bit epoch ticks at
    /// `unit`.
    #[cfg(feature = "datetime")]
    pub fn to_timestamp(&self, unit: TimeUnit) -> Result<DeviceBuffer, TextcolError> {
        cast::parse_timestamp(self, unit)
    }

    /// Formats integers row-wise into a new storage, preserving nulls.
    pub fn from_integers<T: Integer>(
        values: &[T],
        null_mask: Option<&Bitmask>,
    ) -> Result<Self, TextcolError> {
        cast::format_integers(values, null_mask)
    }

    /// Formats floats row-wise into a new storage, preserving nulls.
    pub fn from_floats<T: Float>(
        values: &[T],
        null_mask: Option<&Bitmask>,
    ) -> Result<Self, TextcolError> {
        cast::format_floats(values, null_mask)
    }

    /// Formats booleans row-wise into a new storage, preserving nulls.
    pub fn from_booleans(
        values: &[bool],
        null_mask: Option<&Bitmask>,
    ) -> Result<Self, TextcolError> {
        cast::format_booleans(values, null_mask)
    }

    /// Formats epoch ticks at `unit` row-wise into a new storage, preserving
    /// nulls.
    #[cfg(feature = "datetime")]
    pub fn from_timestamps(
        values: &[i64],
        unit: TimeUnit,
        null_mask: Option<&Bitmask>,
    ) -> Result<Self, TextcolError> {
        cast::format_timestamps(values, unit, null_mask)
    }
}

/// Logical row equality: equal length and equal `Option<&str>` per row.
impl PartialEq for StringStorage {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Display for StringStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "StringStorage [{} rows] (bytes: {}, nulls: {})",
            self.len,
            self.total_bytes(),
            self.null_count
        )?;
        write!(f, "[")?;
        for i in 0..usize::min(self.len, MAX_PREVIEW) {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.value(i) {
                Some(s) => write!(f, "\"{}\"", s)?,
                None => write!(f, "null")?,
            }
        }
        if self.len > MAX_PREVIEW {
            write!(f, ", … ({} total)", self.len)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_layout() {
        let s = StringStorage::from_host(&[Some("a"), Some("bc"), Some("d")]).unwrap();
        assert_eq!(s.offsets(), &[0, 1, 3, 4]);
        assert_eq!(s.chars(), b"abcd");
        assert!(s.null_mask().is_none());
        assert_eq!(s.null_count(), 0);
    }

    #[test]
    fn test_invariants_hold() {
        let s = StringStorage::from_host(&[Some("xy"), None, Some(""), Some("z")]).unwrap();
        let offsets = s.offsets();
        assert_eq!(offsets[0], 0);
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(offsets[s.len()] as usize, s.chars().len());
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_null_vs_empty_string() {
        let s = StringStorage::from_host(&[Some(""), None]).unwrap();
        assert_eq!(s.value(0), Some(""));
        assert_eq!(s.value(1), None);
        // both spans are zero-length; only the mask distinguishes them
        assert_eq!(s.offsets(), &[0, 0, 0]);
        assert_eq!(s.null_count(), 1);
    }

    #[test]
    fn test_from_scalar_broadcast() {
        let s = StringStorage::from_scalar(Some("x"), 3).unwrap();
        assert_eq!(s.to_host(), vec![Some("x".into()), Some("x".into()), Some("x".into())]);

        let n = StringStorage::from_scalar(None, 2).unwrap();
        assert_eq!(n.null_count(), 2);
    }

    #[test]
    fn test_all_null() {
        let s = StringStorage::all_null(3).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.null_count(), 3);
        assert_eq!(s.total_bytes(), 0);
    }

    #[test]
    fn test_to_offsets_export() {
        let s = StringStorage::from_host(&[Some("ab"), None, Some("c")]).unwrap();
        let mut chars = vec![0u8; s.total_bytes()];
        let mut offsets = vec![0i32; s.len() + 1];
        let mut mask = vec![0u8; 1];
        s.to_offsets(&mut chars, &mut offsets, Some(&mut mask)).unwrap();
        assert_eq!(&chars, b"abc");
        assert_eq!(offsets, vec![0, 2, 2, 3]);
        assert_eq!(mask, vec![0b0000_0101]);
    }

    #[test]
    fn test_to_offsets_rejects_short_buffers() {
        let s = StringStorage::from_strs(&["ab"]).unwrap();
        let mut chars = vec![0u8; 1];
        let mut offsets = vec![0i32; 2];
        assert!(matches!(
            s.to_offsets(&mut chars, &mut offsets, None),
            Err(TextcolError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_set_null_bitmask_all_valid() {
        let s = StringStorage::from_strs(&["a", "b", "c"]).unwrap();
        let mut mask = vec![0u8; 1];
        s.set_null_bitmask(&mut mask).unwrap();
        assert_eq!(mask, vec![0b0000_0111]);
    }

    #[test]
    fn test_logical_equality_ignores_mask_representation() {
        let dense = StringStorage::from_strs(&["a", "b"]).unwrap();
        let parts = StringStorage::from_parts(
            DeviceBuffer::from_slice(&[0i32, 1, 2]).unwrap(),
            DeviceBuffer::from_slice(b"ab".as_slice()).unwrap(),
            Some(Bitmask::new_set_all(2, true).unwrap()),
        );
        assert_eq!(dense, parts);
    }

    #[test]
    fn test_deep_copy() {
        let s = StringStorage::from_host(&[Some("q"), None]).unwrap();
        let copy = s.to_owned_copy().unwrap();
        assert_eq!(s, copy);
        assert_ne!(
            s.chars_buffer().as_slice::<u8>().as_ptr(),
            copy.chars_buffer().as_slice::<u8>().as_ptr()
        );
    }
}
