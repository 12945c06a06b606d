//! # PrimitiveColumn Module - *Fixed-Stride Typed Output Columns*
//!
//! The fixed-width companion to `StringColumn`: lengths, containment
//! booleans, comparison results, and numeric/temporal cast outputs are all
//! wrapped in one of these.
//!
//! ## Overview
//! - Values live in one device buffer at a fixed stride of
//!   `size_of::<T>()`; the optional validity bitmap marks nulls.
//! - A null row's value slot holds `T::default()` and must not be read
//!   without the mask.
//! - Immutable after construction, like every column in this engine.
//! - The `DType` tag usually follows from `T`; timestamp columns reuse
//!   `i64` storage with an explicit tag supplied at construction.

use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

use crate::enums::dtype::DType;
use crate::enums::error::TextcolError;
use crate::structs::bitmask::Bitmask;
use crate::structs::device_buffer::DeviceBuffer;
use crate::traits::print::MAX_PREVIEW;
use crate::traits::type_unions::Element;
use crate::utils::validate_null_mask_len;

/// # PrimitiveColumn
///
/// Nullable, fixed-stride device column of `T`.
///
/// ## Example
/// ```rust
/// use textcol::{Bitmask, PrimitiveColumn};
///
/// let mask = Bitmask::from_bools(&[true, false]).unwrap();
/// let col = PrimitiveColumn::<i32>::from_values("lens", &[3, 0], Some(mask)).unwrap();
/// assert_eq!(col.get(0), Some(3));
/// assert_eq!(col.get(1), None);
/// assert_eq!(col.null_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct PrimitiveColumn<T: Element> {
    name: String,
    dtype: DType,
    values: DeviceBuffer,
    null_mask: Option<Bitmask>,
    null_count: usize,
    _marker: PhantomData<T>,
}

impl<T: Element> PrimitiveColumn<T> {
    /// Wraps a device buffer with `T`'s natural dtype tag.
    pub fn new(
        name: impl Into<String>,
        values: DeviceBuffer,
        null_mask: Option<Bitmask>,
    ) -> Self {
        Self::with_dtype(name, T::DTYPE, values, null_mask)
    }

    /// Wraps a device buffer with an explicit dtype tag whose physical width
    /// must match `T`.
    pub fn with_dtype(
        name: impl Into<String>,
        dtype: DType,
        values: DeviceBuffer,
        null_mask: Option<Bitmask>,
    ) -> Self {
        assert_eq!(
            dtype.fixed_width(),
            Some(size_of::<T>()),
            "dtype {} does not describe {}-byte elements",
            dtype,
            size_of::<T>()
        );
        validate_null_mask_len(values.typed_len::<T>(), &null_mask);
        let null_count = null_mask.as_ref().map_or(0, |m| m.count_zeros());
        PrimitiveColumn {
            name: name.into(),
            dtype,
            values,
            null_mask,
            null_count,
            _marker: PhantomData,
        }
    }

    /// Uploads host values wholesale.
    pub fn from_values(
        name: impl Into<String>,
        values: &[T],
        null_mask: Option<Bitmask>,
    ) -> Result<Self, TextcolError> {
        Ok(Self::new(name, DeviceBuffer::from_slice(values)?, null_mask))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.typed_len::<T>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        self.null_mask.as_ref()
    }

    /// Zero-copy typed view over the value buffer, nulls included.
    #[inline]
    pub fn values(&self) -> &[T] {
        self.values.as_slice::<T>()
    }

    /// The backing device buffer.
    #[inline]
    pub fn buffer(&self) -> &DeviceBuffer {
        &self.values
    }

    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        match &self.null_mask {
            Some(mask) => !mask.get(idx),
            None => false,
        }
    }

    /// The value at `idx`, or `None` when null.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<T> {
        if self.is_null(idx) {
            None
        } else {
            Some(self.values()[idx])
        }
    }

    /// Iterates `Option<T>` per row.
    #[inline]
    pub fn iter_opt(&self) -> impl Iterator<Item = Option<T>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Deep copy into freshly allocated device buffers.
    pub fn copy(&self) -> Result<Self, TextcolError> {
        let mask = match &self.null_mask {
            Some(m) => Some(m.to_owned_copy()?),
            None => None,
        };
        Ok(Self::with_dtype(
            self.name.clone(),
            self.dtype,
            self.values.to_owned_copy()?,
            mask,
        ))
    }
}

/// Logical row equality: equal dtype, length, and `Option<T>` per row.
impl<T: Element> PartialEq for PrimitiveColumn<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dtype == other.dtype
            && self.len() == other.len()
            && self.iter_opt().zip(other.iter_opt()).all(|(a, b)| a == b)
    }
}

impl<T: Element + Display> Display for PrimitiveColumn<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "PrimitiveColumn '{}' [{} rows] (dtype: {}, nulls: {})",
            self.name,
            self.len(),
            self.dtype,
            self.null_count
        )?;
        write!(f, "[")?;
        for i in 0..usize::min(self.len(), MAX_PREVIEW) {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.get(i) {
                Some(v) => write!(f, "{}", v)?,
                None => write!(f, "null")?,
            }
        }
        if self.len() > MAX_PREVIEW {
            write!(f, ", … ({} total)", self.len())?;
        }
        write!(f, "]")
    }
}
