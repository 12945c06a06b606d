//! Core `Column` trait: the capability set the owning row-container
//! consumes from every column variant, string or fixed-stride.

use crate::enums::dtype::DType;
use crate::enums::typed_column::TypedColumn;
use crate::structs::bitmask::Bitmask;
use crate::structs::primitive_column::PrimitiveColumn;
use crate::structs::string_column::StringColumn;
use crate::traits::type_unions::Element;

/// Column is implemented by every column variant.
///
/// ### Purpose
/// - Ensures interface consistency across `StringColumn`,
/// `PrimitiveColumn<T>`, and the `TypedColumn` dispatch enum, so a
/// row-container can hold heterogeneous columns behind one contract.
/// - Null handling is uniform: `is_null` consults the validity bitmap and an
/// absent bitmap means all-valid.
pub trait Column {
    /// Returns the number of rows in the column.
    fn len(&self) -> usize;

    /// Returns true if the column is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cached number of nulls.
    fn null_count(&self) -> usize;

    /// Returns the column's dtype tag.
    fn dtype(&self) -> DType;

    /// Returns the column's name.
    fn name(&self) -> &str;

    /// Returns a reference to the optional validity bitmap.
    fn validity(&self) -> Option<&Bitmask>;

    /// Returns true if the value at the given index is null.
    #[inline]
    fn is_null(&self, idx: usize) -> bool {
        match self.validity() {
            Some(mask) => !mask.get(idx),
            None => false,
        }
    }

    /// Checks if the column carries a validity bitmap.
    #[inline]
    fn is_nullable(&self) -> bool {
        self.validity().is_some()
    }
}

impl Column for StringColumn {
    fn len(&self) -> usize {
        StringColumn::len(self)
    }

    fn null_count(&self) -> usize {
        StringColumn::null_count(self)
    }

    fn dtype(&self) -> DType {
        StringColumn::dtype(self)
    }

    fn name(&self) -> &str {
        StringColumn::name(self)
    }

    fn validity(&self) -> Option<&Bitmask> {
        self.mask()
    }
}

impl<T: Element> Column for PrimitiveColumn<T> {
    fn len(&self) -> usize {
        PrimitiveColumn::len(self)
    }

    fn null_count(&self) -> usize {
        PrimitiveColumn::null_count(self)
    }

    fn dtype(&self) -> DType {
        PrimitiveColumn::dtype(self)
    }

    fn name(&self) -> &str {
        PrimitiveColumn::name(self)
    }

    fn validity(&self) -> Option<&Bitmask> {
        self.null_mask()
    }
}

impl Column for TypedColumn {
    fn len(&self) -> usize {
        TypedColumn::len(self)
    }

    fn null_count(&self) -> usize {
        TypedColumn::null_count(self)
    }

    fn dtype(&self) -> DType {
        TypedColumn::dtype(self)
    }

    fn name(&self) -> &str {
        TypedColumn::name(self)
    }

    fn validity(&self) -> Option<&Bitmask> {
        self.null_mask()
    }
}
