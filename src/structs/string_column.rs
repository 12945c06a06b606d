//! # StringColumn Module - *The String Member of the Tabular Column Set*
//!
//! Wraps one [`StringStorage`] with column-level metadata (name, cached null
//! count) and the capability set the owning row-container consumes: length,
//! null count, mask, copy, dtype casting, comparison and binary operators,
//! sorting, searching, null filling, and serialization.
//!
//! ## Overview
//! - Immutable after construction: every mutating-looking API returns a new
//!   column over a new storage.
//! - Derived state (the dictionary-encoded [`Category`], the monotonicity
//!   flags) is memoized behind computed-or-absent cells, populated on first
//!   access and invalidated by identity — a new column starts empty.
//! - Row-wise string operations live on the [`StringOps`] facade reached
//!   through [`StringColumn::str`]; this module carries the column-level
//!   surface.

use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use rayon::prelude::*;

use crate::enums::dtype::DType;
use crate::enums::error::TextcolError;
use crate::enums::typed_column::TypedColumn;
use crate::kernels::cast;
use crate::ops::strings::StringOps;
use crate::structs::bitmask::Bitmask;
use crate::structs::category::Category;
use crate::structs::primitive_column::PrimitiveColumn;
use crate::structs::string_storage::StringStorage;
use crate::traits::print::MAX_PREVIEW;

/// Element-wise comparison operator for [`StringColumn::unordered_compare`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Applies the operator to two non-null rows (byte-lexicographic for the
    /// ordered variants).
    #[inline]
    pub fn eval(&self, lhs: &str, rhs: &str) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
        }
    }
}

/// Where nulls land in a sorted column, regardless of direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullPosition {
    First,
    Last,
}

/// The closed set of fill operands accepted by [`StringColumn::fillna`].
/// Anything else is a compile-time-visible gap rather than a runtime type
/// error.
#[derive(Debug)]
pub enum FillValue<'a> {
    Scalar(&'a str),
    Column(&'a StringColumn),
}

/// # StringColumn
///
/// Nullable, device-resident string column.
///
/// ## Example
/// ```rust
/// use textcol::StringColumn;
///
/// let col = StringColumn::from_host("names", &[Some("ada"), None, Some("grace")]).unwrap();
/// assert_eq!(col.len(), 3);
/// assert_eq!(col.null_count(), 1);
/// let filled = col.fillna(textcol::FillValue::Scalar("?")).unwrap();
/// assert_eq!(filled.null_count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct StringColumn {
    name: String,
    storage: StringStorage,
    null_count: usize,
    category: OnceLock<Category>,
    monotonic_increasing: OnceLock<bool>,
    monotonic_decreasing: OnceLock<bool>,
}

impl StringColumn {
    /// Wraps a storage; the null count is mirrored from it.
    pub fn new(name: impl Into<String>, storage: StringStorage) -> Self {
        let null_count = storage.null_count();
        StringColumn {
            name: name.into(),
            storage,
            null_count,
            category: OnceLock::new(),
            monotonic_increasing: OnceLock::new(),
            monotonic_decreasing: OnceLock::new(),
        }
    }

    /// Uploads a host sequence of nullable strings wholesale.
    pub fn from_host<S: AsRef<str>>(
        name: impl Into<String>,
        rows: &[Option<S>],
    ) -> Result<Self, TextcolError> {
        Ok(Self::new(name, StringStorage::from_host(rows)?))
    }

    /// Uploads a dense host sequence (no nulls).
    pub fn from_strs(name: impl Into<String>, rows: &[&str]) -> Result<Self, TextcolError> {
        Ok(Self::new(name, StringStorage::from_strs(rows)?))
    }

    /// Broadcasts one scalar (or null) across `len` rows — the normalization
    /// target for scalar binop operands.
    pub fn from_scalar(
        name: impl Into<String>,
        value: Option<&str>,
        len: usize,
    ) -> Result<Self, TextcolError> {
        Ok(Self::new(name, StringStorage::from_scalar(value, len)?))
    }

    /// Builds the string rendition of a fixed-stride column, preserving its
    /// mask (the inverse of the numeric casts).
    pub fn from_numeric(
        name: impl Into<String>,
        column: &TypedColumn,
    ) -> Result<Self, TextcolError> {
        let storage = match column {
            TypedColumn::Int8(c) => StringStorage::from_integers(c.values(), c.null_mask())?,
            TypedColumn::Int16(c) => StringStorage::from_integers(c.values(), c.null_mask())?,
            TypedColumn::Int32(c) => StringStorage::from_integers(c.values(), c.null_mask())?,
            TypedColumn::Int64(c) => StringStorage::from_integers(c.values(), c.null_mask())?,
            TypedColumn::Float32(c) => StringStorage::from_floats(c.values(), c.null_mask())?,
            TypedColumn::Float64(c) => StringStorage::from_floats(c.values(), c.null_mask())?,
            TypedColumn::Bool(c) => StringStorage::from_booleans(c.values(), c.null_mask())?,
            #[cfg(feature = "datetime")]
            TypedColumn::Timestamp(c) => {
                let unit = match c.dtype() {
                    DType::Timestamp(unit) => unit,
                    other => {
                        return Err(TextcolError::TypeMismatch {
                            from: "timestamp",
                            to: "str",
                            message: Some(format!("unexpected dtype tag {}", other)),
                        });
                    }
                };
                StringStorage::from_timestamps(c.values(), unit, c.null_mask())?
            }
            TypedColumn::Str(c) => c.storage().to_owned_copy()?,
        };
        Ok(Self::new(name, storage))
    }

    /// The column name. Opaque label; not required to be unique.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying storage.
    #[inline]
    pub fn storage(&self) -> &StringStorage {
        &self.storage
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        DType::Str
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Null count mirrored from storage at construction.
    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// The validity bitmap, shared zero-copy with storage; absent when no
    /// row is null.
    #[inline]
    pub fn mask(&self) -> Option<&Bitmask> {
        self.storage.null_mask()
    }

    /// The string at `idx`, or `None` when null.
    #[inline]
    pub fn value(&self, idx: usize) -> Option<&str> {
        self.storage.value(idx)
    }

    /// Row-wise string operations facade.
    #[inline]
    pub fn str(&self) -> StringOps<'_> {
        StringOps::new(self)
    }

    /// Explicit host materialization.
    pub fn to_host(&self) -> Vec<Option<String>> {
        self.storage.to_host()
    }

    /// Deep copy into freshly allocated device buffers; derived caches start
    /// empty on the copy.
    pub fn copy(&self) -> Result<StringColumn, TextcolError> {
        Ok(Self::new(self.name.clone(), self.storage.to_owned_copy()?))
    }

    // ------------------------- category & uniqueness -------------------------

    /// The dictionary-encoded view, built on first access and memoized.
    pub fn category(&self) -> Result<&Category, TextcolError> {
        if let Some(cat) = self.category.get() {
            return Ok(cat);
        }
        let built = Category::build(&self.storage)?;
        Ok(self.category.get_or_init(|| built))
    }

    /// Per-row dictionary codes as an `i32` column sharing this column's
    /// mask.
    pub fn codes(&self) -> Result<PrimitiveColumn<i32>, TextcolError> {
        let cat = self.category()?;
        Ok(PrimitiveColumn::new(
            self.name.clone(),
            cat.codes_buffer().clone(),
            self.mask().cloned(),
        ))
    }

    /// The distinct non-null values, in first-seen order.
    pub fn unique(&self) -> Result<StringColumn, TextcolError> {
        let cat = self.category()?;
        Ok(Self::new(self.name.clone(), cat.keys().clone()))
    }

    /// True when every non-null row is distinct and no row is null.
    pub fn is_unique(&self) -> Result<bool, TextcolError> {
        Ok(self.category()?.num_keys() == self.len())
    }

    /// True when adjacent non-null rows never decrease. Pairs with a null on
    /// either side do not participate. Memoized.
    pub fn is_monotonic_increasing(&self) -> bool {
        *self
            .monotonic_increasing
            .get_or_init(|| self.adjacent_all(|prev, cur| prev <= cur))
    }

    /// True when adjacent non-null rows never increase. Memoized.
    pub fn is_monotonic_decreasing(&self) -> bool {
        *self
            .monotonic_decreasing
            .get_or_init(|| self.adjacent_all(|prev, cur| prev >= cur))
    }

    fn adjacent_all(&self, ok: impl Fn(&str, &str) -> bool) -> bool {
        (1..self.len()).all(|i| match (self.value(i - 1), self.value(i)) {
            (Some(prev), Some(cur)) => ok(prev, cur),
            _ => true,
        })
    }

    // ------------------------- search -------------------------

    /// First row index whose string equals `value` exactly (anchored match).
    pub fn find_first_value(&self, value: &str) -> Option<usize> {
        (0..self.len()).find(|&i| self.value(i) == Some(value))
    }

    /// Last row index whose string equals `value` exactly (anchored match).
    pub fn find_last_value(&self, value: &str) -> Option<usize> {
        (0..self.len()).rev().find(|&i| self.value(i) == Some(value))
    }

    /// Whole-column membership: does any row equal `value` exactly?
    pub fn contains_row(&self, value: &str) -> bool {
        self.find_first_value(value).is_some()
    }

    // ------------------------- ordering -------------------------

    /// Sorts by value. Returns the sorted column plus the `i32` permutation
    /// that produced it, so sibling columns in the same row-container can be
    /// reordered consistently.
    pub fn sort_by_values(
        &self,
        ascending: bool,
        null_position: NullPosition,
    ) -> Result<(StringColumn, PrimitiveColumn<i32>), TextcolError> {
        let nulls_first = matches!(null_position, NullPosition::First);
        let perm = self.storage.order(ascending, nulls_first)?;
        let sorted = self.storage.gather(perm.as_slice::<i32>())?;
        Ok((
            Self::new(self.name.clone(), sorted),
            PrimitiveColumn::new(self.name.clone(), perm, None),
        ))
    }

    // ------------------------- comparison & binops -------------------------

    /// Element-wise comparison producing a boolean column with a null
    /// wherever either operand row is null.
    pub fn unordered_compare(
        &self,
        op: CmpOp,
        rhs: &StringColumn,
    ) -> Result<PrimitiveColumn<bool>, TextcolError> {
        if self.len() != rhs.len() {
            return Err(TextcolError::LengthMismatch {
                expected: self.len(),
                found: rhs.len(),
            });
        }
        let values: Vec<bool> = (0..self.len())
            .into_par_iter()
            .map(|i| match (self.value(i), rhs.value(i)) {
                (Some(a), Some(b)) => op.eval(a, b),
                _ => false,
            })
            .collect();
        let mask = Bitmask::intersect(self.mask(), rhs.mask(), self.len())?;
        PrimitiveColumn::from_values(self.name.clone(), &values, mask)
    }

    /// Binary operators between columns. Only `"add"` (element-wise
    /// concatenation) is supported between two string columns; everything
    /// else fails naming the operator and both operand kinds.
    pub fn binary_operator(
        &self,
        op: &str,
        rhs: &TypedColumn,
    ) -> Result<StringColumn, TextcolError> {
        if op == "add" {
            if let Some(rhs) = rhs.as_str_column() {
                let storage = self.storage.cat(rhs.storage(), None, None)?;
                return Ok(Self::new(self.name.clone(), storage));
            }
        }
        Err(TextcolError::UnsupportedOperation {
            op: op.to_string(),
            lhs: "str",
            rhs: rhs.kind_name(),
        })
    }

    // ------------------------- replacement & filling -------------------------

    /// Replaces occurrences of a single scalar target with a single scalar
    /// replacement (literal, unlimited). Multi-value replacement maps are
    /// not implemented.
    pub fn find_and_replace(
        &self,
        targets: &[&str],
        replacements: &[&str],
    ) -> Result<StringColumn, TextcolError> {
        if targets.len() != 1 || replacements.len() != 1 {
            return Err(TextcolError::UnsupportedOperation {
                op: "find_and_replace (multi-value)".to_string(),
                lhs: "str",
                rhs: "list",
            });
        }
        let storage = self.storage.replace(targets[0], replacements[0], -1, false)?;
        Ok(Self::new(self.name.clone(), storage))
    }

    /// Replaces every null row from the fill operand; the result column has
    /// zero nulls when the filler covers them.
    pub fn fillna(&self, value: FillValue<'_>) -> Result<StringColumn, TextcolError> {
        let storage = match value {
            FillValue::Scalar(s) => self.storage.fillna_scalar(s)?,
            FillValue::Column(col) => self.storage.fillna_column(col.storage())?,
        };
        Ok(Self::new(self.name.clone(), storage))
    }

    // ------------------------- casting -------------------------

    /// Casts every non-null row to a fixed-stride dtype. Sub-32-bit integer
    /// targets parse through an `i32` intermediate and then narrow with a
    /// range check; temporal targets parse into 64-bit epoch ticks at the
    /// dtype's unit. Any unparsable non-null row fails the whole cast.
    pub fn as_numerical_column(&self, dtype: DType) -> Result<TypedColumn, TextcolError> {
        let mask = self.mask().cloned();
        match dtype {
            DType::Int8 => {
                let wide = self.storage.to_numeric::<i32>()?;
                let narrow = cast::narrow_integers::<i8>(wide.as_slice::<i32>(), self.mask())?;
                Ok(TypedColumn::Int8(PrimitiveColumn::new(
                    self.name.clone(),
                    narrow,
                    mask,
                )))
            }
            DType::Int16 => {
                let wide = self.storage.to_numeric::<i32>()?;
                let narrow = cast::narrow_integers::<i16>(wide.as_slice::<i32>(), self.mask())?;
                Ok(TypedColumn::Int16(PrimitiveColumn::new(
                    self.name.clone(),
                    narrow,
                    mask,
                )))
            }
            DType::Int32 => Ok(TypedColumn::Int32(PrimitiveColumn::new(
                self.name.clone(),
                self.storage.to_numeric::<i32>()?,
                mask,
            ))),
            DType::Int64 => Ok(TypedColumn::Int64(PrimitiveColumn::new(
                self.name.clone(),
                self.storage.to_numeric::<i64>()?,
                mask,
            ))),
            DType::Float32 => Ok(TypedColumn::Float32(PrimitiveColumn::new(
                self.name.clone(),
                self.storage.to_numeric::<f32>()?,
                mask,
            ))),
            DType::Float64 => Ok(TypedColumn::Float64(PrimitiveColumn::new(
                self.name.clone(),
                self.storage.to_numeric::<f64>()?,
                mask,
            ))),
            DType::Bool => Ok(TypedColumn::Bool(PrimitiveColumn::new(
                self.name.clone(),
                self.storage.to_bool()?,
                mask,
            ))),
            #[cfg(feature = "datetime")]
            DType::Timestamp(unit) => Ok(TypedColumn::Timestamp(PrimitiveColumn::with_dtype(
                self.name.clone(),
                DType::Timestamp(unit),
                self.storage.to_timestamp(unit)?,
                mask,
            ))),
            DType::Str | DType::Null => Err(TextcolError::TypeMismatch {
                from: "str",
                to: if dtype == DType::Str { "str" } else { "null" },
                message: Some("not a numerical dtype".to_string()),
            }),
        }
    }

    /// Dtype-directed cast: the string target copies, everything else goes
    /// through [`StringColumn::as_numerical_column`].
    pub fn astype(&self, dtype: DType) -> Result<TypedColumn, TextcolError> {
        match dtype {
            DType::Str => Ok(TypedColumn::Str(self.copy()?)),
            other => self.as_numerical_column(other),
        }
    }
}

/// Logical equality: same rows, nulls at the same positions. Names and
/// caches do not participate.
impl PartialEq for StringColumn {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl Display for StringColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "StringColumn '{}' [{} rows] (dtype: str, nulls: {})",
            self.name,
            self.len(),
            self.null_count
        )?;
        write!(f, "[")?;
        for i in 0..usize::min(self.len(), MAX_PREVIEW) {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.value(i) {
                Some(s) => write!(f, "\"{}\"", s)?,
                None => write!(f, "null")?,
            }
        }
        if self.len() > MAX_PREVIEW {
            write!(f, ", … ({} total)", self.len())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(rows: &[Option<&str>]) -> StringColumn {
        StringColumn::from_host("t", rows).unwrap()
    }

    #[test]
    fn test_unique_first_seen_order() {
        let c = col(&[Some("b"), Some("a"), Some("b"), None]);
        let u = c.unique().unwrap();
        assert_eq!(u.to_host(), vec![Some("b".into()), Some("a".into())]);
    }

    #[test]
    fn test_is_unique() {
        assert!(col(&[Some("a"), Some("b")]).is_unique().unwrap());
        assert!(!col(&[Some("a"), Some("a")]).is_unique().unwrap());
        assert!(!col(&[Some("a"), None]).is_unique().unwrap());
    }

    #[test]
    fn test_category_is_memoized() {
        let c = col(&[Some("x"), Some("y")]);
        let first = c.category().unwrap() as *const Category;
        let second = c.category().unwrap() as *const Category;
        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonic_flags() {
        assert!(col(&[Some("a"), Some("b"), Some("b")]).is_monotonic_increasing());
        assert!(!col(&[Some("b"), Some("a")]).is_monotonic_increasing());
        assert!(col(&[Some("b"), None, Some("a")]).is_monotonic_decreasing());
        // null pairs do not participate
        assert!(col(&[Some("a"), None, Some("z")]).is_monotonic_increasing());
    }

    #[test]
    fn test_sort_by_values_null_first() {
        let c = col(&[Some("b"), None, Some("a")]);
        let (sorted, perm) = c.sort_by_values(true, NullPosition::First).unwrap();
        assert_eq!(sorted.to_host(), vec![None, Some("a".into()), Some("b".into())]);
        assert_eq!(perm.values(), &[1, 2, 0]);
    }

    #[test]
    fn test_sort_by_values_descending_null_last() {
        let c = col(&[Some("b"), None, Some("a")]);
        let (sorted, _) = c.sort_by_values(false, NullPosition::Last).unwrap();
        assert_eq!(sorted.to_host(), vec![Some("b".into()), Some("a".into()), None]);
    }

    #[test]
    fn test_find_first_and_last() {
        let c = col(&[Some("a"), Some("b"), Some("a"), None]);
        assert_eq!(c.find_first_value("a"), Some(0));
        assert_eq!(c.find_last_value("a"), Some(2));
        assert_eq!(c.find_first_value("zz"), None);
        assert!(c.contains_row("b"));
        assert!(!c.contains_row("c"));
    }

    #[test]
    fn test_unordered_compare_eq_with_nulls() {
        let lhs = col(&[Some("a"), None]);
        let rhs = col(&[Some("a"), Some("b")]);
        let out = lhs.unordered_compare(CmpOp::Eq, &rhs).unwrap();
        assert_eq!(out.get(0), Some(true));
        assert_eq!(out.get(1), None);
    }

    #[test]
    fn test_unordered_compare_ordering_ops() {
        let lhs = col(&[Some("a"), Some("b")]);
        let rhs = col(&[Some("b"), Some("a")]);
        let lt = lhs.unordered_compare(CmpOp::Lt, &rhs).unwrap();
        assert_eq!(lt.get(0), Some(true));
        assert_eq!(lt.get(1), Some(false));
        let ge = lhs.unordered_compare(CmpOp::Ge, &rhs).unwrap();
        assert_eq!(ge.get(0), Some(false));
        assert_eq!(ge.get(1), Some(true));
    }

    #[test]
    fn test_binary_operator_add() {
        let lhs = col(&[Some("a"), None]);
        let rhs = col(&[Some("b"), Some("c")]);
        let out = lhs
            .binary_operator("add", &TypedColumn::Str(rhs))
            .unwrap();
        assert_eq!(out.to_host(), vec![Some("ab".into()), None]);
    }

    #[test]
    fn test_binary_operator_rejects_others() {
        let lhs = col(&[Some("a")]);
        let rhs = TypedColumn::Str(col(&[Some("b")]));
        let err = lhs.binary_operator("mul", &rhs).unwrap_err();
        assert_eq!(
            err,
            TextcolError::UnsupportedOperation {
                op: "mul".into(),
                lhs: "str",
                rhs: "str",
            }
        );
    }

    #[test]
    fn test_find_and_replace_single_pair_only() {
        let c = col(&[Some("aba"), None]);
        let out = c.find_and_replace(&["a"], &["_"]).unwrap();
        assert_eq!(out.to_host(), vec![Some("_b_".into()), None]);

        assert!(matches!(
            c.find_and_replace(&["a", "b"], &["x", "y"]),
            Err(TextcolError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_fillna_scalar_and_column() {
        let c = col(&[Some("x"), None]);
        let filled = c.fillna(FillValue::Scalar("y")).unwrap();
        assert_eq!(filled.to_host(), vec![Some("x".into()), Some("y".into())]);
        assert_eq!(filled.null_count(), 0);

        let fill_col = col(&[Some("1"), Some("2")]);
        let filled = c.fillna(FillValue::Column(&fill_col)).unwrap();
        assert_eq!(filled.to_host(), vec![Some("x".into()), Some("2".into())]);
    }

    #[test]
    fn test_fillna_column_too_short() {
        let c = col(&[None, None]);
        let short = col(&[Some("1")]);
        assert!(matches!(
            c.fillna(FillValue::Column(&short)),
            Err(TextcolError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_cast_int32_strict() {
        let c = col(&[Some("1"), Some("2"), Some("x")]);
        assert!(matches!(
            c.as_numerical_column(DType::Int32),
            Err(TextcolError::ParseFailure { .. })
        ));

        let ok = col(&[Some("1"), None, Some("-3")]);
        match ok.as_numerical_column(DType::Int32).unwrap() {
            TypedColumn::Int32(out) => {
                assert_eq!(out.get(0), Some(1));
                assert_eq!(out.get(1), None);
                assert_eq!(out.get(2), Some(-3));
            }
            other => panic!("expected int32 column, got {}", other.dtype()),
        }
    }

    #[test]
    fn test_cast_narrows_through_i32() {
        let c = col(&[Some("100"), Some("-100")]);
        match c.as_numerical_column(DType::Int8).unwrap() {
            TypedColumn::Int8(out) => assert_eq!(out.values(), &[100, -100]),
            other => panic!("expected int8 column, got {}", other.dtype()),
        }

        let wide = col(&[Some("300")]);
        assert!(matches!(
            wide.as_numerical_column(DType::Int8),
            Err(TextcolError::ParseFailure { .. })
        ));
    }

    #[test]
    fn test_astype_str_copies() {
        let c = col(&[Some("a"), None]);
        match c.astype(DType::Str).unwrap() {
            TypedColumn::Str(out) => assert_eq!(out, c),
            other => panic!("expected str column, got {}", other.dtype()),
        }
    }

    #[cfg(feature = "datetime")]
    #[test]
    fn test_cast_timestamp() {
        use crate::enums::dtype::TimeUnit;
        let c = col(&[Some("1970-01-01 00:00:10"), None]);
        match c
            .as_numerical_column(DType::Timestamp(TimeUnit::Seconds))
            .unwrap()
        {
            TypedColumn::Timestamp(out) => {
                assert_eq!(out.get(0), Some(10));
                assert_eq!(out.get(1), None);
                assert_eq!(out.dtype(), DType::Timestamp(TimeUnit::Seconds));
            }
            other => panic!("expected timestamp column, got {}", other.dtype()),
        }
    }

    #[test]
    fn test_from_numeric_roundtrip() {
        let c = col(&[Some("5"), None, Some("7")]);
        let ints = c.as_numerical_column(DType::Int64).unwrap();
        let back = StringColumn::from_numeric("t", &ints).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_copy_is_deep() {
        let c = col(&[Some("a"), None]);
        let copied = c.copy().unwrap();
        assert_eq!(copied, c);
        assert_ne!(
            c.storage().chars_buffer().as_slice::<u8>().as_ptr(),
            copied.storage().chars_buffer().as_slice::<u8>().as_ptr()
        );
    }
}
