//! # StringOps Module - *Null-Safe, Broadcast-Aware Operations Facade*
//!
//! The row-wise string surface a tabular column accessor exposes, reached
//! through [`StringColumn::str`]. This layer does three jobs before any
//! device work runs:
//!
//! 1. **Fail fast on unimplemented parameters.** Non-default values for
//!    `case`, `flags`, `na`, and `split`'s `expand` raise
//!    `UnsupportedOption` naming the parameter — callers probe capability by
//!    catching that signal, so it must fire before dispatch.
//! 2. **Normalize heterogeneous operands.** The "others" argument of `cat`
//!    is one sum type, [`StringOperand`], resolved by a single function: a
//!    column passes through, a host sequence is uploaded, a scalar is
//!    broadcast, and a multi-element sequence is pairwise-concatenated
//!    left-to-right with the first element establishing the accumulator.
//! 3. **Re-wrap device outputs.** Kernel outputs become new columns whose
//!    validity mask is copied from the input whenever the input has nulls —
//!    except where the operation computes its own mask (`extract`, `split`'s
//!    ragged columns, `cat`).

use crate::enums::error::TextcolError;
use crate::structs::primitive_column::PrimitiveColumn;
use crate::structs::string_column::StringColumn;
use crate::structs::string_storage::StringStorage;

/// The closed set of "other operand" shapes `cat` accepts. Resolution to a
/// comparable storage happens in one place; there is no scattered coercion.
#[derive(Debug)]
pub enum StringOperand<'a> {
    /// Another string column; used as-is.
    Column(&'a StringColumn),
    /// A sequence of columns; pairwise-concatenated left-to-right.
    Columns(Vec<&'a StringColumn>),
    /// A host sequence of nullable strings; uploaded wholesale.
    Host(Vec<Option<String>>),
    /// One scalar broadcast to the column's length.
    Scalar(&'a str),
}

/// What `cat` returns: a host scalar when no operand was given, a column
/// otherwise.
#[derive(Debug, PartialEq)]
pub enum CatOutput {
    Scalar(String),
    Column(StringColumn),
}

/// What `extract` returns: a single column when the pattern has exactly one
/// capture group and `expand` is off, a table of columns otherwise.
#[derive(Debug, PartialEq)]
pub enum ExtractOutput {
    Column(StringColumn),
    Table(Vec<StringColumn>),
}

/// Options for [`StringOps::contains`]. Non-default `case_sensitive`,
/// `flags`, and `na` are not yet supported.
#[derive(Debug, Clone)]
pub struct ContainsOptions {
    pub case_sensitive: bool,
    pub flags: u32,
    pub na: Option<String>,
    pub regex: bool,
}

impl Default for ContainsOptions {
    fn default() -> Self {
        ContainsOptions {
            case_sensitive: true,
            flags: 0,
            na: None,
            regex: true,
        }
    }
}

/// Options for [`StringOps::replace`]. Non-default `case` and `flags` are
/// not yet supported; `n <= 0` means unlimited.
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    pub n: i64,
    pub case: Option<bool>,
    pub flags: u32,
    pub regex: bool,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        ReplaceOptions {
            n: -1,
            case: None,
            flags: 0,
            regex: true,
        }
    }
}

/// Options for [`StringOps::split`]. Non-default `expand` is not yet
/// supported; `n <= 0` means unlimited.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub n: i64,
    pub expand: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions { n: -1, expand: true }
    }
}

/// Options for [`StringOps::extract`]. Non-default `flags` is not yet
/// supported.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub flags: u32,
    pub expand: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            flags: 0,
            expand: true,
        }
    }
}

/// # StringOps
///
/// Borrowed operations facade over one [`StringColumn`].
///
/// ## Example
/// ```rust
/// use textcol::{ContainsOptions, StringColumn};
///
/// let col = StringColumn::from_host("c", &[Some("apple"), None]).unwrap();
/// let hits = col.str().contains("app", &ContainsOptions::default()).unwrap();
/// assert_eq!(hits.get(0), Some(true));
/// assert_eq!(hits.get(1), None);
/// ```
pub struct StringOps<'a> {
    col: &'a StringColumn,
}

impl<'a> StringOps<'a> {
    pub(crate) fn new(col: &'a StringColumn) -> Self {
        StringOps { col }
    }

    /// Per-row byte length as an `i32` column inheriting the input mask.
    pub fn len(&self) -> Result<PrimitiveColumn<i32>, TextcolError> {
        let lengths = self.col.storage().length()?;
        Ok(PrimitiveColumn::new(
            self.col.name().to_string(),
            lengths,
            self.col.mask().cloned(),
        ))
    }

    /// Pattern or substring containment as a boolean column inheriting the
    /// input mask.
    pub fn contains(
        &self,
        pat: &str,
        opts: &ContainsOptions,
    ) -> Result<PrimitiveColumn<bool>, TextcolError> {
        if !opts.case_sensitive {
            return Err(TextcolError::UnsupportedOption { param: "case" });
        }
        if opts.flags != 0 {
            return Err(TextcolError::UnsupportedOption { param: "flags" });
        }
        if opts.na.is_some() {
            return Err(TextcolError::UnsupportedOption { param: "na" });
        }
        let hits = self.col.storage().contains(pat, opts.regex)?;
        Ok(PrimitiveColumn::new(
            self.col.name().to_string(),
            hits,
            self.col.mask().cloned(),
        ))
    }

    /// Occurrence replacement; the output inherits the input mask.
    pub fn replace(
        &self,
        pat: &str,
        repl: &str,
        opts: &ReplaceOptions,
    ) -> Result<StringColumn, TextcolError> {
        if opts.case.is_some() {
            return Err(TextcolError::UnsupportedOption { param: "case" });
        }
        if opts.flags != 0 {
            return Err(TextcolError::UnsupportedOption { param: "flags" });
        }
        let storage = self
            .col
            .storage()
            .replace(pat, repl, opts.n, opts.regex)?;
        Ok(StringColumn::new(self.col.name().to_string(), storage))
    }

    /// Simple lowercase mapping.
    pub fn lower(&self) -> Result<StringColumn, TextcolError> {
        let storage = self.col.storage().lower()?;
        Ok(StringColumn::new(self.col.name().to_string(), storage))
    }

    /// Simple uppercase mapping.
    pub fn upper(&self) -> Result<StringColumn, TextcolError> {
        let storage = self.col.storage().upper()?;
        Ok(StringColumn::new(self.col.name().to_string(), storage))
    }

    /// Splits rows around a literal delimiter (`None` means a single space)
    /// into one column per split part, named by part index. Ragged rows
    /// compute their own masks.
    pub fn split(
        &self,
        pat: Option<&str>,
        opts: &SplitOptions,
    ) -> Result<Vec<StringColumn>, TextcolError> {
        if !opts.expand {
            return Err(TextcolError::UnsupportedOption { param: "expand" });
        }
        let storages = self.col.storage().split(pat, opts.n)?;
        Ok(storages
            .into_iter()
            .enumerate()
            .map(|(idx, s)| StringColumn::new(idx.to_string(), s))
            .collect())
    }

    /// Extracts capture groups from the first match of each row. With one
    /// group and `expand` off the single column keeps the parent's name;
    /// otherwise columns are named by group index.
    pub fn extract(
        &self,
        pat: &str,
        opts: &ExtractOptions,
    ) -> Result<ExtractOutput, TextcolError> {
        if opts.flags != 0 {
            return Err(TextcolError::UnsupportedOption { param: "flags" });
        }
        let mut storages = self.col.storage().extract(pat)?;
        if storages.len() == 1 && !opts.expand {
            let only = storages.remove(0);
            return Ok(ExtractOutput::Column(StringColumn::new(
                self.col.name().to_string(),
                only,
            )));
        }
        Ok(ExtractOutput::Table(
            storages
                .into_iter()
                .enumerate()
                .map(|(idx, s)| StringColumn::new(idx.to_string(), s))
                .collect(),
        ))
    }

    /// Concatenation. With no operand, joins all rows into one host scalar
    /// (nulls omitted unless `na_rep` substitutes). With operands, resolves
    /// them to a storage and concatenates element-wise; a null on either
    /// side nulls the row unless `na_rep` substitutes for it.
    pub fn cat(
        &self,
        others: Option<StringOperand<'_>>,
        sep: Option<&str>,
        na_rep: Option<&str>,
    ) -> Result<CatOutput, TextcolError> {
        match others {
            None => Ok(CatOutput::Scalar(
                self.col.storage().join_rows(sep.unwrap_or(""), na_rep),
            )),
            Some(operand) => {
                let other = self.resolve_operand(operand, sep, na_rep)?;
                let storage = self.col.storage().cat(&other, sep, na_rep)?;
                Ok(CatOutput::Column(StringColumn::new(
                    self.col.name().to_string(),
                    storage,
                )))
            }
        }
    }

    /// Joining list elements within a row requires list columns, which this
    /// engine does not model.
    pub fn join(&self, _sep: &str) -> Result<StringColumn, TextcolError> {
        Err(TextcolError::UnsupportedOperation {
            op: "join".to_string(),
            lhs: "str",
            rhs: "list",
        })
    }

    /// The single normalization point for "others" operands.
    fn resolve_operand(
        &self,
        operand: StringOperand<'_>,
        sep: Option<&str>,
        na_rep: Option<&str>,
    ) -> Result<StringStorage, TextcolError> {
        match operand {
            StringOperand::Column(col) => Ok(col.storage().clone()),
            StringOperand::Scalar(s) => StringStorage::from_scalar(Some(s), self.col.len()),
            StringOperand::Host(rows) => StringStorage::from_host(&rows),
            StringOperand::Columns(cols) => {
                let mut iter = cols.into_iter();
                let first = iter.next().ok_or(TextcolError::TypeMismatch {
                    from: "empty sequence",
                    to: "str",
                    message: Some("`others` must hold at least one column".to_string()),
                })?;
                // first element establishes the accumulator
                let mut acc = first.storage().clone();
                for col in iter {
                    acc = acc.cat(col.storage(), sep, na_rep)?;
                }
                Ok(acc)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(rows: &[Option<&str>]) -> StringColumn {
        StringColumn::from_host("t", rows).unwrap()
    }

    #[test]
    fn test_len_inherits_mask() {
        let c = col(&[Some("abc"), None]);
        let lens = c.str().len().unwrap();
        assert_eq!(lens.get(0), Some(3));
        assert_eq!(lens.get(1), None);

        let dense = col(&[Some("x")]);
        assert!(dense.str().len().unwrap().null_mask().is_none());
    }

    #[test]
    fn test_contains_literal_and_regex() {
        let c = col(&[Some("ab1"), Some("cd"), None]);
        let lit = c
            .str()
            .contains("b1", &ContainsOptions { regex: false, ..Default::default() })
            .unwrap();
        assert_eq!(lit.get(0), Some(true));
        assert_eq!(lit.get(1), Some(false));
        assert_eq!(lit.get(2), None);

        let re = c.str().contains(r"\d", &ContainsOptions::default()).unwrap();
        assert_eq!(re.get(0), Some(true));
        assert_eq!(re.get(1), Some(false));
    }

    #[test]
    fn test_unsupported_options_fail_fast() {
        let c = col(&[Some("a")]);
        assert_eq!(
            c.str()
                .contains("a", &ContainsOptions { case_sensitive: false, ..Default::default() })
                .unwrap_err(),
            TextcolError::UnsupportedOption { param: "case" }
        );
        assert_eq!(
            c.str()
                .contains("a", &ContainsOptions { flags: 2, ..Default::default() })
                .unwrap_err(),
            TextcolError::UnsupportedOption { param: "flags" }
        );
        assert_eq!(
            c.str()
                .contains(
                    "a",
                    &ContainsOptions { na: Some("?".into()), ..Default::default() }
                )
                .unwrap_err(),
            TextcolError::UnsupportedOption { param: "na" }
        );
        assert_eq!(
            c.str()
                .replace("a", "b", &ReplaceOptions { case: Some(true), ..Default::default() })
                .unwrap_err(),
            TextcolError::UnsupportedOption { param: "case" }
        );
        assert_eq!(
            c.str()
                .split(None, &SplitOptions { expand: false, ..Default::default() })
                .unwrap_err(),
            TextcolError::UnsupportedOption { param: "expand" }
        );
    }

    #[test]
    fn test_replace_inherits_nulls() {
        let c = col(&[Some("aa"), None]);
        let out = c.str().replace("a", "b", &ReplaceOptions::default()).unwrap();
        assert_eq!(out.to_host(), vec![Some("bb".into()), None]);
    }

    #[test]
    fn test_lower_upper() {
        let c = col(&[Some("AbC"), None]);
        assert_eq!(c.str().lower().unwrap().value(0), Some("abc"));
        assert_eq!(c.str().upper().unwrap().value(0), Some("ABC"));
    }

    #[test]
    fn test_split_columns_named_by_index() {
        let c = col(&[Some("a b"), Some("c")]);
        let cols = c.str().split(None, &SplitOptions::default()).unwrap();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].name(), "0");
        assert_eq!(cols[1].name(), "1");
        assert_eq!(cols[1].to_host(), vec![Some("b".into()), None]);
    }

    #[test]
    fn test_extract_expand_rules() {
        let c = col(&[Some("a1")]);
        match c
            .str()
            .extract(r"(\d)", &ExtractOptions { expand: false, ..Default::default() })
            .unwrap()
        {
            ExtractOutput::Column(out) => {
                assert_eq!(out.name(), "t");
                assert_eq!(out.value(0), Some("1"));
            }
            other => panic!("expected single column, got {:?}", other),
        }

        match c.str().extract(r"([a-z])(\d)", &ExtractOptions::default()).unwrap() {
            ExtractOutput::Table(cols) => {
                assert_eq!(cols.len(), 2);
                assert_eq!(cols[0].value(0), Some("a"));
                assert_eq!(cols[1].value(0), Some("1"));
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_cat_scalar_join_omits_nulls() {
        let c = col(&[Some("a"), None, Some("c")]);
        assert_eq!(
            c.str().cat(None, Some(","), None).unwrap(),
            CatOutput::Scalar("a,c".to_string())
        );
    }

    #[test]
    fn test_cat_column_operand_with_na_rep() {
        let lhs = col(&[Some("a"), None]);
        let rhs = col(&[None, Some("b")]);
        match lhs
            .str()
            .cat(Some(StringOperand::Column(&rhs)), Some("-"), Some("X"))
            .unwrap()
        {
            CatOutput::Column(out) => {
                assert_eq!(out.to_host(), vec![Some("a-X".into()), Some("X-b".into())]);
            }
            other => panic!("expected column, got {:?}", other),
        }
    }

    #[test]
    fn test_cat_host_and_scalar_operands() {
        let c = col(&[Some("a"), Some("b")]);
        match c
            .str()
            .cat(
                Some(StringOperand::Host(vec![Some("1".into()), None])),
                None,
                None,
            )
            .unwrap()
        {
            CatOutput::Column(out) => {
                assert_eq!(out.to_host(), vec![Some("a1".into()), None]);
            }
            other => panic!("expected column, got {:?}", other),
        }

        match c
            .str()
            .cat(Some(StringOperand::Scalar("!")), None, None)
            .unwrap()
        {
            CatOutput::Column(out) => {
                assert_eq!(out.to_host(), vec![Some("a!".into()), Some("b!".into())]);
            }
            other => panic!("expected column, got {:?}", other),
        }
    }

    #[test]
    fn test_cat_many_is_pairwise_left_to_right() {
        let base = col(&[Some("a")]);
        let one = col(&[Some("b")]);
        let two = col(&[Some("c")]);
        match base
            .str()
            .cat(Some(StringOperand::Columns(vec![&one, &two])), Some("-"), None)
            .unwrap()
        {
            CatOutput::Column(out) => assert_eq!(out.value(0), Some("a-b-c")),
            other => panic!("expected column, got {:?}", other),
        }
    }

    #[test]
    fn test_join_unsupported() {
        let c = col(&[Some("a")]);
        assert!(matches!(
            c.str().join(","),
            Err(TextcolError::UnsupportedOperation { .. })
        ));
    }
}
