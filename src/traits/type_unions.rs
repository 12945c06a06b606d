use std::fmt::{Debug, Display};
use std::str::FromStr;

use num_traits::{Float as NumFloat, Num, NumCast, PrimInt, ToPrimitive};

use crate::enums::dtype::DType;

/// Trait for types that may live in a raw device buffer.
///
/// Marker only: the buffer stores plain fixed-width values, so any
/// implementor must be `Copy` with a stable in-memory layout.
pub trait DeviceValue: Copy + Send + Sync + 'static {}
impl DeviceValue for u8 {}
impl DeviceValue for u32 {}
impl DeviceValue for u64 {}
impl DeviceValue for i8 {}
impl DeviceValue for i16 {}
impl DeviceValue for i32 {}
impl DeviceValue for i64 {}
impl DeviceValue for f32 {}
impl DeviceValue for f64 {}
impl DeviceValue for bool {}

/// Trait for types valid as elements of a fixed-stride output column.
///
/// Carries the natural `DType` tag so kernels can build correctly tagged
/// columns without caller input. Timestamp columns reuse `i64` storage with
/// an explicit tag supplied at construction.
pub trait Element: DeviceValue + Default + PartialEq + Debug {
    const DTYPE: DType;
}

impl Element for i8 {
    const DTYPE: DType = DType::Int8;
}
impl Element for i16 {
    const DTYPE: DType = DType::Int16;
}
impl Element for i32 {
    const DTYPE: DType = DType::Int32;
}
impl Element for i64 {
    const DTYPE: DType = DType::Int64;
}
impl Element for f32 {
    const DTYPE: DType = DType::Float32;
}
impl Element for f64 {
    const DTYPE: DType = DType::Float64;
}
impl Element for bool {
    const DTYPE: DType = DType::Bool;
}

/// Trait for types valid as integer cast targets.
///
/// Useful when specifying `my_fn::<T: Integer>() {}`.
///
/// Extends and constrains the *num-traits* `PrimInt` implementation to fit
/// the crate's type universe; `FromStr`/`Display` bound the parse and format
/// kernels.
pub trait Integer: Element + PrimInt + FromStr + Display + ToPrimitive {}
impl Integer for i8 {}
impl Integer for i16 {}
impl Integer for i32 {}
impl Integer for i64 {}

/// Trait for types valid as float cast targets.
///
/// Extends and constrains the *num-traits* `Float` implementation to fit the
/// crate's type universe; the `ryu::Float` bound feeds the shortest
/// round-trippable formatting used by the inverse cast.
pub trait Float: Element + NumFloat + FromStr + ToPrimitive + ryu::Float {}
impl Float for f32 {}
impl Float for f64 {}

/// Trait for types valid as numeric cast targets generally.
pub trait Numeric: Element + Num + NumCast + FromStr + ToPrimitive {}
impl Numeric for i8 {}
impl Numeric for i16 {}
impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for f32 {}
impl Numeric for f64 {}
