//! Device-resident columnar string engine.

pub mod enums {
    pub mod dtype;
    pub mod error;
    pub mod typed_column;
}

pub mod structs {
    pub mod bitmask;
    pub mod category;
    pub mod device_buffer;
    pub mod primitive_column;
    pub mod string_column;
    pub mod string_storage;
}

pub mod kernels {
    pub mod cast;
    pub mod search;
    pub mod sort;
    pub mod split;
    pub mod transform;
}

pub mod ops {
    pub mod strings;
}

pub mod traits {
    pub mod column;
    pub mod print;
    pub mod type_unions;
}

pub mod interchange;
pub mod pattern;
pub mod serialize;
pub mod utils;

#[cfg(feature = "datetime")]
pub use enums::dtype::TimeUnit;
pub use enums::dtype::DType;
pub use enums::error::TextcolError;
pub use enums::typed_column::TypedColumn;

pub use structs::bitmask::Bitmask;
pub use structs::category::Category;
pub use structs::device_buffer::{
    DEVICE_ALIGN, DeviceAllocator, DeviceBuffer, DeviceBufferMut, DeviceRegion, SystemDevice,
    device_allocator, set_device_allocator,
};
pub use structs::primitive_column::PrimitiveColumn;
pub use structs::string_column::{CmpOp, FillValue, NullPosition, StringColumn};
pub use structs::string_storage::StringStorage;

pub use interchange::ColumnBuffers;
pub use ops::strings::{
    CatOutput, ContainsOptions, ExtractOptions, ExtractOutput, ReplaceOptions, SplitOptions,
    StringOperand, StringOps,
};
pub use pattern::Pattern;
pub use serialize::{Frame, SerializedHeader, SubHeader};
pub use traits::column::Column;
pub use traits::print::Print;
pub use traits::type_unions::{DeviceValue, Element, Float, Integer, Numeric};
