//! Packs numeric values into an in-memory buffer and saves the buffer to a file.
//!
//! Each write names the primitive type to pack with a [`SizeSpec`]: a byte width
//! (`1`, `2`, `4`, `8`), a name (`"byte"`, `"short"`, `"int"`, `"long"`, `"float"`,
//! `"double"`, `"f"`, `"d"`), or one of the [`IntKind`]/[`FloatKind`] constants. The
//! [`FormatResolver`] turns that into a [`PackingDescriptor`] using the writer's current
//! [`Endianness`], and the value is appended in that form. The buffer has no header or
//! framing; it is exactly the sequence of packed values.
//!
//! Integers are packed in two's complement and floats in IEEE-754, so the output matches
//! what C's `memcpy` of the native type (byte-swapped as needed) would produce.

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod error;
mod format;
pub mod fs;
mod value;
mod writer;


pub use error::{Error, Result};
pub use format::{
    Endianness, FloatKind, FormatResolver, IntKind, NumericClass, PackingDescriptor,
    PrimitiveKind, SizeSpec,
};
pub use fs::{FileSystem, StdFileSystem};
pub use value::Value;
pub use writer::{BinaryWriter, SaveOptions};
