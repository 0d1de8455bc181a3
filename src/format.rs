//! Resolution of size specifiers into packing descriptors.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Byte order used for multi-byte values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Endianness {
    /// Least-significant byte first.
    #[default]
    Little,
    /// Most-significant byte first.
    Big,
}

impl FromStr for Endianness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "little" => Ok(Self::Little),
            "big" => Ok(Self::Big),
            _ => Err(Error::InvalidEndianness(s.to_owned())),
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Little => f.write_str("little"),
            Self::Big => f.write_str("big"),
        }
    }
}

/// The named integer kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IntKind {
    /// 1 byte
    Byte,
    /// 2 bytes
    Short,
    /// 4 bytes
    Int,
    /// 8 bytes
    Long,
}

impl IntKind {
    /// Maps a byte width to its integer kind, if the width is 1, 2, 4 or 8.
    pub fn from_width(width: i64) -> Option<Self> {
        match width {
            1 => Some(Self::Byte),
            2 => Some(Self::Short),
            4 => Some(Self::Int),
            8 => Some(Self::Long),
            _ => None,
        }
    }

    /// Maps `"byte"`, `"short"`, `"int"` or `"long"` to its integer kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    fn primitive(self, signed: bool) -> PrimitiveKind {
        use PrimitiveKind::*;
        match (self, signed) {
            (Self::Byte, true) => I8,
            (Self::Byte, false) => U8,
            (Self::Short, true) => I16,
            (Self::Short, false) => U16,
            (Self::Int, true) => I32,
            (Self::Int, false) => U32,
            (Self::Long, true) => I64,
            (Self::Long, false) => U64,
        }
    }
}

/// The named floating-point kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FloatKind {
    /// IEEE-754 single precision.
    Float,
    /// IEEE-754 double precision.
    Double,
}

impl FloatKind {
    /// Maps `"float"`/`"f"` or `"double"`/`"d"` to its float kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "float" | "f" => Some(Self::Float),
            "double" | "d" => Some(Self::Double),
            _ => None,
        }
    }

    /// Maps the raw codes `'f'` and `'d'` to their float kind.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'f' => Some(Self::Float),
            'd' => Some(Self::Double),
            _ => None,
        }
    }

    fn primitive(self) -> PrimitiveKind {
        match self {
            Self::Float => PrimitiveKind::F32,
            Self::Double => PrimitiveKind::F64,
        }
    }
}

/// Identifies which primitive type a write call packs.
///
/// Each accepted form has its own variant, and `From` conversions exist for the
/// convenient spellings:
///
/// ```
/// use packbuf::{FloatKind, IntKind, SizeSpec};
///
/// assert_eq!(SizeSpec::from(4), SizeSpec::Width(4));
/// assert_eq!(SizeSpec::from("short"), SizeSpec::Name("short"));
/// assert_eq!(SizeSpec::from(IntKind::Long), SizeSpec::Int(IntKind::Long));
/// assert_eq!(SizeSpec::from(FloatKind::Double), SizeSpec::Float(FloatKind::Double));
/// assert_eq!(SizeSpec::from('f'), SizeSpec::Code('f'));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SizeSpec<'a> {
    /// An integer width in bytes: 1, 2, 4 or 8.
    Width(i64),
    /// A named integer kind.
    Int(IntKind),
    /// A named float kind.
    Float(FloatKind),
    /// A symbolic name: `byte`, `short`, `int`, `long`, `float`, `double`, `f` or `d`.
    Name(&'a str),
    /// A raw float code: `'f'` or `'d'`.
    Code(char),
}

impl From<i32> for SizeSpec<'_> {
    fn from(width: i32) -> Self {
        Self::Width(width.into())
    }
}

impl From<u8> for SizeSpec<'_> {
    fn from(width: u8) -> Self {
        Self::Width(width.into())
    }
}

impl From<u32> for SizeSpec<'_> {
    fn from(width: u32) -> Self {
        Self::Width(width.into())
    }
}

impl From<usize> for SizeSpec<'_> {
    fn from(width: usize) -> Self {
        Self::Width(i64::try_from(width).unwrap_or(i64::MAX))
    }
}

impl From<IntKind> for SizeSpec<'_> {
    fn from(kind: IntKind) -> Self {
        Self::Int(kind)
    }
}

impl From<FloatKind> for SizeSpec<'_> {
    fn from(kind: FloatKind) -> Self {
        Self::Float(kind)
    }
}

impl<'a> From<&'a str> for SizeSpec<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl From<char> for SizeSpec<'_> {
    fn from(code: char) -> Self {
        Self::Code(code)
    }
}

/// Whether a packed value is a signed integer, an unsigned integer or a float.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumericClass {
    /// Two's-complement integer.
    SignedInt,
    /// Unsigned integer.
    UnsignedInt,
    /// IEEE-754 floating point.
    FloatingPoint,
}

/// A fixed-width primitive type that can be packed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[allow(missing_docs)]
pub enum PrimitiveKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

impl PrimitiveKind {
    /// Number of bytes one value of this kind occupies.
    pub fn byte_width(self) -> usize {
        use PrimitiveKind::*;
        match self {
            I8 | U8 => 1,
            I16 | U16 => 2,
            I32 | U32 | F32 => 4,
            I64 | U64 | F64 => 8,
        }
    }

    /// The numeric class of this kind.
    pub fn numeric_class(self) -> NumericClass {
        use PrimitiveKind::*;
        match self {
            I8 | I16 | I32 | I64 => NumericClass::SignedInt,
            U8 | U16 | U32 | U64 => NumericClass::UnsignedInt,
            F32 | F64 => NumericClass::FloatingPoint,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PrimitiveKind::*;
        f.write_str(match self {
            I8 => "i8",
            U8 => "u8",
            I16 => "i16",
            U16 => "u16",
            I32 => "i32",
            U32 => "u32",
            I64 => "i64",
            U64 => "u64",
            F32 => "f32",
            F64 => "f64",
        })
    }
}

/// The resolved form of a size specifier: what to pack, and in which byte order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackingDescriptor {
    /// The primitive type to pack.
    pub kind: PrimitiveKind,
    /// The byte order of the packed bytes.
    pub byte_order: Endianness,
}

impl PackingDescriptor {
    /// Number of bytes the packed value occupies.
    pub fn byte_width(&self) -> usize {
        self.kind.byte_width()
    }

    /// The numeric class of the packed value.
    pub fn numeric_class(&self) -> NumericClass {
        self.kind.numeric_class()
    }
}

/// Maps size specifiers to packing descriptors using the current endianness.
///
/// Resolution rules:
///
/// * Widths 1, 2, 4 and 8 and the names `byte`, `short`, `int` and `long` select an
///   integer of that width. `signed` selects between the signed and unsigned encoding.
/// * `float`, `double` and their aliases `f` and `d` select IEEE-754 single or double
///   precision. The `signed` flag is ignored for these: there is no unsigned float, so
///   floats are always packed in their natural representation.
/// * Anything else fails with [`Error::InvalidSpecifier`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct FormatResolver {
    endianness: Endianness,
}

enum NamedKind {
    Int(IntKind),
    Float(FloatKind),
}

impl FormatResolver {
    /// Creates a resolver that uses the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        Self { endianness }
    }

    /// The byte order applied to every resolution.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Changes the byte order applied to subsequent resolutions.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// Resolves `spec` into a packing descriptor.
    pub fn resolve(&self, spec: SizeSpec<'_>, signed: bool) -> Result<PackingDescriptor> {
        let kind = match Self::named_kind(spec)? {
            NamedKind::Int(int) => int.primitive(signed),
            NamedKind::Float(float) => float.primitive(),
        };
        Ok(PackingDescriptor {
            kind,
            byte_order: self.endianness,
        })
    }

    fn named_kind(spec: SizeSpec<'_>) -> Result<NamedKind> {
        let kind = match spec {
            SizeSpec::Width(width) => IntKind::from_width(width).map(NamedKind::Int),
            SizeSpec::Int(int) => Some(NamedKind::Int(int)),
            SizeSpec::Float(float) => Some(NamedKind::Float(float)),
            SizeSpec::Name(name) => IntKind::from_name(name)
                .map(NamedKind::Int)
                .or_else(|| FloatKind::from_name(name).map(NamedKind::Float)),
            SizeSpec::Code(code) => FloatKind::from_code(code).map(NamedKind::Float),
        };
        kind.ok_or_else(|| Error::InvalidSpecifier(format!("{spec:?}")))
    }
}
