use std::path::{Path, PathBuf};

use log::{debug, trace};
use zerocopy::byteorder::{BE, F32, F64, I16, I32, I64, LE, U16, U32, U64};
use zerocopy::IntoBytes;

use crate::error::{Error, Result};
use crate::format::{Endianness, FormatResolver, SizeSpec};
use crate::fs::{FileSystem, StdFileSystem};
use crate::value::{pack, Value};

/// Controls how [`BinaryWriter::save`] treats the target path.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SaveOptions {
    /// Replace the target file if it already exists.
    pub overwrite: bool,
    /// Create missing parent directories of the target.
    pub create_path: bool,
}

impl SaveOptions {
    /// Neither overwrites nor creates directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `overwrite`.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets `create_path`.
    pub fn create_path(mut self, create_path: bool) -> Self {
        self.create_path = create_path;
        self
    }
}

/// Accumulates packed values in an in-memory buffer and optionally saves it to a file.
///
/// Values are packed one after another with no framing, so the buffer is exactly the
/// concatenation of what was written. Multi-byte values use the writer's current
/// [`Endianness`], which starts out little-endian and can be changed between writes.
///
/// ```
/// use packbuf::{BinaryWriter, Endianness};
///
/// let mut w = BinaryWriter::new();
/// w.write_unsigned(4, 0x12345678u32)?;
/// w.set_endianness(Endianness::Big);
/// w.write_unsigned("int", 0x12345678u32)?.write_bytes(b"!");
/// assert_eq!(w.as_bytes(), [0x78, 0x56, 0x34, 0x12, 0x12, 0x34, 0x56, 0x78, b'!']);
/// # Ok::<(), packbuf::Error>(())
/// ```
#[derive(Debug)]
pub struct BinaryWriter<F = StdFileSystem> {
    out: Vec<u8>,
    resolver: FormatResolver,
    target: Option<PathBuf>,
    fs: F,
}

impl BinaryWriter<StdFileSystem> {
    /// Creates a writer with an empty buffer and no target path.
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// Creates a writer with an empty buffer of the given capacity and no target path.
    pub fn with_capacity(len: usize) -> Self {
        Self::from(Vec::with_capacity(len))
    }

    /// Creates a writer with an empty buffer that will be saved to `path`.
    ///
    /// Nothing is created or truncated until [`save`](Self::save) is called. Fails with
    /// [`Error::NotAFile`] if `path` is a directory.
    pub fn for_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_file_system(StdFileSystem, path)
    }
}

impl Default for BinaryWriter<StdFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps an existing buffer. Writes are appended after its current contents.
impl From<Vec<u8>> for BinaryWriter<StdFileSystem> {
    fn from(out: Vec<u8>) -> Self {
        Self {
            out,
            resolver: FormatResolver::default(),
            target: None,
            fs: StdFileSystem,
        }
    }
}

macro_rules! typed_write {
    ($($name:ident($t:ty) => $wrapper:ident;)*) => {
        $(
            #[doc = concat!("Writes a single `", stringify!($t), "` value in the current byte order")]
            pub fn $name(&mut self, value: $t) -> &mut Self {
                match self.endianness() {
                    Endianness::Little => {
                        self.write_bytes($wrapper::<LE>::new(value).as_bytes())
                    }
                    Endianness::Big => self.write_bytes($wrapper::<BE>::new(value).as_bytes()),
                }
            }
        )*
    };
}

impl<F: FileSystem> BinaryWriter<F> {
    /// Creates a writer with an empty buffer that will be saved to `path` through `fs`.
    ///
    /// The path is normalized and recorded. Fails with [`Error::NotAFile`] if it is a
    /// directory.
    pub fn with_file_system(fs: F, path: impl AsRef<Path>) -> Result<Self> {
        let path = fs.normalize(path.as_ref());
        if fs.is_dir(&path) {
            return Err(Error::NotAFile(path));
        }
        Ok(Self {
            out: Vec::new(),
            resolver: FormatResolver::default(),
            target: Some(path),
            fs,
        })
    }

    /// The byte order used by subsequent writes.
    pub fn endianness(&self) -> Endianness {
        self.resolver.endianness()
    }

    /// Changes the byte order of subsequent writes. Bytes already written are unchanged.
    pub fn set_endianness(&mut self, endianness: Endianness) -> &mut Self {
        debug!("endianness set to {endianness}");
        self.resolver.set_endianness(endianness);
        self
    }

    /// The normalized path that [`save`](Self::save) writes to, if any.
    pub fn target_path(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// Packs `value` as the signed kind that `spec` names and appends it.
    ///
    /// Floats are packed the same way by this method and by
    /// [`write_unsigned`](Self::write_unsigned).
    pub fn write_signed<'a>(
        &mut self,
        spec: impl Into<SizeSpec<'a>>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.write_resolved(spec.into(), true, value.into())
    }

    /// Packs `value` as the unsigned kind that `spec` names and appends it.
    pub fn write_unsigned<'a>(
        &mut self,
        spec: impl Into<SizeSpec<'a>>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.write_resolved(spec.into(), false, value.into())
    }

    fn write_resolved(
        &mut self,
        spec: SizeSpec<'_>,
        signed: bool,
        value: Value,
    ) -> Result<&mut Self> {
        let desc = self.resolver.resolve(spec, signed)?;
        pack(desc, value, &mut self.out)?;
        trace!(
            "packed {value} as {} ({} endian, {} bytes)",
            desc.kind,
            desc.byte_order,
            desc.byte_width()
        );
        Ok(self)
    }

    /// Writes `bytes` to the output verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.out.extend_from_slice(bytes);
        self
    }

    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_bytes(&[value as u8])
    }

    typed_write! {
        write_u16(u16) => U16;
        write_u32(u32) => U32;
        write_u64(u64) => U64;
        write_i16(i16) => I16;
        write_i32(i32) => I32;
        write_i64(i64) => I64;
        write_f32(f32) => F32;
        write_f64(f64) => F64;
    }

    /// Returns a copy of everything written so far.
    pub fn snapshot(&self) -> Vec<u8> {
        self.out.clone()
    }

    /// Accesses the buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// Accesses the buffer as a byte string, which is convenient for debug output.
    #[cfg(feature = "bstr")]
    pub fn as_bstr(&self) -> &bstr::BStr {
        bstr::BStr::new(&self.out)
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.out
    }

    /// Writes the whole buffer to the target path.
    ///
    /// Every call writes the entire buffer, including bytes that an earlier `save`
    /// already wrote, and replaces the previous file contents.
    ///
    /// # Errors
    ///
    /// * [`Error::NoTargetPath`] if the writer was created without a path.
    /// * [`Error::NotAFile`] if the target is a directory.
    /// * [`Error::TargetExists`] if the target exists and `options.overwrite` is false.
    /// * [`Error::Io`] if creating directories or writing the file fails.
    pub fn save(&self, options: SaveOptions) -> Result<()> {
        let path = self.target.as_deref().ok_or(Error::NoTargetPath)?;

        if self.fs.is_dir(path) {
            return Err(Error::NotAFile(path.to_path_buf()));
        }
        if self.fs.exists(path) && !options.overwrite {
            return Err(Error::TargetExists(path.to_path_buf()));
        }

        if options.create_path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.fs.create_dir_all(parent)?;
            }
        }

        self.fs.write_file(path, &self.out)?;
        debug!(
            "saved {} bytes to {} (create_path: {})",
            self.out.len(),
            path.display(),
            options.create_path
        );
        Ok(())
    }
}
