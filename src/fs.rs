//! The file-system operations a `BinaryWriter` needs in order to save its buffer.

use std::io;
use std::path::{Component, Path, PathBuf};

/// File-system operations used by [`BinaryWriter::save`](crate::BinaryWriter::save).
pub trait FileSystem {
    /// Returns `true` if anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates `path` and any missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Writes `contents` to the file at `path`, replacing anything already there.
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Normalizes `path`. The default implementation works lexically; see [`normalize`].
    fn normalize(&self, path: &Path) -> PathBuf {
        normalize(path)
    }
}

/// Uses `std::fs`.
#[derive(Copy, Clone, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Removes `.` components and folds `..` into the preceding component, without
/// touching the file system.
///
/// `..` is kept when there is nothing left to fold it into in a relative path, and
/// dropped at the root of an absolute path. An empty result becomes `.`.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
