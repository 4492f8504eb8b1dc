//! Reader duplication, file type predicates and shutil-style copying.

mod copy;

pub use copy::{CopyFn, CopyTreeOptions, IgnoreFn, Modes, copy, copy_data, copy_mode, copy_tree};

use std::fs::{self, FileType, Metadata};
use std::io::{self, Cursor, Read};
use std::path::Path;

use crate::error::CopyError;

/// Read `reader` to the end and return two independent readers over the
/// same content.
pub fn dump_reader<R: Read>(mut reader: R) -> io::Result<(Cursor<Vec<u8>>, Cursor<Vec<u8>>)> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok((Cursor::new(buf.clone()), Cursor::new(buf)))
}

/// Whether `src` and `dst` refer to the same file, following symlinks. A
/// path that does not exist is never the same as anything.
pub fn is_same_file(src: &Path, dst: &Path) -> Result<bool, CopyError> {
    let Some(src_meta) = stat_if_exists(src)? else {
        return Ok(false);
    };
    let Some(dst_meta) = stat_if_exists(dst)? else {
        return Ok(false);
    };
    same_inode(src, &src_meta, dst, &dst_meta)
}

#[cfg(unix)]
fn same_inode(_: &Path, a: &Metadata, _: &Path, b: &Metadata) -> Result<bool, CopyError> {
    use std::os::unix::fs::MetadataExt;
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn same_inode(src: &Path, _: &Metadata, dst: &Path, _: &Metadata) -> Result<bool, CopyError> {
    let src = fs::canonicalize(src).map_err(|source| io_error(src, source))?;
    let dst = fs::canonicalize(dst).map_err(|source| io_error(dst, source))?;
    Ok(src == dst)
}

fn stat_if_exists(path: &Path) -> Result<Option<Metadata>, CopyError> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(io_error(path, source)),
    }
}

/// Describe `file_type` if it is a device, pipe or socket.
#[cfg(unix)]
pub fn special_file_kind(file_type: &FileType) -> Option<&'static str> {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_block_device() {
        Some("device file")
    } else if file_type.is_fifo() {
        Some("named pipe")
    } else if file_type.is_socket() {
        Some("domain socket")
    } else if file_type.is_char_device() {
        Some("character device")
    } else {
        None
    }
}

/// Describe `file_type` if it is a device, pipe or socket.
#[cfg(not(unix))]
pub fn special_file_kind(_file_type: &FileType) -> Option<&'static str> {
    None
}

/// Whether `file_type` is anything other than a file, directory or symlink.
pub fn is_special_file(file_type: &FileType) -> bool {
    special_file_kind(file_type).is_some()
}

/// Whether `meta` (from [`fs::symlink_metadata`]) describes a symlink.
pub fn is_symlink(meta: &Metadata) -> bool {
    meta.file_type().is_symlink()
}

pub(crate) fn io_error(path: &Path, source: io::Error) -> CopyError {
    CopyError::FileIo {
        path: path.to_path_buf(),
        source,
    }
}
