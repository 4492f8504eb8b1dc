use std::ffi::OsString;
use std::fmt;
use std::fs::{self, DirEntry, File, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use serde::{Deserialize, Serialize};

use super::{io_error, is_same_file, special_file_kind};
use crate::error::CopyError;

/// Which metadata [`copy_mode`] carries over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// Permission bits
    pub permissions: bool,
    /// User and group; unix only
    pub owner: bool,
    /// Modification time
    pub mtime: bool,
}

impl Modes {
    /// Carry over everything
    pub fn all() -> Self {
        Self {
            permissions: true,
            owner: true,
            mtime: true,
        }
    }
}

/// Copies a single file during [`copy_tree`].
pub type CopyFn = fn(&Path, &Path, Modes) -> Result<(), CopyError>;

/// Given a directory and its entries, returns the names to skip.
pub type IgnoreFn = Box<dyn Fn(&Path, &[DirEntry]) -> Vec<OsString> + Send + Sync>;

/// Settings for [`copy_tree`].
pub struct CopyTreeOptions {
    /// Recreate symlinks instead of copying what they point to
    pub symlinks: bool,
    /// Skip symlinks whose target is missing instead of failing; only
    /// relevant when `symlinks` is off
    pub ignore_dangling_symlinks: bool,
    /// Used for every regular file
    pub copy_function: CopyFn,
    /// Called once per directory
    pub ignore: Option<IgnoreFn>,
}

impl Default for CopyTreeOptions {
    fn default() -> Self {
        Self {
            symlinks: false,
            ignore_dangling_symlinks: false,
            copy_function: copy,
            ignore: None,
        }
    }
}

impl fmt::Debug for CopyTreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyTreeOptions")
            .field("symlinks", &self.symlinks)
            .field("ignore_dangling_symlinks", &self.ignore_dangling_symlinks)
            .field("ignore", &self.ignore.is_some())
            .finish_non_exhaustive()
    }
}

// Reject same-file and special-file sources and resolve a symlinked source
// to its target.
fn copy_check(src: &Path, dst: &Path) -> Result<(PathBuf, Metadata), CopyError> {
    if is_same_file(src, dst)? {
        return Err(CopyError::SameFile {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    let meta = fs::symlink_metadata(src).map_err(|e| io_error(src, e))?;
    if let Some(kind) = special_file_kind(&meta.file_type()) {
        return Err(CopyError::SpecialFile {
            path: src.to_path_buf(),
            kind,
        });
    }

    if meta.file_type().is_symlink() {
        let target = resolve_link(src)?;
        let meta = fs::metadata(&target).map_err(|e| io_error(&target, e))?;
        return Ok((target, meta));
    }
    Ok((src.to_path_buf(), meta))
}

// Absolute path of a symlink's target; relative targets are taken relative
// to the link's directory.
fn resolve_link(link: &Path) -> Result<PathBuf, CopyError> {
    let target = fs::read_link(link).map_err(|e| io_error(link, e))?;
    let dir = link.parent().unwrap_or_else(|| Path::new(""));
    let joined = dir.join(target);
    std::path::absolute(&joined).map_err(|e| io_error(&joined, e))
}

/// Copy the contents of `src` to `dst`, which must not exist yet.
///
/// A symlinked `src` is followed. Fails for special files and when fewer
/// bytes were written than the source holds.
pub fn copy_data(src: &Path, dst: &Path) -> Result<(), CopyError> {
    let (src, src_meta) = copy_check(src, dst)?;

    if fs::metadata(dst).is_ok() {
        return Err(CopyError::Exists(dst.to_path_buf()));
    }

    let mut input = File::open(&src).map_err(|e| io_error(&src, e))?;
    let mut output = File::create(dst).map_err(|e| io_error(dst, e))?;
    let copied = io::copy(&mut input, &mut output).map_err(|e| io_error(dst, e))?;

    if copied != src_meta.len() {
        return Err(CopyError::ShortCopy {
            path: src,
            copied,
            expected: src_meta.len(),
        });
    }
    output.sync_all().map_err(|e| io_error(dst, e))
}

/// Copy the metadata selected in `modes` from `src` to the existing `dst`.
pub fn copy_mode(src: &Path, dst: &Path, modes: Modes) -> Result<(), CopyError> {
    let (_, src_meta) = copy_check(src, dst)?;
    fs::metadata(dst).map_err(|e| io_error(dst, e))?;

    if modes.mtime {
        let modified = FileTime::from_last_modification_time(&src_meta);
        filetime::set_file_times(dst, FileTime::now(), modified).map_err(|e| io_error(dst, e))?;
    }

    if modes.permissions {
        fs::set_permissions(dst, src_meta.permissions()).map_err(|e| io_error(dst, e))?;
    }

    if modes.owner {
        set_owner(&src_meta, dst)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_owner(src_meta: &Metadata, dst: &Path) -> Result<(), CopyError> {
    use std::os::unix::fs::MetadataExt;
    std::os::unix::fs::chown(dst, Some(src_meta.uid()), Some(src_meta.gid()))
        .map_err(|e| io_error(dst, e))
}

#[cfg(not(unix))]
fn set_owner(_: &Metadata, dst: &Path) -> Result<(), CopyError> {
    log::debug!("Ownership not copied to {}: unsupported platform", dst.display());
    Ok(())
}

/// Copy data and the selected metadata from `src` to `dst`. If `dst` is a
/// directory the file is copied into it under its own name.
pub fn copy(src: &Path, dst: &Path, modes: Modes) -> Result<(), CopyError> {
    let dst = match fs::metadata(dst) {
        Ok(meta) if meta.is_dir() => match src.file_name() {
            Some(name) => dst.join(name),
            None => dst.to_path_buf(),
        },
        Ok(_) => dst.to_path_buf(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => dst.to_path_buf(),
        Err(e) => return Err(io_error(dst, e)),
    };

    copy_data(src, &dst)?;
    copy_mode(src, &dst, modes)
}

/// Recursively copy the directory `src` to `dst`, which must not exist.
///
/// Directory permissions are applied after a directory's contents have been
/// copied, so read-only trees can be copied too.
pub fn copy_tree(src: &Path, dst: &Path, options: &CopyTreeOptions) -> Result<(), CopyError> {
    let src_meta = fs::metadata(src).map_err(|e| io_error(src, e))?;
    if !src_meta.is_dir() {
        return Err(CopyError::NotDir(src.to_path_buf()));
    }
    match fs::metadata(dst) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        _ => return Err(CopyError::Exists(dst.to_path_buf())),
    }

    let mut entries = fs::read_dir(src)
        .and_then(|dir| dir.collect::<io::Result<Vec<_>>>())
        .map_err(|e| io_error(src, e))?;
    entries.sort_by_key(DirEntry::file_name);

    fs::create_dir_all(dst).map_err(|e| io_error(dst, e))?;

    let ignored = options
        .ignore
        .as_ref()
        .map(|ignore| ignore(src, &entries))
        .unwrap_or_default();

    for entry in &entries {
        let name = entry.file_name();
        if ignored.contains(&name) {
            continue;
        }

        let src_path = src.join(&name);
        let dst_path = dst.join(&name);
        let entry_meta = fs::symlink_metadata(&src_path).map_err(|e| io_error(&src_path, e))?;
        log::debug!("Copying {} to {}", src_path.display(), dst_path.display());

        if entry_meta.file_type().is_symlink() {
            let link_to = resolve_link(&src_path)?;
            if options.symlinks {
                make_symlink(&link_to, &dst_path)?;
                continue;
            }

            match fs::metadata(&link_to) {
                Err(e)
                    if e.kind() == io::ErrorKind::NotFound && options.ignore_dangling_symlinks =>
                {
                    continue;
                }
                Err(e) => return Err(io_error(&link_to, e)),
                Ok(meta) if meta.is_dir() => copy_tree(&src_path, &dst_path, options)?,
                Ok(_) => (options.copy_function)(&src_path, &dst_path, Modes::default())?,
            }
        } else if entry_meta.is_dir() {
            copy_tree(&src_path, &dst_path, options)?;
        } else {
            (options.copy_function)(&src_path, &dst_path, Modes::default())?;
        }
    }

    fs::set_permissions(dst, src_meta.permissions()).map_err(|e| io_error(dst, e))
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> Result<(), CopyError> {
    std::os::unix::fs::symlink(target, link).map_err(|e| io_error(link, e))
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> Result<(), CopyError> {
    let result = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };
    result.map_err(|e| io_error(link, e))
}
