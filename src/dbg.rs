use std::panic::Location;
use std::path::Path;

/// Location of the caller as `file.rs:line`, without the directory.
///
/// Functions marked `#[track_caller]` that call this report their own
/// caller instead.
#[track_caller]
pub fn loc() -> String {
    let location = Location::caller();
    let file = Path::new(location.file())
        .file_name()
        .map_or_else(|| location.file().into(), |name| name.to_string_lossy());
    format!("{}:{}", file, location.line())
}
