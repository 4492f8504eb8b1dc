//! Stack traces attached to errors, and filtering of their frames.
//!
//! A captured stack travels with the error as a [`WithStack`] wrapper, which
//! keeps the wrapped error reachable through [`Error::source`].

mod filter;

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

pub use filter::{FilterMode, FilterPattern, filter_trace};

/// Boxed error used throughout this module.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Maximum number of frames kept by [`add_stack_trace`].
pub const MAX_STACK_FRAMES: usize = 25;

/// A resolved stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Demangled function path without the hash suffix, for example
    /// `utilbelt::trace::add_stack_trace`.
    pub function: String,
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: Option<PathBuf>, line: Option<u32>) -> Self {
        Self {
            function: function.into(),
            file,
            line,
        }
    }

    /// Module path of the function: everything before the last `::`.
    pub fn module_path(&self) -> &str {
        self.function
            .rsplit_once("::")
            .map_or(self.function.as_str(), |(module, _)| module)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)?;
        if let Some(file) = &self.file {
            write!(f, "\n\t{}", file.display())?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}

/// An error together with the stack it was recorded at.
#[derive(Debug)]
pub struct WithStack {
    source: BoxError,
    frames: Vec<Frame>,
}

impl WithStack {
    pub fn new(source: impl Into<BoxError>, frames: Vec<Frame>) -> Self {
        Self {
            source: source.into(),
            frames,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.source
    }
}

impl fmt::Display for WithStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl StdError for WithStack {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Attach the current stack to `err`, unless it already has one.
///
/// Frames from the capture machinery are dropped, as are leading frames
/// whose file starts with `ignore_prefix` (when it is not empty). At most
/// [`MAX_STACK_FRAMES`] frames are kept.
pub fn add_stack_trace(err: impl Into<BoxError>, ignore_prefix: &str) -> BoxError {
    let err = err.into();
    if err.is::<WithStack>() {
        return err;
    }

    let frames = capture_frames(ignore_prefix);
    log::debug!("Captured {} stack frames for: {}", frames.len(), err);
    Box::new(WithStack::new(err, frames))
}

fn capture_frames(ignore_prefix: &str) -> Vec<Frame> {
    let own_module = module_path!();
    let backtrace = backtrace::Backtrace::new();

    backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .map(|symbol| {
            let function = symbol
                .name()
                .map(|name| format!("{name:#}"))
                .unwrap_or_else(|| "<unknown>".to_string());
            Frame::new(function, symbol.filename().map(PathBuf::from), symbol.lineno())
        })
        .skip_while(|frame| {
            frame.function.starts_with("backtrace::")
                || frame.function.starts_with(own_module)
                || in_ignored_file(frame, ignore_prefix)
        })
        .take(MAX_STACK_FRAMES)
        .collect()
}

// Plain string prefix, so a partial file or directory name matches too.
fn in_ignored_file(frame: &Frame, ignore_prefix: &str) -> bool {
    !ignore_prefix.is_empty()
        && frame
            .file
            .as_ref()
            .is_some_and(|file| file.to_string_lossy().starts_with(ignore_prefix))
}

/// Find the deepest error in the `source()` chain that carries a stack.
pub fn earliest_stack<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a WithStack> {
    std::iter::successors(Some(err), |&e| e.source())
        .filter_map(|e| e.downcast_ref::<WithStack>())
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn not_found() -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, "could not read")
    }

    #[test]
    fn test_add_stack_trace() {
        let err = add_stack_trace(not_found(), "");
        let stack = err.downcast_ref::<WithStack>().expect("no stack attached");

        assert_eq!(err.to_string(), "could not read");
        assert!(stack.frames().len() <= MAX_STACK_FRAMES);
        assert!(
            stack
                .frames()
                .iter()
                .all(|frame| !frame.function.starts_with("backtrace::"))
        );
        assert!(stack.inner().downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_add_stack_trace_keeps_existing() {
        let frames = vec![Frame::new("app::main", None, None)];
        let err = add_stack_trace(WithStack::new(not_found(), frames.clone()), "");
        let stack = err.downcast_ref::<WithStack>().unwrap();
        assert_eq!(stack.frames(), frames.as_slice());
    }

    #[test]
    fn test_earliest_stack() {
        let plain = not_found();
        assert!(earliest_stack(&plain).is_none());

        let inner = WithStack::new(not_found(), vec![Frame::new("app::inner", None, None)]);
        let outer = WithStack::new(inner, vec![Frame::new("app::outer", None, None)]);

        let earliest = earliest_stack(&outer).expect("no stack found");
        assert_eq!(earliest.frames()[0].function, "app::inner");
    }

    #[test]
    fn test_in_ignored_file() {
        let frame = Frame::new("app::dump", Some(PathBuf::from("/src/dump.rs")), Some(7));
        assert!(in_ignored_file(&frame, "/src/d"));
        assert!(in_ignored_file(&frame, "/src/dump.rs"));
        assert!(!in_ignored_file(&frame, "/src/x"));
        assert!(!in_ignored_file(&frame, ""));
        assert!(!in_ignored_file(&Frame::new("app::dump", None, None), "/src"));
    }

    #[test]
    fn test_capture_frames_ignore_prefix() {
        let all = capture_frames("");
        let first_file = all
            .iter()
            .find_map(|frame| frame.file.as_ref())
            .map(|file| file.to_string_lossy().into_owned());

        if let Some(first_file) = first_file {
            let frames = capture_frames(&first_file);
            assert!(
                frames
                    .first()
                    .and_then(|frame| frame.file.as_ref())
                    .is_none_or(|file| file.to_string_lossy() != first_file)
            );
        }
    }

    #[test]
    fn test_frame_module_path() {
        assert_eq!(Frame::new("app::db::query", None, None).module_path(), "app::db");
        assert_eq!(Frame::new("main", None, None).module_path(), "main");
    }

    #[test]
    fn test_frame_display() {
        let frame = Frame::new("app::run", Some(PathBuf::from("/src/app.rs")), Some(12));
        assert_eq!(frame.to_string(), "app::run\n\t/src/app.rs:12");
        assert_eq!(Frame::new("app::run", None, Some(3)).to_string(), "app::run");
    }
}
