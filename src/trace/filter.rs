use std::path::Path;

use glob::{MatchOptions, Pattern};
use regex::Regex;

use super::{BoxError, Frame, WithStack};
use crate::error::TraceError;

/// How a [`FilterPattern`] treats the frames it hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Drop frames that match, keep everything else.
    Exclude,
    /// Keep only frames that match.
    Include,
}

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled frame patterns for [`filter_trace`].
#[derive(Debug, Clone)]
pub struct FilterPattern {
    mode: FilterMode,
    files: Vec<String>,
    modules: Vec<String>,
    globs: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl FilterPattern {
    /// Compile `paths` into a pattern set:
    ///
    /// - `re:<regex>` is matched against the frame's file path
    /// - `match:<glob>` is matched against the file path; `*` does not cross `/`
    /// - paths ending in `.rs` must equal the file path
    /// - anything else is a prefix of the function's module path, for
    ///   example `tokio::runtime`
    pub fn new(mode: FilterMode, paths: &[&str]) -> Result<Self, TraceError> {
        let mut pattern = Self {
            mode,
            files: Vec::new(),
            modules: Vec::new(),
            globs: Vec::new(),
            regexes: Vec::new(),
        };

        for path in paths {
            if let Some(glob) = path.strip_prefix("match:") {
                let compiled = Pattern::new(glob).map_err(|source| TraceError::InvalidGlob {
                    pattern: glob.to_string(),
                    source,
                })?;
                pattern.globs.push(compiled);
            } else if let Some(re) = path.strip_prefix("re:") {
                let compiled = Regex::new(re).map_err(|source| TraceError::InvalidRegex {
                    pattern: re.to_string(),
                    source,
                })?;
                pattern.regexes.push(compiled);
            } else if path.ends_with(".rs") {
                pattern.files.push(path.to_string());
            } else {
                pattern.modules.push(path.to_string());
            }
        }

        Ok(pattern)
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Whether `frame` should be dropped from a trace.
    pub fn matches(&self, frame: &Frame) -> bool {
        let hit = self.hits(frame);
        match self.mode {
            FilterMode::Exclude => hit,
            FilterMode::Include => !hit,
        }
    }

    fn hits(&self, frame: &Frame) -> bool {
        let file = frame
            .file
            .as_deref()
            .map(Path::to_string_lossy)
            .unwrap_or_default();

        if self.files.iter().any(|f| *f == file) {
            return true;
        }

        let module = frame.module_path();
        if self.modules.iter().any(|m| module.starts_with(m.as_str())) {
            return true;
        }

        self.globs
            .iter()
            .any(|glob| glob.matches_with(&file, GLOB_OPTIONS))
            || self.regexes.iter().any(|re| re.is_match(&file))
    }
}

/// Remove the frames selected by `pattern` from the stack carried by `err`.
///
/// Errors without a stack are returned as they are. If every frame would be
/// removed the full stack is kept, since an empty trace is never useful.
pub fn filter_trace(err: BoxError, pattern: &FilterPattern) -> BoxError {
    let mut stack = match err.downcast::<WithStack>() {
        Ok(stack) => stack,
        Err(err) => return err,
    };

    let kept: Vec<Frame> = stack
        .frames
        .iter()
        .filter(|frame| !pattern.matches(frame))
        .cloned()
        .collect();

    if kept.is_empty() {
        log::warn!(
            "All {} stack frames filtered; keeping full trace",
            stack.frames.len()
        );
    } else {
        stack.frames = kept;
    }
    stack
}
