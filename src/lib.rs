//! Small, independent helpers that fill gaps around the standard library.
//!
//! Every module stands on its own; nothing here shares runtime state with
//! anything else. Fallible operations return the per-module error types
//! from [`error`], all of which convert into the crate-level [`Error`].
//!
//! # Examples
//!
//! ```
//! use utilbelt::text;
//! use utilbelt::image;
//!
//! assert_eq!(text::left("Hello", 4), "Hell…");
//! assert_eq!(image::detect_image(b"GIF89a......"), Some("image/gif"));
//! ```

pub use error::Error;

/// Text and byte helpers
pub mod bytes; // Latin-1 decoding
pub mod html; // Attribute stripping and link extraction
pub mod json; // Panicking serde_json shorthands
pub mod text; // Truncation, line access, unprintable removal

/// Collections and numbers
pub mod maps; // Map inversion
pub mod math; // Rounding, set complements, byte sizes
pub mod options; // Option and zero-value fallbacks
pub mod slices; // Set operations over slices

/// Time
pub mod calendar; // Day boundaries and period grouping

/// Storage and I/O
pub mod fs; // Reader duplication and file tree copying
pub mod sql; // Column codecs and query interpolation

/// Network
pub mod http; // Header builders, body dumps, downloads
pub mod net; // Host and IP address helpers

/// Content inspection and security
pub mod crypto; // AES helpers and API tokens
pub mod image; // Image MIME sniffing

/// Diagnostics and concurrency
pub mod dbg; // Caller locations
pub mod error; // Error handling
pub mod sync; // Shared maps and wait groups
pub mod trace; // Stack capture and frame filtering

pub type Result<T> = std::result::Result<T, Error>;
