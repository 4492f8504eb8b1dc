use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SliceError: {0}")]
    Slice(#[from] SliceError),
    #[error("SqlError: {0}")]
    Sql(#[from] SqlError),
    #[error("HeaderError: {0}")]
    Header(#[from] HeaderError),
    #[error("HttpError: {0}")]
    Http(#[from] HttpError),
    #[error("CopyError: {0}")]
    Copy(#[from] CopyError),
    #[error("TraceError: {0}")]
    Trace(#[from] TraceError),
    #[error("CryptoError: {0}")]
    Crypto(#[from] CryptoError),
    #[error("WaitError: {0}")]
    Wait(#[from] WaitError),
    #[error("HtmlError: {0}")]
    Html(#[from] HtmlError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceError {
    #[error("invalid number '{value}': {reason}")]
    InvalidNumber { value: String, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlError {
    #[error("invalid value '{0}'")]
    InvalidValue(String),
    #[error("unsupported format {0}")]
    UnsupportedFormat(&'static str),
    #[error("invalid integer '{value}': {source}")]
    InvalidInteger {
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("cannot scan {kind} into IP: {value}")]
    InvalidIp { kind: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("the Type field is mandatory")]
    MissingType,
    #[error("the Type field must be \"inline\" or \"attachment\", got \"{0}\"")]
    InvalidType(String),
    #[error("header value for {header} contains invalid bytes")]
    InvalidValue { header: &'static str },
}

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("cannot download {url}: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("code {status} while downloading {url}")]
    NotOk {
        url: String,
        status: String,
        body: Option<Vec<u8>>,
        path: Option<PathBuf>,
    },
    #[error("cannot derive a filename from {0}")]
    NoFilename(String),
    #[error("file I/O error at {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("{} and {} are the same file", src.display(), dst.display())]
    SameFile { src: PathBuf, dst: PathBuf },
    #[error("{} is not a regular file but a {kind}", path.display())]
    SpecialFile { path: PathBuf, kind: &'static str },
    #[error("{} already exists", .0.display())]
    Exists(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotDir(PathBuf),
    #[error("{}: {copied}/{expected} bytes copied", path.display())]
    ShortCopy {
        path: PathBuf,
        copied: u64,
        expected: u64,
    },
    #[error("file I/O error at {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CryptoError {
    #[error("invalid key size {0}, expected 16, 24 or 32 bytes")]
    InvalidKeyLength(usize),
    #[error("invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("ciphertext too short")]
    CiphertextTooShort,
    #[error("invalid padding")]
    InvalidPadding,
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    #[error("wait cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    #[error("invalid selector: {0}")]
    Selector(String),
}
