//! Builders for structured response headers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_SECURITY_POLICY, HeaderMap, HeaderValue};
use url::form_urlencoded;

use crate::error::HeaderError;

/// The disposition-type of a `Content-Disposition` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispositionType {
    Inline,
    Attachment,
}

impl DispositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispositionType::Inline => "inline",
            DispositionType::Attachment => "attachment",
        }
    }
}

impl FromStr for DispositionType {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(HeaderError::MissingType),
            "inline" => Ok(DispositionType::Inline),
            "attachment" => Ok(DispositionType::Attachment),
            other => Err(HeaderError::InvalidType(other.to_string())),
        }
    }
}

/// Arguments for [`set_content_disposition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispositionArgs {
    pub kind: DispositionType,
    pub filename: Option<String>,
}

impl DispositionArgs {
    pub fn inline() -> Self {
        Self {
            kind: DispositionType::Inline,
            filename: None,
        }
    }

    pub fn attachment() -> Self {
        Self {
            kind: DispositionType::Attachment,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Set `Content-Disposition`, replacing any previous value.
///
/// `\` and `%` are stripped from the filename, `"` is escaped and control
/// characters are dropped. Characters above U+00FF cannot go in the plain
/// `filename` parameter; when present, the full name is also sent as an
/// RFC 5987 `filename*` parameter.
///
/// # Examples
///
/// ```
/// use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};
/// use utilbelt::http::header::{DispositionArgs, set_content_disposition};
///
/// let mut headers = HeaderMap::new();
/// set_content_disposition(&mut headers, &DispositionArgs::inline().with_filename("h€llo.pdf"))
///     .unwrap();
/// assert_eq!(
///     headers[CONTENT_DISPOSITION],
///     "inline; filename=\"hllo.pdf\"; filename*=UTF-8''h%E2%82%ACllo.pdf"
/// );
/// ```
pub fn set_content_disposition(
    headers: &mut HeaderMap,
    args: &DispositionArgs,
) -> Result<(), HeaderError> {
    let mut value = args.kind.as_str().to_string();

    if let Some(filename) = args.filename.as_deref().filter(|f| !f.is_empty()) {
        let escaped = filename
            .replace(['\\', '%'], "")
            .replace('"', "\\\"");
        let (full, latin1, has_wide) = split_filename(&escaped);

        value.push_str(&format!("; filename=\"{latin1}\""));
        if has_wide {
            let encoded: String = form_urlencoded::byte_serialize(full.as_bytes()).collect();
            value.push_str(&format!("; filename*=UTF-8''{encoded}"));
        }
    }

    let value = HeaderValue::from_bytes(value.as_bytes()).map_err(|_| HeaderError::InvalidValue {
        header: "Content-Disposition",
    })?;
    headers.insert(CONTENT_DISPOSITION, value);
    Ok(())
}

// Drop control characters, then split off a copy without anything above
// U+00FF.
fn split_filename(s: &str) -> (String, String, bool) {
    let full: String = s.chars().filter(|c| !c.is_control()).collect();
    let latin1: String = full.chars().filter(|&c| u32::from(c) <= 0xFF).collect();
    let has_wide = full.chars().any(|c| u32::from(c) > 0xFF);
    (full, latin1, has_wide)
}

/// `'self'`
pub const CSP_SOURCE_SELF: &str = "'self'";
/// `'none'`
pub const CSP_SOURCE_NONE: &str = "'none'";
/// `'unsafe-inline'`
pub const CSP_SOURCE_UNSAFE_INLINE: &str = "'unsafe-inline'";
/// `'unsafe-eval'`
pub const CSP_SOURCE_UNSAFE_EVAL: &str = "'unsafe-eval'";
/// `data:`
pub const CSP_SOURCE_DATA: &str = "data:";
/// `https:`
pub const CSP_SOURCE_HTTPS: &str = "https:";

/// A Content-Security-Policy directive. Directives are emitted in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CspDirective {
    DefaultSrc,
    ConnectSrc,
    ChildSrc,
    FontSrc,
    FrameSrc,
    ImgSrc,
    ManifestSrc,
    MediaSrc,
    ObjectSrc,
    ScriptSrc,
    StyleSrc,
    WorkerSrc,
    BaseUri,
    FormAction,
    FrameAncestors,
    PluginTypes,
    Sandbox,
    ReportUri,
    BlockAllMixedContent,
    UpgradeInsecureRequests,
}

impl CspDirective {
    pub fn as_str(&self) -> &'static str {
        match self {
            CspDirective::DefaultSrc => "default-src",
            CspDirective::ConnectSrc => "connect-src",
            CspDirective::ChildSrc => "child-src",
            CspDirective::FontSrc => "font-src",
            CspDirective::FrameSrc => "frame-src",
            CspDirective::ImgSrc => "img-src",
            CspDirective::ManifestSrc => "manifest-src",
            CspDirective::MediaSrc => "media-src",
            CspDirective::ObjectSrc => "object-src",
            CspDirective::ScriptSrc => "script-src",
            CspDirective::StyleSrc => "style-src",
            CspDirective::WorkerSrc => "worker-src",
            CspDirective::BaseUri => "base-uri",
            CspDirective::FormAction => "form-action",
            CspDirective::FrameAncestors => "frame-ancestors",
            CspDirective::PluginTypes => "plugin-types",
            CspDirective::Sandbox => "sandbox",
            CspDirective::ReportUri => "report-uri",
            CspDirective::BlockAllMixedContent => "block-all-mixed-content",
            CspDirective::UpgradeInsecureRequests => "upgrade-insecure-requests",
        }
    }
}

impl fmt::Display for CspDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sources per directive. A directive with no sources is emitted bare, which
/// is what flags such as `upgrade-insecure-requests` need.
pub type CspArgs = BTreeMap<CspDirective, Vec<String>>;

/// Render a policy as a header value.
pub fn csp_value(args: &CspArgs) -> String {
    args.iter()
        .map(|(directive, sources)| {
            let mut entry = directive.as_str().to_string();
            for source in sources {
                entry.push(' ');
                entry.push_str(source);
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Set `Content-Security-Policy`, replacing any previous value. An empty
/// policy sets an empty header.
pub fn set_csp(headers: &mut HeaderMap, args: &CspArgs) -> Result<(), HeaderError> {
    let value = HeaderValue::from_str(&csp_value(args)).map_err(|_| HeaderError::InvalidValue {
        header: "Content-Security-Policy",
    })?;
    headers.insert(CONTENT_SECURITY_POLICY, value);
    Ok(())
}
