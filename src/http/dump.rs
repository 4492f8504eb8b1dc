use std::io::{self, Cursor, Read, Write};

use reqwest::header::{HeaderMap, TRANSFER_ENCODING};

use crate::fs::dump_reader;

/// Whether the first transfer coding in `headers` is `chunked`.
pub fn is_chunked(headers: &HeaderMap) -> bool {
    headers
        .get(TRANSFER_ENCODING)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .is_some_and(|coding| coding.trim().eq_ignore_ascii_case("chunked"))
}

/// Read a request body for logging without losing it.
///
/// Returns the dump together with a reader that replays the complete body,
/// to be put back in place of the consumed one. At most `max_size` bytes are
/// dumped (`None` dumps everything). When `chunked` is set the dump is
/// written in chunked transfer coding, including the empty final chunk.
pub fn dump_body<R: Read>(
    body: R,
    max_size: Option<u64>,
    chunked: bool,
) -> io::Result<(Vec<u8>, Cursor<Vec<u8>>)> {
    let (save, mut body) = dump_reader(body)?;

    let mut data = Vec::new();
    match max_size {
        Some(limit) => body.take(limit).read_to_end(&mut data)?,
        None => body.read_to_end(&mut data)?,
    };

    if !chunked {
        return Ok((data, save));
    }

    let mut dump = Vec::with_capacity(data.len() + 16);
    if !data.is_empty() {
        write!(dump, "{:x}\r\n", data.len())?;
        dump.extend_from_slice(&data);
        dump.extend_from_slice(b"\r\n");
    }
    dump.extend_from_slice(b"0\r\n\r\n");
    Ok((dump, save))
}
