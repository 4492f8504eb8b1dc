//! Image type detection from the leading bytes of a file.
//!
//! This is the image subset of the WHATWG MIME sniffing table, which makes it
//! a lot cheaper than general-purpose content sniffing.

use std::io::{self, Read, Seek, SeekFrom};

/// Number of bytes needed to make a decision.
pub const SNIFF_LEN: usize = 14;

enum Signature {
    Exact(&'static [u8]),
    Masked {
        mask: &'static [u8; SNIFF_LEN],
        pattern: &'static [u8; SNIFF_LEN],
    },
}

impl Signature {
    fn matches(&self, data: &[u8]) -> bool {
        match self {
            Signature::Exact(sig) => data.starts_with(sig),
            Signature::Masked { mask, pattern } => {
                data.len() >= mask.len()
                    && mask
                        .iter()
                        .zip(pattern.iter())
                        .zip(data)
                        .all(|((m, p), d)| d & m == *p)
            }
        }
    }
}

const SIGNATURES: &[(Signature, &str)] = &[
    (Signature::Exact(b"GIF87a"), "image/gif"),
    (Signature::Exact(b"GIF89a"), "image/gif"),
    (Signature::Exact(b"\x89PNG\r\n\x1a\n"), "image/png"),
    (Signature::Exact(b"\xFF\xD8\xFF"), "image/jpeg"),
    (Signature::Exact(b"BM"), "image/bmp"),
    (Signature::Exact(b"\x00\x00\x01\x00"), "image/vnd.microsoft.icon"),
    (
        Signature::Masked {
            mask: b"\xFF\xFF\xFF\xFF\x00\x00\x00\x00\xFF\xFF\xFF\xFF\xFF\xFF",
            pattern: b"RIFF\x00\x00\x00\x00WEBPVP",
        },
        "image/webp",
    ),
];

/// Detect the image MIME type of `data`, or `None` if it is not a
/// recognised image format.
pub fn detect_image(data: &[u8]) -> Option<&'static str> {
    let data = &data[..data.len().min(SNIFF_LEN)];
    SIGNATURES
        .iter()
        .find(|(sig, _)| sig.matches(data))
        .map(|(_, content_type)| *content_type)
}

/// Like [`detect_image`], but reads from a stream. Only the bytes needed
/// are read, and the stream is rewound to where it was.
pub fn detect_image_stream<R: Read + Seek>(reader: &mut R) -> io::Result<Option<&'static str>> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    let n = reader.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut head)?;

    let content_type = detect_image(&head);
    reader.seek(SeekFrom::Current(-(n as i64)))?;
    Ok(content_type)
}
