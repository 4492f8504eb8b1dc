//! AES helpers.
//!
//! Keys select the AES variant by length: 16, 24 or 32 bytes for AES-128,
//! AES-192 and AES-256.

use crate::error::CryptoError;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

// Evaluate `$body` with `$cipher` bound to the AES type matching the key
// length, or fail with `InvalidKeyLength`.
macro_rules! with_aes {
    ($key:expr, $cipher:ident => $body:expr) => {
        match $key.len() {
            16 => {
                type $cipher = ::aes::Aes128;
                $body
            }
            24 => {
                type $cipher = ::aes::Aes192;
                $body
            }
            32 => {
                type $cipher = ::aes::Aes256;
                $body
            }
            n => Err(CryptoError::InvalidKeyLength(n)),
        }
    };
}

pub mod aes; // CFB with a random IV, base64 text
pub mod token; // Encrypted API tokens

fn check_key(key: &[u8]) -> Result<(), CryptoError> {
    match key.len() {
        16 | 24 | 32 => Ok(()),
        n => Err(CryptoError::InvalidKeyLength(n)),
    }
}
