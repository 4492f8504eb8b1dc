use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use rand::Rng;

use super::{BLOCK_SIZE, check_key};
use crate::error::CryptoError;

/// Encrypt `data` with AES-CFB under a fresh random IV.
///
/// The result is the IV followed by the ciphertext, encoded as URL-safe
/// base64 with padding.
pub fn encrypt(key: &str, data: &[u8]) -> Result<String, CryptoError> {
    let key = key.as_bytes();
    let mut iv = [0u8; BLOCK_SIZE];
    rand::rng().fill(&mut iv[..]);

    let mut buf = Vec::with_capacity(BLOCK_SIZE + data.len());
    buf.extend_from_slice(&iv);
    buf.extend_from_slice(data);

    with_aes!(key, C => {
        cfb_mode::Encryptor::<C>::new_from_slices(key, &iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .encrypt(&mut buf[BLOCK_SIZE..]);
        Ok(())
    })?;

    Ok(URL_SAFE.encode(&buf))
}

/// Decrypt text produced by [`encrypt`].
///
/// A wrong key is not detected: decryption then succeeds with garbage.
pub fn decrypt(key: &str, text: &str) -> Result<Vec<u8>, CryptoError> {
    let key = key.as_bytes();
    let mut data = URL_SAFE.decode(text)?;
    // Key errors take precedence over short input.
    check_key(key)?;

    if data.len() < BLOCK_SIZE {
        return Err(CryptoError::CiphertextTooShort);
    }
    let (iv, ciphertext) = data.split_at_mut(BLOCK_SIZE);

    with_aes!(key, C => {
        cfb_mode::Decryptor::<C>::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt(ciphertext);
        Ok(())
    })?;

    Ok(data.split_off(BLOCK_SIZE))
}
