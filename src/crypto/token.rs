//! Self-contained API tokens.
//!
//! A token carries `installation_shard_user_issued_seed_object` encrypted
//! with AES-ECB and PKCS#7 padding, hex encoded. The issue time and random
//! seed make every token unique; neither is checked on validation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{SecondsFormat, Utc};
use ecb::cipher::block_padding::Pkcs7;
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

const FIELD_COUNT: usize = 6;

/// The identifiers encoded in a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub installation_id: i64,
    pub shard: i64,
    pub user_id: i64,
    pub object_id: i64,
}

/// Generate a token for `data`. `key` is a base64 encoded AES key.
pub fn generate(key: &str, data: &TokenData) -> Result<String, CryptoError> {
    let key = STANDARD.decode(key)?;
    let seed: u32 = rand::rng().random_range(1..=1_000_000);

    let plaintext = format!(
        "{}_{}_{}_{}_{}_{}",
        data.installation_id,
        data.shard,
        data.user_id,
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        seed,
        data.object_id,
    );

    let encrypted = with_aes!(key, C => {
        ecb::Encryptor::<C>::new_from_slice(&key)
            .map(|cipher| cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes()))
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))
    })?;

    Ok(hex::encode(encrypted))
}

/// Decrypt `token` and parse the identifiers in it.
pub fn validate(key: &str, token: &str) -> Result<TokenData, CryptoError> {
    let key = STANDARD.decode(key)?;
    let encrypted = hex::decode(token)?;

    let decrypted = with_aes!(key, C => {
        ecb::Decryptor::<C>::new_from_slice(&key)
            .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&encrypted)
            .map_err(|_| CryptoError::InvalidPadding)
    })?;

    let plaintext = String::from_utf8(decrypted)
        .map_err(|_| CryptoError::InvalidToken("not valid UTF-8".to_string()))?;
    let parts: Vec<&str> = plaintext.split('_').collect();
    if parts.len() != FIELD_COUNT {
        return Err(CryptoError::InvalidToken(format!(
            "expected {FIELD_COUNT} fields, got {}",
            parts.len()
        )));
    }

    let field = |name: &str, value: &str| {
        value
            .parse::<i64>()
            .map_err(|e| CryptoError::InvalidToken(format!("{name} '{value}': {e}")))
    };

    Ok(TokenData {
        installation_id: field("installation id", parts[0])?,
        shard: field("shard", parts[1])?,
        user_id: field("user id", parts[2])?,
        object_id: field("object id", parts[5])?,
    })
}
