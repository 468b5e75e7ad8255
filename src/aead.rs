//! Authenticated encryption of the payload before it is split.
//!
//! Plain Shamir shares carry no integrity: a corrupted or substituted share
//! silently recovers a different secret. Sealing the secret with
//! ChaCha20-Poly1305 first turns any such corruption into an authentication
//! failure once enough shares are combined.
//!
//! # Blob layout
//!
//! ```text
//! SALT (16) || NONCE (12) || CIPHERTEXT || TAG (16)
//! ```
//!
//! The key is derived per call with HKDF-SHA256 from the random salt and
//! nonce, both of which travel inside the blob. Confidentiality of the blob
//! as a whole comes from the sharing layer: fewer than `threshold` shares
//! reveal nothing about it, salt and nonce included.

use alloc::vec::Vec;

use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use hkdf::Hkdf;
use rand::{CryptoRng, RngCore};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

pub const KEY_LEN: usize = 32;
pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;
/// Bytes preceding the ciphertext in a sealed blob.
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

// Binds derived keys to this construction and format version.
const KDF_INFO: &[u8] = b"sealshare-aead-v2";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AeadError {
    #[error("secret must not be empty")]
    InvalidInput,

    #[error("sealed blob is {len} bytes, shorter than its 28 byte header")]
    InvalidFormat { len: usize },

    #[error("authentication failed")]
    AuthenticationFailure,

    #[error("failed to encrypt")]
    EncryptionFailure,

    #[error("key derivation failed")]
    KeyDerivation,
}

/// Seals `secret`, drawing salt and nonce from `rng`.
pub fn encrypt_rng<R: RngCore + CryptoRng>(
    secret: &[u8],
    associated_data: Option<&[u8]>,
    rng: &mut R,
) -> Result<Vec<u8>, AeadError> {
    if secret.is_empty() {
        return Err(AeadError::InvalidInput);
    }

    let mut header = [0u8; HEADER_LEN];
    rng.fill_bytes(&mut header);
    let (salt, nonce) = header.split_at(SALT_LEN);

    let cipher = derive_cipher(salt, nonce)?;
    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: secret,
                aad: associated_data.unwrap_or_default(),
            },
        )
        .map_err(|_| AeadError::EncryptionFailure)?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.extend_from_slice(&header);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Seals `secret` with salt and nonce from the operating system RNG.
#[cfg(feature = "std")]
pub fn encrypt(secret: &[u8], associated_data: Option<&[u8]>) -> Result<Vec<u8>, AeadError> {
    encrypt_rng(secret, associated_data, &mut rand::rngs::OsRng)
}

/// Opens a blob produced by [`encrypt_rng`]. Either the whole plaintext is
/// returned or an error; a blob that fails authentication yields no bytes.
pub fn decrypt(blob: &[u8], associated_data: Option<&[u8]>) -> Result<Vec<u8>, AeadError> {
    if blob.len() < HEADER_LEN {
        return Err(AeadError::InvalidFormat { len: blob.len() });
    }

    let (salt, rest) = blob.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let cipher = derive_cipher(salt, nonce)?;
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: associated_data.unwrap_or_default(),
            },
        )
        .map_err(|_| AeadError::AuthenticationFailure)
}

fn derive_cipher(salt: &[u8], nonce: &[u8]) -> Result<ChaCha20Poly1305, AeadError> {
    let prk = Hkdf::<Sha256>::new(Some(salt), nonce);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    prk.expand(KDF_INFO, key.as_mut())
        .map_err(|_| AeadError::KeyDerivation)?;

    Ok(ChaCha20Poly1305::new(Key::from_slice(key.as_ref())))
}
