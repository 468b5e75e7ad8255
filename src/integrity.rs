// Digests handed to whoever persists share records, so a record can be
// checked for corruption on load before it ever reaches recovery.

use alloc::string::String;
use core::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("digest is not 64 hex characters")]
    InvalidDigest,

    #[error("share record does not match its digest")]
    Mismatch,
}

/// SHA-256 of one canonical share record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShareDigest(pub [u8; 32]);

impl ShareDigest {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(text: &str) -> Result<Self, IntegrityError> {
        let mut digest = [0u8; 32];
        hex::decode_to_slice(text, &mut digest).map_err(|_| IntegrityError::InvalidDigest)?;
        Ok(ShareDigest(digest))
    }
}

impl fmt::Debug for ShareDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShareDigest({})", self.to_hex())
    }
}

impl fmt::Display for ShareDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn digest(record: &str) -> ShareDigest {
    ShareDigest(Sha256::digest(record.as_bytes()).into())
}

pub fn verify(record: &str, expected: &ShareDigest) -> Result<(), IntegrityError> {
    if digest(record) == *expected {
        Ok(())
    } else {
        Err(IntegrityError::Mismatch)
    }
}
