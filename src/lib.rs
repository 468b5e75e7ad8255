//! Authenticated, strictly versioned [Shamir's Secret Sharing](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing)
//! over GF(256).
//!
//! A secret is optionally sealed with ChaCha20-Poly1305, split byte-wise into
//! `total` shares of which any `threshold` recover it, and each share is
//! rendered as a canonical `FORMAT=2` text record. Recovery parses and
//! cross-checks the records, interpolates, and opens the seal, so a corrupted
//! or substituted share is reported as an error instead of silently producing
//! a different secret.
//!
//! # Usage
//!
//! ```
//! use sealshare::{recover_secret, split_secret_rng, Options};
//! use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};
//!
//! // Deterministic RNG for demonstration purposes only; see `split_secret`.
//! let mut rng = ChaCha20Rng::from_seed([0x90; 32]);
//! let options = Options::authenticated().with_associated_data(b"vault:prod");
//!
//! // Any 3 of these 5 records recover the secret
//! let records = split_secret_rng(b"correct horse battery staple", 3, 5, &options, &mut rng)
//!     .unwrap();
//! assert_eq!(records.len(), 5);
//! assert!(records[0].starts_with("FORMAT=2\nINDEX=1\nTHRESHOLD=3\nTOTAL=5\nDATA="));
//!
//! let secret = recover_secret(&records[1..4], &options).unwrap();
//! assert_eq!(secret, b"correct horse battery staple");
//! ```
//!
//! # Layers
//!
//! - [`field`]: GF(256) arithmetic over the AES polynomial `0x11B`.
//! - [`polynomial`]: Horner evaluation and Lagrange interpolation.
//! - [`SecretSharing`]: byte-wise split and recover, no authentication.
//! - [`aead`]: HKDF-SHA256 + ChaCha20-Poly1305 sealing of the payload.
//! - [`codec`]: the `FORMAT=2` share record.
//! - [`integrity`]: digests for storing records alongside.
//!
//! # Feature flags
//!
//! - `std` (default): enables [`split_secret`], [`SecretSharing::split`] and
//!   [`aead::encrypt`], which draw from `rand::thread_rng` / `OsRng`. Without
//!   `std`, use the `*_rng` variants and supply a `CryptoRng`.
//! - `zeroize_memory` (default): [`Share`] clears its payload on drop.
//!   Keys, polynomial coefficients and intermediate payloads are always cleared.
//! - `fuzzing`: derives `arbitrary::Arbitrary` for the public data types.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod aead;
pub mod codec;
mod error;
pub mod field;
pub mod integrity;
pub mod polynomial;
mod share;
mod sharing;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

pub use error::{ConsistencyError, Error, RecoveryError, Result, ValidationError};
pub use field::GF256;
pub use share::Share;
pub use sharing::{SecretSharing, SharingError};

/// How the payload is protected around the sharing step.
///
/// The same options must be used for [`split_secret`] and [`recover_secret`]:
/// authentication is part of the payload, not of the record format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options<'a> {
    /// Seal the secret with AEAD before splitting.
    pub authenticated: bool,
    /// Context bound into the seal. Only valid with `authenticated`.
    pub associated_data: Option<&'a [u8]>,
}

impl<'a> Options<'a> {
    /// Plain Shamir sharing: no tamper detection.
    pub const fn plain() -> Self {
        Options {
            authenticated: false,
            associated_data: None,
        }
    }

    pub const fn authenticated() -> Self {
        Options {
            authenticated: true,
            associated_data: None,
        }
    }

    pub const fn with_associated_data(self, associated_data: &'a [u8]) -> Self {
        Options {
            associated_data: Some(associated_data),
            ..self
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.associated_data.is_some() && !self.authenticated {
            return Err(ValidationError::AssociatedDataWithoutAuthentication);
        }
        Ok(())
    }
}

/// Shape of a set of share records, without any payload bytes.
///
/// This is what may be handed to reporting or audit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortSummary {
    pub threshold: u8,
    pub total: u8,
    /// Number of records supplied.
    pub supplied: usize,
    /// Share indices present, ascending.
    pub indices: Vec<u8>,
    /// Length of each share's payload.
    pub payload_len: usize,
}

impl CohortSummary {
    pub fn is_recoverable(&self) -> bool {
        self.supplied >= self.threshold as usize
    }

    /// How many more shares are needed before recovery can be attempted.
    pub fn missing(&self) -> usize {
        (self.threshold as usize).saturating_sub(self.supplied)
    }
}

/// Splits `secret` into `total` canonical share records, any `threshold` of
/// which recover it. Coefficients, salt and nonce are drawn from `rng`.
///
/// Fails without producing any record if a parameter is invalid.
pub fn split_secret_rng<R: RngCore + CryptoRng>(
    secret: &[u8],
    threshold: u8,
    total: u8,
    options: &Options<'_>,
    rng: &mut R,
) -> Result<Vec<String>> {
    options.validate()?;
    if secret.is_empty() {
        return Err(ValidationError::EmptySecret.into());
    }
    let sss = SecretSharing::new(threshold, total).map_err(|err| match err {
        SharingError::InvalidShareCount { threshold, total } => {
            ValidationError::InvalidShareCount { threshold, total }
        }
        _ => ValidationError::InvalidThreshold { threshold },
    })?;

    let payload = if options.authenticated {
        Zeroizing::new(
            aead::encrypt_rng(secret, options.associated_data, rng).map_err(Error::Encryption)?,
        )
    } else {
        Zeroizing::new(secret.to_vec())
    };

    let records = sss
        .split_rng(&payload, rng)
        .iter()
        .enumerate()
        .map(|(record, share)| {
            codec::encode_share(share).map_err(|source| Error::Format { record, source })
        })
        .collect::<Result<Vec<String>>>()?;

    debug!(
        threshold = sss.threshold(),
        total = sss.total(),
        authenticated = options.authenticated,
        payload_len = payload.len(),
        "split secret into share records"
    );

    Ok(records)
}

/// Same as [`split_secret_rng`], drawing randomness from `rand::thread_rng`.
#[cfg(feature = "std")]
pub fn split_secret(
    secret: &[u8],
    threshold: u8,
    total: u8,
    options: &Options<'_>,
) -> Result<Vec<String>> {
    let mut rng = rand::thread_rng();
    split_secret_rng(secret, threshold, total, options, &mut rng)
}

/// Recovers the secret from share records produced by [`split_secret`].
///
/// Every record must parse, all must come from one cohort, and at least
/// `threshold` of them must be present; otherwise nothing is recovered. With
/// `options.authenticated`, a payload that fails authentication is reported as
/// [`RecoveryError::Authentication`] and no plaintext is returned.
pub fn recover_secret<S: AsRef<str>>(records: &[S], options: &Options<'_>) -> Result<Vec<u8>> {
    options.validate()?;

    let shares = decode_records(records)?;
    let summary = check_cohort(&shares)?;
    if !summary.is_recoverable() {
        debug!(
            threshold = summary.threshold,
            supplied = summary.supplied,
            "not enough shares to recover"
        );
        return Err(ConsistencyError::InsufficientShares {
            threshold: summary.threshold,
            supplied: summary.supplied,
        }
        .into());
    }

    let mut payload =
        Zeroizing::new(SecretSharing::recover(&shares).map_err(RecoveryError::Interpolation)?);

    let secret = if options.authenticated {
        aead::decrypt(&payload, options.associated_data).map_err(|err| {
            warn!(
                threshold = summary.threshold,
                supplied = summary.supplied,
                "recovered payload failed authentication"
            );
            RecoveryError::Authentication(err)
        })?
    } else {
        core::mem::take(&mut *payload)
    };

    debug!(
        threshold = summary.threshold,
        total = summary.total,
        supplied = summary.supplied,
        authenticated = options.authenticated,
        "recovered secret"
    );

    Ok(secret)
}

/// Parses and cross-checks share records without recovering anything.
///
/// Applies the same checks as [`recover_secret`] except the threshold count,
/// which is reported through [`CohortSummary::is_recoverable`] instead.
pub fn inspect<S: AsRef<str>>(records: &[S]) -> Result<CohortSummary> {
    let shares = decode_records(records)?;
    check_cohort(&shares)
}

fn decode_records<S: AsRef<str>>(records: &[S]) -> Result<Vec<Share>> {
    if records.is_empty() {
        return Err(ValidationError::NoShares.into());
    }

    records
        .iter()
        .enumerate()
        .map(|(record, text)| {
            codec::decode(text.as_ref()).map_err(|source| {
                debug!(record, error = %source, "rejected share record");
                Error::Format { record, source }
            })
        })
        .collect()
}

// Records of one cohort agree on threshold, total and payload length, and
// never repeat an index.
fn check_cohort(shares: &[Share]) -> Result<CohortSummary> {
    let first = shares.first().ok_or(ValidationError::NoShares)?;
    let (threshold, total, payload_len) = (first.threshold, first.total, first.len());

    let mut seen: HashSet<u8> = HashSet::with_capacity(shares.len());
    for share in shares {
        if share.threshold != threshold || share.total != total {
            return Err(ConsistencyError::MismatchedParameters {
                index: share.index,
                threshold: share.threshold,
                total: share.total,
                expected_threshold: threshold,
                expected_total: total,
            }
            .into());
        }
        if !seen.insert(share.index) {
            return Err(ConsistencyError::DuplicateIndex { index: share.index }.into());
        }
        if share.len() != payload_len {
            return Err(ConsistencyError::InconsistentLength { index: share.index }.into());
        }
    }

    let mut indices: Vec<u8> = seen.into_iter().collect();
    indices.sort_unstable();

    Ok(CohortSummary {
        threshold,
        total,
        supplied: shares.len(),
        indices,
        payload_len,
    })
}
