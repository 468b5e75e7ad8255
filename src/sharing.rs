// Byte-wise Shamir split and recover over GF(256).

use alloc::vec::Vec;

use hashbrown::HashSet;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use super::field::{DivisionByZero, GF256};
use super::polynomial;
use super::share::Share;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingError {
    #[error("threshold must be at least 2, got {threshold}")]
    InvalidThreshold { threshold: u8 },

    #[error("total shares ({total}) must be at least the threshold ({threshold})")]
    InvalidShareCount { threshold: u8, total: u8 },

    #[error("no shares provided")]
    NoShares,

    #[error("share index 0 is not a valid evaluation point")]
    InvalidShareIndex,

    #[error("all shares must have the same length")]
    InconsistentShareLength,

    #[error("share index {index} appears more than once")]
    DuplicateShareIndex { index: u8 },

    #[error("interpolation failed")]
    Interpolation(#[from] DivisionByZero),
}

/// Splits secrets into shares over GF(256) and recovers them.
///
/// Usage example:
/// ```
/// use sealshare::SecretSharing;
/// use rand_chacha::{rand_core::SeedableRng, ChaCha20Rng};
///
/// // 3 of 5 shares are needed to recover the secret
/// let sss = SecretSharing::new(3, 5).unwrap();
/// // Deterministic RNG for demonstration purposes only
/// let mut rng = ChaCha20Rng::from_seed([0x90; 32]);
/// let shares = sss.split_rng(&[1, 2, 3, 4], &mut rng);
/// assert_eq!(shares.len(), 5);
///
/// let secret = SecretSharing::recover(&shares[1..4]).unwrap();
/// assert_eq!(secret, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSharing {
    threshold: u8,
    total: u8,
}

impl SecretSharing {
    pub fn new(threshold: u8, total: u8) -> Result<Self, SharingError> {
        if threshold < 2 {
            return Err(SharingError::InvalidThreshold { threshold });
        }
        if total < threshold {
            return Err(SharingError::InvalidShareCount { threshold, total });
        }
        Ok(Self { threshold, total })
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    /// This method is useful when `std` is not available, and in tests that
    /// need a reproducible cohort. For typical usage see the `split` method.
    ///
    /// Every byte of `secret` gets its own random polynomial of degree
    /// `threshold - 1`, evaluated at `x = 1..=total`. Returns exactly `total`
    /// shares, in index order, each as long as `secret`.
    pub fn split_rng<R: RngCore + CryptoRng>(&self, secret: &[u8], rng: &mut R) -> Vec<Share> {
        let mut payloads: Vec<Vec<u8>> = (0..self.total)
            .map(|_| Vec::with_capacity(secret.len()))
            .collect();

        for byte in secret {
            let poly = polynomial::random_polynomial(GF256(*byte), self.threshold, rng);
            for (x, payload) in (1..=self.total).zip(payloads.iter_mut()) {
                payload.push(polynomial::evaluate(&poly, GF256(x)).0);
            }
        }

        (1..=self.total)
            .zip(payloads)
            .map(|(index, payload)| Share {
                index,
                threshold: self.threshold,
                total: self.total,
                payload,
            })
            .collect()
    }

    /// Same as `split_rng`, drawing coefficients from the thread-local CSPRNG.
    #[cfg(feature = "std")]
    pub fn split(&self, secret: &[u8]) -> Vec<Share> {
        let mut rng = rand::thread_rng();
        self.split_rng(secret, &mut rng)
    }

    /// Interpolates every payload position of `shares` at `x = 0`.
    ///
    /// This has no knowledge of the threshold the cohort was split with: given
    /// fewer shares than that, it returns meaningless bytes rather than an error.
    /// Callers that need to detect that case must compare against the threshold
    /// carried by the shares, as [`crate::recover_secret`] does.
    pub fn recover(shares: &[Share]) -> Result<Vec<u8>, SharingError> {
        let first = shares.first().ok_or(SharingError::NoShares)?;
        let share_length = first.len();
        let mut indices: HashSet<u8> = HashSet::with_capacity(shares.len());

        for share in shares {
            if share.index == 0 {
                return Err(SharingError::InvalidShareIndex);
            }
            if share.len() != share_length {
                return Err(SharingError::InconsistentShareLength);
            }
            if !indices.insert(share.index) {
                return Err(SharingError::DuplicateShareIndex { index: share.index });
            }
        }

        // The x coordinates are the same for every byte, so the basis is
        // evaluated at zero once per recovery.
        let xs: Vec<GF256> = shares.iter().map(|share| GF256(share.index)).collect();
        let weights = polynomial::lagrange_weights(&xs, GF256::ZERO)?;

        let secret = (0..share_length)
            .map(|position| {
                shares
                    .iter()
                    .zip(weights.iter())
                    .map(|(share, &weight)| GF256(share.payload[position]) * weight)
                    .sum::<GF256>()
                    .0
            })
            .collect();

        Ok(secret)
    }
}
