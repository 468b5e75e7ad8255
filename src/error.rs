//! Errors surfaced by [`split_secret`](crate::split_secret),
//! [`recover_secret`](crate::recover_secret) and [`inspect`](crate::inspect).
//!
//! Messages carry counts and indices at most, never secret or payload bytes.

use thiserror::Error;

use crate::aead::AeadError;
use crate::codec::FormatError;
use crate::sharing::SharingError;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("malformed share record {record}: {source}")]
    Format {
        /// Position of the offending record in the caller's input, from 0.
        record: usize,
        source: FormatError,
    },

    #[error("inconsistent share cohort: {0}")]
    Consistency(#[from] ConsistencyError),

    #[error("recovery failed: {0}")]
    Recovery(#[from] RecoveryError),

    #[error("failed to seal the secret")]
    Encryption(#[source] AeadError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("secret must not be empty")]
    EmptySecret,

    #[error("threshold must be at least 2, got {threshold}")]
    InvalidThreshold { threshold: u8 },

    #[error("total shares ({total}) must be at least the threshold ({threshold})")]
    InvalidShareCount { threshold: u8, total: u8 },

    #[error("no share records provided")]
    NoShares,

    #[error("associated data requires authenticated mode")]
    AssociatedDataWithoutAuthentication,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error(
        "share {index} was split as {threshold} of {total}, \
         expected {expected_threshold} of {expected_total}"
    )]
    MismatchedParameters {
        index: u8,
        threshold: u8,
        total: u8,
        expected_threshold: u8,
        expected_total: u8,
    },

    #[error("share index {index} appears more than once")]
    DuplicateIndex { index: u8 },

    #[error("share {index} payload length differs from the rest of the cohort")]
    InconsistentLength { index: u8 },

    #[error("{supplied} shares supplied, threshold is {threshold}")]
    InsufficientShares { threshold: u8, supplied: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("share interpolation failed")]
    Interpolation(#[source] SharingError),

    #[error("recovered payload failed authentication")]
    Authentication(#[source] AeadError),
}
