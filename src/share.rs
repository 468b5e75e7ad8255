use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;

#[cfg(feature = "zeroize_memory")]
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One share of a cohort: the evaluations of every byte polynomial at `x = index`,
/// together with the parameters the cohort was split with.
///
/// Usage example:
/// ```
/// use sealshare::{codec, Share};
///
/// let share = Share {
///     index: 1,
///     threshold: 2,
///     total: 3,
///     payload: vec![0xde, 0xad],
/// };
/// let record = codec::encode_share(&share).unwrap();
/// assert_eq!(codec::decode(&record).unwrap(), share);
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
#[cfg_attr(feature = "zeroize_memory", derive(Zeroize, ZeroizeOnDrop))]
pub struct Share {
    /// The x coordinate of the share, never 0.
    pub index: u8,
    /// Minimum number of shares of this cohort needed for recovery.
    pub threshold: u8,
    /// Number of shares produced for this cohort.
    pub total: u8,
    /// The y coordinates of the share, one per payload byte.
    pub payload: Vec<u8>,
}

impl Share {
    /// Length in bytes of the shared payload.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

// We don't want to risk debug-logging share contents, so implement `Debug`
// manually and omit the payload bytes.
impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("index", &self.index)
            .field("threshold", &self.threshold)
            .field("total", &self.total)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
