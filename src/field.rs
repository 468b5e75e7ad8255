// Arithmetic over GF(2^8) reduced by the AES polynomial.
//
// Multiplication is table-free and does not branch on operand values, so the
// timing of an evaluation does not depend on the secret bytes flowing through it.

use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub};

#[cfg(feature = "fuzzing")]
use arbitrary::Arbitrary;
use thiserror::Error;
use zeroize::Zeroize;

/// The irreducible polynomial x^8 + x^4 + x^3 + x + 1 (Rijndael).
pub const IRREDUCIBLE_POLY: u16 = 0x11b;

// Low byte of the polynomial, xor-ed in whenever a shift overflows bit 7.
const REDUCTION: u8 = (IRREDUCIBLE_POLY & 0xff) as u8;

/// Returned when inverting or dividing by the zero element.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("zero has no multiplicative inverse in GF(256)")]
pub struct DivisionByZero;

/// An element of GF(256).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Zeroize)]
#[cfg_attr(feature = "fuzzing", derive(Arbitrary))]
pub struct GF256(pub u8);

impl GF256 {
    pub const ZERO: GF256 = GF256(0);
    pub const ONE: GF256 = GF256(1);

    /// Raises `self` to `exponent` by square-and-multiply.
    pub fn pow(self, mut exponent: u32) -> GF256 {
        let mut result = GF256::ONE;
        let mut base = self;

        while exponent > 0 {
            if exponent & 1 == 1 {
                result *= base;
            }
            base *= base;
            exponent >>= 1;
        }

        result
    }

    /// Multiplicative inverse, computed as `self^254` (Fermat).
    pub fn inv(self) -> Result<GF256, DivisionByZero> {
        if self.0 == 0 {
            return Err(DivisionByZero);
        }
        Ok(self.pow(254))
    }

    pub fn checked_div(self, rhs: GF256) -> Result<GF256, DivisionByZero> {
        Ok(self * rhs.inv()?)
    }
}

impl Add for GF256 {
    type Output = GF256;

    fn add(self, rhs: GF256) -> GF256 {
        GF256(self.0 ^ rhs.0)
    }
}

impl AddAssign for GF256 {
    fn add_assign(&mut self, rhs: GF256) {
        self.0 ^= rhs.0;
    }
}

// Characteristic 2: subtraction is addition.
impl Sub for GF256 {
    type Output = GF256;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: GF256) -> GF256 {
        GF256(self.0 ^ rhs.0)
    }
}

impl Mul for GF256 {
    type Output = GF256;

    fn mul(self, rhs: GF256) -> GF256 {
        let mut a = self.0;
        let mut b = rhs.0;
        let mut product = 0u8;

        for _ in 0..8 {
            // 0xff when the low bit of b is set, 0x00 otherwise
            product ^= a & (b & 1).wrapping_neg();
            let carry = (a >> 7).wrapping_neg();
            a = (a << 1) ^ (carry & REDUCTION);
            b >>= 1;
        }

        GF256(product)
    }
}

impl MulAssign for GF256 {
    fn mul_assign(&mut self, rhs: GF256) {
        *self = *self * rhs;
    }
}

impl Sum for GF256 {
    fn sum<I: Iterator<Item = GF256>>(iter: I) -> GF256 {
        iter.fold(GF256::ZERO, |acc, x| acc + x)
    }
}

impl Product for GF256 {
    fn product<I: Iterator<Item = GF256>>(iter: I) -> GF256 {
        iter.fold(GF256::ONE, |acc, x| acc * x)
    }
}
