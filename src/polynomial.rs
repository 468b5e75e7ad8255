// Polynomial evaluation and interpolation over GF(256), the two halves of
// computing Shamir's shares and recovering secrets from them.

use alloc::vec::Vec;

use rand::{CryptoRng, Rng, RngCore};
use zeroize::Zeroizing;

use super::field::{DivisionByZero, GF256};

/// Evaluates the polynomial at `x` with Horner's method.
/// `coefficients[0]` is the constant term.
pub fn evaluate(coefficients: &[GF256], x: GF256) -> GF256 {
    coefficients
        .iter()
        .rev()
        .fold(GF256::ZERO, |acc, &c| acc * x + c)
}

/// Returns the value at `x` of the lowest-degree polynomial passing through `points`,
/// using [Lagrange interpolation](https://en.wikipedia.org/wiki/Lagrange_polynomial).
/// Pass `GF256::ZERO` to recover the constant term.
///
/// Fails with [`DivisionByZero`] when two points share an `x` coordinate.
pub fn interpolate(points: &[(GF256, GF256)], x: GF256) -> Result<GF256, DivisionByZero> {
    let xs: Vec<GF256> = points.iter().map(|&(x_i, _)| x_i).collect();
    let weights = lagrange_weights(&xs, x)?;

    Ok(points
        .iter()
        .zip(weights.iter())
        .map(|(&(_, y_i), &w_i)| y_i * w_i)
        .sum())
}

/// The Lagrange basis polynomials for the nodes `xs`, evaluated at `x`.
///
/// The value at `x` of any polynomial through `(xs[i], ys[i])` is the sum of
/// `ys[i] * weights[i]`, so the weights can be reused for every set of `ys`
/// sharing the same nodes.
pub fn lagrange_weights(xs: &[GF256], x: GF256) -> Result<Vec<GF256>, DivisionByZero> {
    xs.iter()
        .enumerate()
        .map(|(i, &x_i)| {
            let mut numerator = GF256::ONE;
            let mut denominator = GF256::ONE;

            for (j, &x_j) in xs.iter().enumerate() {
                if i == j {
                    continue;
                }
                numerator *= x - x_j;
                denominator *= x_i - x_j;
            }

            Ok(numerator * denominator.inv()?)
        })
        .collect()
}

// Generates `threshold` coefficients: the constant term `s` followed by `threshold - 1`
// coefficients drawn uniformly from the whole field.
pub fn random_polynomial<R: RngCore + CryptoRng>(
    s: GF256,
    threshold: u8,
    rng: &mut R,
) -> Zeroizing<Vec<GF256>> {
    let mut poly = Zeroizing::new(Vec::with_capacity(threshold as usize));

    poly.push(s);
    for _ in 1..threshold {
        poly.push(GF256(rng.gen()));
    }

    poly
}

#[cfg(test)]
mod tests {
    use super::{evaluate, interpolate, lagrange_weights, random_polynomial, GF256};
    use crate::field::DivisionByZero;
    use alloc::{vec, vec::Vec};
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn random_polynomial_works() {
        let mut rng = rand_chacha::ChaCha20Rng::from_seed([0x90; 32]);
        let poly = random_polynomial(GF256(1), 3, &mut rng);
        assert_eq!(poly.len(), 3);
        assert_eq!(poly[0], GF256(1));
    }

    #[test]
    fn evaluate_works() {
        // f(x) = 3 + 2x + 5x^2
        let poly = [GF256(3), GF256(2), GF256(5)];
        assert_eq!(evaluate(&poly, GF256(0)), GF256(3));
        assert_eq!(evaluate(&poly, GF256(1)), GF256(3 ^ 2 ^ 5));
        // f(2) = 3 + 4 + 5 * 4 = 3 ^ 4 ^ 20
        assert_eq!(evaluate(&poly, GF256(2)), GF256(3 ^ 4 ^ 20));
    }

    #[test]
    fn evaluate_empty_polynomial_is_zero() {
        assert_eq!(evaluate(&[], GF256(9)), GF256::ZERO);
    }

    #[test]
    fn interpolate_recovers_constant_term() {
        let mut rng = rand_chacha::ChaCha20Rng::from_seed([0x90; 32]);
        let poly = random_polynomial(GF256(185), 10, &mut rng);
        let points: Vec<(GF256, GF256)> = (1..=10u8)
            .map(GF256)
            .map(|x| (x, evaluate(&poly, x)))
            .collect();
        assert_eq!(interpolate(&points, GF256::ZERO), Ok(GF256(185)));
    }

    #[test]
    fn interpolate_at_arbitrary_point() {
        let poly = vec![GF256(17), GF256(99), GF256(201)];
        let points: Vec<(GF256, GF256)> = [4u8, 9, 250]
            .into_iter()
            .map(GF256)
            .map(|x| (x, evaluate(&poly, x)))
            .collect();
        for x in [0u8, 1, 2, 77, 255] {
            assert_eq!(
                interpolate(&points, GF256(x)),
                Ok(evaluate(&poly, GF256(x)))
            );
        }
    }

    #[test]
    fn interpolate_rejects_repeated_x() {
        let points = [(GF256(3), GF256(1)), (GF256(3), GF256(2))];
        assert_eq!(interpolate(&points, GF256::ZERO), Err(DivisionByZero));
    }

    #[test]
    fn weights_are_reusable_across_values() {
        let mut rng = rand_chacha::ChaCha20Rng::from_seed([0x17; 32]);
        let xs: Vec<GF256> = [1u8, 3, 7, 200].into_iter().map(GF256).collect();
        let weights = lagrange_weights(&xs, GF256::ZERO).unwrap();

        for secret in [0u8, 1, 0x5a, 255] {
            let poly = random_polynomial(GF256(secret), 4, &mut rng);
            let recovered: GF256 = xs
                .iter()
                .zip(weights.iter())
                .map(|(&x, &w)| evaluate(&poly, x) * w)
                .sum();
            assert_eq!(recovered, GF256(secret));
        }
    }

    #[test]
    fn weights_reject_repeated_nodes() {
        let xs = [GF256(5), GF256(9), GF256(5)];
        assert_eq!(lagrange_weights(&xs, GF256::ZERO), Err(DivisionByZero));
    }
}
