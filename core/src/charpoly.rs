//! Characteristic polynomials of small exact-rational matrices, and the
//! sign-variation count used to turn a characteristic polynomial into a
//! signed root count (`CharPol.h`/`Trace.h`'s Newton-identity approach,
//! without the `ceil(sqrt(n))`-blocking optimisation CARL uses for trace
//! computation over large matrices — unneeded here since sign-determination
//! matrices stay small).

use crate::matrix::Matrix;
use ranalg_nzq::Rational;
use ranalg_poly::UnivariatePolynomial;

/// The characteristic polynomial `det(xI - A)` via Faddeev-LeVerrier, monic
/// in the leading term (ascending-degree coefficient vector, as `UnivariatePolynomial` stores them).
pub fn characteristic_polynomial(a: &Matrix) -> UnivariatePolynomial<Rational> {
    let n = a.rows();
    assert_eq!(n, a.cols());
    let mut m = Matrix::identity(n);
    let mut coeffs = vec![Rational::ZERO; n + 1];
    coeffs[n] = Rational::ONE;
    for k in 1..=n {
        let am = a.mul(&m);
        let c = -(am.trace() / Rational::from(k as u32));
        coeffs[n - k] = c.clone();
        if k < n {
            let mut next = am;
            for i in 0..n {
                *next.at_mut(i, i) += c.clone();
            }
            m = next;
        }
    }
    UnivariatePolynomial::new(coeffs)
}

/// Number of sign variations in a coefficient sequence, ignoring zeros.
fn sign_variations(coeffs: &[Rational]) -> usize {
    let signs: Vec<i32> = coeffs
        .iter()
        .filter(|c| **c != Rational::ZERO)
        .map(|c| c.numerator().sign())
        .collect();
    signs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// `v_+(chi) - v_-(chi)`: the signed count spec.md §4.5 prescribes as the
/// multivariate Tarski query's final step.
pub fn tarski_query_from_charpoly(chi: &UnivariatePolynomial<Rational>) -> i64 {
    let ascending: Vec<Rational> = chi.coeffs().to_vec();
    let descending: Vec<Rational> = ascending.iter().cloned().rev().collect();
    let v_plus = sign_variations(&descending);
    let flipped: Vec<Rational> = descending
        .iter()
        .enumerate()
        .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
        .collect();
    let v_minus = sign_variations(&flipped);
    v_plus as i64 - v_minus as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characteristic_polynomial_of_identity() {
        let m = Matrix::identity(2);
        let chi = characteristic_polynomial(&m);
        // (x-1)^2 = x^2 - 2x + 1
        assert_eq!(chi.coeff(0), Rational::ONE);
        assert_eq!(chi.coeff(1), Rational::from(-2));
        assert_eq!(chi.coeff(2), Rational::ONE);
    }
}
