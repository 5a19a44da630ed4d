//! Real-root isolation for univariate rational polynomials (spec.md §4.2).

use crate::ran::Ran;
use ranalg_nzq::Rational;
use ranalg_poly::{Interval, UnivariatePolynomial};

/// The tagged result every root-isolation entry point returns (spec.md §9:
/// a three-way sum replaces the original's two-parameter boolean encoding).
#[derive(Debug, Clone, PartialEq)]
pub enum RealRootsResult {
    Roots(Vec<Ran>),
    Nullified,
    NonUnivariate,
}

/// Isolates all real roots of `p` within the open interval `search`, as an
/// ascending sequence of RANs.
#[tracing::instrument(level = "debug", skip(p, search))]
pub fn real_roots(
    p: &UnivariatePolynomial<Rational>,
    search: &Interval<Rational>,
) -> RealRootsResult {
    if p.is_zero() {
        return RealRootsResult::Nullified;
    }
    if p.is_constant() {
        return RealRootsResult::Roots(vec![]);
    }
    let intervals = p.isolate_real_roots_in(search);
    let sf = p.square_free_part();
    let mut rans: Vec<Ran> = intervals
        .into_iter()
        .filter_map(|iv| Ran::from_poly_interval(sf.clone(), iv))
        .collect();
    rans.sort();
    RealRootsResult::Roots(rans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_polynomial_is_nullified() {
        let p = UnivariatePolynomial::new(vec![]);
        let search = Interval::new_open(Rational::from(-10), Rational::from(10));
        assert_eq!(real_roots(&p, &search), RealRootsResult::Nullified);
    }

    #[test]
    fn nonzero_constant_has_no_roots() {
        let p = UnivariatePolynomial::constant(Rational::from(17));
        let search = Interval::new_open(Rational::from(-10), Rational::from(10));
        assert_eq!(real_roots(&p, &search), RealRootsResult::Roots(vec![]));
    }

    #[test]
    fn x2_minus_2_has_two_ascending_roots() {
        let p = UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE]);
        let search = Interval::new_open(Rational::from(-10), Rational::from(10));
        match real_roots(&p, &search) {
            RealRootsResult::Roots(roots) => {
                assert_eq!(roots.len(), 2);
                assert!(roots[0].interval().unwrap().upper().unwrap() <= &Rational::from(-1));
                assert!(roots[1].interval().unwrap().lower().unwrap() >= &Rational::from(1));
            }
            other => panic!("expected Roots, got {other:?}"),
        }
    }
}
