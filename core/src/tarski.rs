//! Tarski query managers: `TaQ(q, Z) = sum_{x in Z, real} sgn(q(x))`.
//!
//! Two concrete variants, per spec.md §4.5: a univariate manager built on a
//! single polynomial's Sturm sequence, and a multivariate manager built on a
//! Gröbner base, a monomial basis of the quotient ring, and the
//! characteristic polynomial of the symmetric Hermite trace form of `q`
//! (not the plain multiplication-by-`q` matrix, whose eigenvalues need not
//! be real: the Hermite form's signature equals `TaQ(q)` even over a variety
//! with non-real points).
//! Both cache results keyed on the query polynomial with its leading
//! coefficient's sign folded out, reapplying the sign on lookup
//! (SPEC_FULL.md §4 item 6; spec.md §8 testable property 7).

use crate::charpoly::{characteristic_polynomial, tarski_query_from_charpoly};
use crate::error::RanError;
use crate::mult_table::MultTable;
use ranalg_nzq::Rational;
use ranalg_poly::polynomial::mpoly::{MonomialOrder, MultivariatePolynomial};
use ranalg_poly::{FieldCoeff, Sign, UnivariatePolynomial};
use std::cell::RefCell;
use std::collections::HashMap;

/// Normalises `q` by dividing out its leading coefficient's absolute value,
/// returning `(normalised, sign_of_leading_coefficient)` so that
/// `TaQ(q) = sign * TaQ(normalised)`.
fn normalize_univariate(q: &UnivariatePolynomial<Rational>) -> (UnivariatePolynomial<Rational>, Sign) {
    if q.is_zero() {
        return (q.clone(), Sign::Zero);
    }
    let lc = q.leading_coefficient();
    let sign = Sign::of_i32(lc.numerator().sign());
    let normalized = q.scale(&Rational::ONE.div(&lc.abs_ref()));
    (normalized, sign)
}

fn normalize_multivariate(q: &MultivariatePolynomial, order: MonomialOrder) -> (MultivariatePolynomial, Sign) {
    if q.is_zero() {
        return (q.clone(), Sign::Zero);
    }
    let (_, lc) = q.leading_term(order).unwrap();
    let sign = Sign::of_i32(lc.numerator().sign());
    let normalized = q.scale(&Rational::ONE.div(&lc.abs_ref()));
    (normalized, sign)
}

pub enum TarskiQueryManager {
    Univariate {
        z: UnivariatePolynomial<Rational>,
        cache: RefCell<HashMap<UnivariatePolynomial<Rational>, i64>>,
    },
    Multivariate {
        table: MultTable,
        order: MonomialOrder,
        cache: RefCell<HashMap<Vec<(ranalg_poly::polynomial::mpoly::Monomial, Rational)>, i64>>,
    },
}

impl TarskiQueryManager {
    pub fn new_univariate(z: UnivariatePolynomial<Rational>) -> Self {
        TarskiQueryManager::Univariate {
            z,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn new_multivariate(
        generators: &[MultivariatePolynomial],
        order: MonomialOrder,
    ) -> Result<Self, RanError> {
        let table = MultTable::build(generators, order).ok_or(RanError::ZeroDimensionalRequired)?;
        Ok(TarskiQueryManager::Multivariate {
            table,
            order,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// The number of real zeros of `Z` — `TaQ(1)`.
    pub fn num_real_zeros(&self) -> i64 {
        match self {
            TarskiQueryManager::Univariate { .. } => {
                self.taq(&UnivariatePolynomial::constant(Rational::ONE))
            }
            TarskiQueryManager::Multivariate { .. } => self.taq_mv(&MultivariatePolynomial::constant(Rational::ONE)),
        }
    }

    /// Univariate Tarski query: only valid on a `Univariate` manager.
    pub fn taq(&self, q: &UnivariatePolynomial<Rational>) -> i64 {
        let TarskiQueryManager::Univariate { z, cache } = self else {
            panic!("taq() called on a multivariate Tarski query manager; use taq_mv()");
        };
        let (normalized, sign) = normalize_univariate(q);
        if sign == Sign::Zero {
            return 0;
        }
        if let Some(&v) = cache.borrow().get(&normalized) {
            return sign.to_i32() as i64 * v;
        }
        let v = z.tarski_query(&normalized);
        cache.borrow_mut().insert(normalized, v);
        sign.to_i32() as i64 * v
    }

    /// Multivariate Tarski query: only valid on a `Multivariate` manager.
    pub fn taq_mv(&self, q: &MultivariatePolynomial) -> i64 {
        let TarskiQueryManager::Multivariate { table, order, cache } = self else {
            panic!("taq_mv() called on a univariate Tarski query manager; use taq()");
        };
        let (normalized, sign) = normalize_multivariate(q, *order);
        if sign == Sign::Zero {
            return 0;
        }
        let key: Vec<_> = normalized.terms().map(|(m, c)| (m.clone(), c.clone())).collect();
        if let Some(&v) = cache.borrow().get(&key) {
            return sign.to_i32() as i64 * v;
        }
        let t = table.hermite_matrix(&normalized);
        let chi = characteristic_polynomial(&t);
        let v = tarski_query_from_charpoly(&chi);
        cache.borrow_mut().insert(key, v);
        sign.to_i32() as i64 * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranalg_poly::polynomial::mpoly::Monomial;
    use ranalg_poly::Variable;

    #[test]
    fn univariate_taq_of_one_counts_real_zeros() {
        // z = x^2 - 2: two real roots.
        let z = UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE]);
        let mgr = TarskiQueryManager::new_univariate(z);
        assert_eq!(mgr.num_real_zeros(), 2);
    }

    #[test]
    fn multivariate_taq_of_one_counts_four_axis_intersections() {
        let x = Variable::new();
        let y = Variable::new();
        let f1 = MultivariatePolynomial::from_terms([
            (Monomial::single(x, 2), Rational::ONE),
            (Monomial::single(y, 2), Rational::ONE),
            (Monomial::one(), Rational::from(-1)),
        ]);
        let f2 = MultivariatePolynomial::from_terms([(
            Monomial::single(x, 1).mul(&Monomial::single(y, 1)),
            Rational::ONE,
        )]);
        let mgr = TarskiQueryManager::new_multivariate(&[f1, f2], MonomialOrder::DegRevLex).unwrap();
        assert_eq!(mgr.num_real_zeros(), 4);
    }

    #[test]
    fn multivariate_taq_of_one_is_zero_for_a_complex_only_variety() {
        // x^2 + 1 = 0, y - 1 = 0: zero-dimensional (dimension 2) but no real
        // points at all, unlike the characteristic polynomial of the plain
        // multiplication-by-1 matrix (the identity), which would report the
        // full quotient-ring dimension of 2 instead of 0.
        let x = Variable::new();
        let y = Variable::new();
        let f1 = MultivariatePolynomial::from_terms([
            (Monomial::single(x, 2), Rational::ONE),
            (Monomial::one(), Rational::ONE),
        ]);
        let f2 = MultivariatePolynomial::from_terms([
            (Monomial::single(y, 1), Rational::ONE),
            (Monomial::one(), Rational::from(-1)),
        ]);
        let mgr = TarskiQueryManager::new_multivariate(&[f1, f2], MonomialOrder::DegRevLex).unwrap();
        assert_eq!(mgr.num_real_zeros(), 0);
    }
}
