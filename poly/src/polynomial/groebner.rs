//! Buchberger's algorithm and the data a multivariate Tarski-query manager
//! needs from a Gröbner base: the monomial basis of the quotient ring.

use super::mpoly::{Monomial, MonomialOrder, MultivariatePolynomial};
use itertools::Itertools;
use ranalg_nzq::Rational;
use std::collections::BTreeSet;

/// Reduces `f` modulo the polynomial set `basis` under `order`, repeatedly
/// dividing the leading term by any basis element whose leading monomial
/// divides it, until no further reduction applies.
pub fn normal_form(
    f: &MultivariatePolynomial,
    basis: &[MultivariatePolynomial],
    order: MonomialOrder,
) -> MultivariatePolynomial {
    let mut p = f.clone();
    let mut result = MultivariatePolynomial::zero();
    'outer: while !p.is_zero() {
        let (lead_m, lead_c) = p.leading_term(order).unwrap();
        let (lead_m, lead_c) = (lead_m.clone(), lead_c.clone());
        for g in basis {
            if g.is_zero() {
                continue;
            }
            let (gm, gc) = g.leading_term(order).unwrap();
            if gm.divides(&lead_m) {
                let quot_m = lead_m.divide(gm);
                let coeff = lead_c.clone() / gc.clone();
                let term = MultivariatePolynomial::from_terms([(quot_m, coeff)]);
                p = p.sub(&term.mul(g));
                continue 'outer;
            }
        }
        // leading term is irreducible: move it to the result and continue on the tail.
        let term = MultivariatePolynomial::from_terms([(lead_m, lead_c)]);
        result = result.add(&term);
        p = p.sub(&term);
    }
    result
}

fn s_polynomial(
    f: &MultivariatePolynomial,
    g: &MultivariatePolynomial,
    order: MonomialOrder,
) -> MultivariatePolynomial {
    let (fm, fc) = f.leading_term(order).unwrap();
    let (gm, gc) = g.leading_term(order).unwrap();
    let l = fm.lcm(gm);
    let f_factor = MultivariatePolynomial::from_terms([(
        l.divide(fm),
        Rational::ONE / fc.clone(),
    )]);
    let g_factor = MultivariatePolynomial::from_terms([(
        l.divide(gm),
        Rational::ONE / gc.clone(),
    )]);
    f_factor.mul(f).sub(&g_factor.mul(g))
}

/// Computes a (not necessarily reduced/minimal) Gröbner base of the ideal
/// generated by `generators`, via Buchberger's algorithm with the trivial
/// pairwise S-polynomial criterion (no Buchberger first/second criterion
/// pruning — acceptable for the small zero-dimensional systems sign
/// determination builds, per spec.md's scope).
pub fn buchberger(
    generators: &[MultivariatePolynomial],
    order: MonomialOrder,
) -> Vec<MultivariatePolynomial> {
    let mut basis: Vec<MultivariatePolynomial> =
        generators.iter().filter(|g| !g.is_zero()).cloned().collect();
    let mut pairs: Vec<(usize, usize)> = (0..basis.len()).tuple_combinations().collect();
    while let Some((i, j)) = pairs.pop() {
        let s = s_polynomial(&basis[i], &basis[j], order);
        let r = normal_form(&s, &basis, order);
        if !r.is_zero() {
            let new_index = basis.len();
            for k in 0..new_index {
                pairs.push((k, new_index));
            }
            basis.push(r);
        }
    }
    basis
}

/// `true` iff the quotient ring `Q[X]/<basis>` is a finite-dimensional
/// `Q`-vector space, i.e. for every variable some pure power of it is the
/// leading monomial of some basis element.
pub fn is_zero_dimensional(
    basis: &[MultivariatePolynomial],
    order: MonomialOrder,
    variables: &BTreeSet<crate::variable::Variable>,
) -> bool {
    variables.iter().all(|&v| {
        basis.iter().any(|g| {
            g.leading_monomial(order)
                .map(|m| m.variables().count() == 1 && m.power_of(v) == m.degree() && m.degree() > 0)
                .unwrap_or(false)
        })
    })
}

/// The monomial basis `B` of the quotient ring: all monomials over `variables`
/// not divisible by any leading monomial of `basis`, sorted by `order`.
/// Only sound to call once `is_zero_dimensional` holds (otherwise infinite).
pub fn monomial_basis(
    basis: &[MultivariatePolynomial],
    order: MonomialOrder,
    variables: &[crate::variable::Variable],
) -> Vec<Monomial> {
    let leading: Vec<Monomial> = basis.iter().filter_map(|g| g.leading_monomial(order)).collect();
    let bounds: Vec<u32> = variables
        .iter()
        .map(|&v| {
            leading
                .iter()
                .filter(|m| m.variables().count() == 1 && m.power_of(v) == m.degree())
                .map(|m| m.power_of(v))
                .min()
                .unwrap_or(1)
        })
        .collect();
    let mut candidates = vec![Monomial::one()];
    for (idx, &v) in variables.iter().enumerate() {
        let bound = bounds[idx];
        let mut next = vec![];
        for c in &candidates {
            for p in 0..bound {
                let mut m = c.clone();
                if p > 0 {
                    m = m.mul(&Monomial::single(v, p));
                }
                next.push(m);
            }
        }
        candidates = next;
    }
    let mut out: Vec<Monomial> = candidates
        .into_iter()
        .filter(|m| !leading.iter().any(|lm| lm.divides(m)))
        .collect();
    out.sort_by(|a, b| order.compare(a, b));
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn groebner_base_of_circle_and_axes() {
        let x = Variable::new();
        let y = Variable::new();
        // x^2 + y^2 - 1, x*y : four real zeros (the axis intersections).
        let f1 = MultivariatePolynomial::from_terms([
            (Monomial::single(x, 2), Rational::ONE),
            (Monomial::single(y, 2), Rational::ONE),
            (Monomial::one(), Rational::from(-1)),
        ]);
        let f2 = MultivariatePolynomial::from_terms([(
            Monomial::single(x, 1).mul(&Monomial::single(y, 1)),
            Rational::ONE,
        )]);
        let gb = buchberger(&[f1, f2], MonomialOrder::DegRevLex);
        let vars: BTreeSet<Variable> = [x, y].into_iter().collect();
        assert!(is_zero_dimensional(&gb, MonomialOrder::DegRevLex, &vars));
    }
}
