//! The multiplication table of a zero-dimensional quotient ring `Q[X]/<G>`:
//! the monomial basis `B`, and enough Gröbner-reduction machinery to express
//! the coordinate vector of any polynomial, and the matrix of multiplication
//! by any polynomial, over that basis (`GroebnerBase.h`'s role in CARL,
//! generalised beyond the `get`/`reduce` pair it exposes there).

use crate::matrix::Matrix;
use ranalg_nzq::Rational;
use ranalg_poly::polynomial::groebner::{is_zero_dimensional, monomial_basis, normal_form};
use ranalg_poly::polynomial::mpoly::{Monomial, MonomialOrder, MultivariatePolynomial};
use ranalg_poly::Variable;
use std::collections::BTreeSet;

pub struct MultTable {
    pub groebner: Vec<MultivariatePolynomial>,
    pub order: MonomialOrder,
    pub variables: Vec<Variable>,
    pub basis: Vec<Monomial>,
}

impl MultTable {
    /// Builds the table from generators of the zero set `Z`. Returns `None`
    /// if the resulting ideal is not zero-dimensional (spec.md §4.5: the
    /// manager "refuses construction").
    pub fn build(generators: &[MultivariatePolynomial], order: MonomialOrder) -> Option<Self> {
        let mut variables: BTreeSet<Variable> = BTreeSet::new();
        for g in generators {
            variables.extend(g.variables());
        }
        let groebner = ranalg_poly::polynomial::groebner::buchberger(generators, order);
        if !is_zero_dimensional(&groebner, order, &variables) {
            return None;
        }
        let variables: Vec<Variable> = variables.into_iter().collect();
        let basis = monomial_basis(&groebner, order, &variables);
        Some(MultTable {
            groebner,
            order,
            variables,
            basis,
        })
    }

    pub fn dimension(&self) -> usize {
        self.basis.len()
    }

    pub fn normal_form(&self, p: &MultivariatePolynomial) -> MultivariatePolynomial {
        normal_form(p, &self.groebner, self.order)
    }

    /// The coordinate vector of `p`'s normal form over the monomial basis `B`.
    pub fn coords(&self, p: &MultivariatePolynomial) -> Vec<Rational> {
        let nf = self.normal_form(p);
        self.basis.iter().map(|m| nf.coefficient(m)).collect()
    }

    fn basis_poly(&self, m: &Monomial) -> MultivariatePolynomial {
        MultivariatePolynomial::from_terms([(m.clone(), Rational::ONE)])
    }

    /// The matrix of the endomorphism "multiply by `q`" of the quotient ring,
    /// expressed over the monomial basis `B` (column `j` is the coordinate
    /// vector of `q * b_j`).
    pub fn multiplication_matrix(&self, q: &MultivariatePolynomial) -> Matrix {
        let n = self.basis.len();
        let mut out = Matrix::zero(n, n);
        for (j, b_j) in self.basis.iter().enumerate() {
            let prod = q.mul(&self.basis_poly(b_j));
            let coords = self.coords(&prod);
            for i in 0..n {
                *out.at_mut(i, j) = coords[i].clone();
            }
        }
        out
    }

    /// The Hermite trace form of `q` over `B`: `T_ij = trace(multiplication
    /// matrix of q * b_i * b_j)`. Its signature equals `TaQ(q)` even when the
    /// variety has non-real points (spec.md §4.5 step 2), unlike the
    /// characteristic polynomial of the plain multiplication matrix `M_q`,
    /// which only agrees with `TaQ(q)` when every zero is real.
    pub fn hermite_matrix(&self, q: &MultivariatePolynomial) -> Matrix {
        let n = self.basis.len();
        let mut out = Matrix::zero(n, n);
        for i in 0..n {
            for j in i..n {
                let product = q.mul(&self.basis_poly(&self.basis[i])).mul(&self.basis_poly(&self.basis[j]));
                let trace = self.multiplication_matrix(&product).trace();
                *out.at_mut(i, j) = trace.clone();
                *out.at_mut(j, i) = trace;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranalg_poly::polynomial::mpoly::Monomial;
    use ranalg_poly::Variable;

    #[test]
    fn quotient_ring_of_circle_and_axes_has_dimension_four() {
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
        let table = MultTable::build(&[f1, f2], MonomialOrder::DegRevLex).unwrap();
        assert_eq!(table.dimension(), 4);
    }
}
