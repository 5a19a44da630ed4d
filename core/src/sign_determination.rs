//! Sign determination: given a polynomial family `P` and a zero-dimensional
//! zero set `Z`, the set of sign conditions `P` realises on `Z` (spec.md
//! §4.4), via the Ben-Or/Kozen/Reif recursion in the presentation of
//! Basu/Pollack/Roy (`SignDetermination.h` in the teacher source tree this
//! workspace's stack was built from — `carl::signDetermination`).
//!
//! CARL solves the adapted-matrix linear systems over `float` (Eigen
//! `MatrixXf`); this workspace solves them over exact `Rational` instead
//! (SPEC_FULL.md §5), so `Matrix::solve`/`Matrix::rank` replace
//! `FullPivLU`/`PartialPivLU`.

use crate::error::RanError;
use crate::matrix::Matrix;
use crate::tarski::TarskiQueryManager;
use itertools::iproduct;
use ranalg_nzq::Rational;
use ranalg_poly::polynomial::mpoly::MonomialOrder;
use ranalg_poly::{MultivariatePolynomial, Sign, UnivariatePolynomial};

/// An assignment of `{NEG, ZERO, POS}` to each polynomial in a family, in
/// family order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignCondition(pub Vec<Sign>);

impl SignCondition {
    pub fn single(s: Sign) -> Self {
        SignCondition(vec![s])
    }

    fn prepend(sign: Sign, rest: &SignCondition) -> Self {
        let mut v = Vec::with_capacity(rest.0.len() + 1);
        v.push(sign);
        v.extend_from_slice(&rest.0);
        SignCondition(v)
    }

    /// `tau` extends `sigma` iff `tau` has one extra leading sign and the
    /// remaining components equal `sigma` componentwise (spec.md §3).
    pub fn extends(tau: &SignCondition, sigma: &SignCondition) -> bool {
        tau.0.len() == sigma.0.len() + 1 && tau.0[1..] == sigma.0[..]
    }
}

/// Minimal ring-like operations `sign_determination` needs from its
/// polynomial type: a multiplicative identity compatible with `self`, and
/// multiplication. Both concrete polynomial types already have inherent
/// `mul`; this just names the shared shape generically.
trait RingLike: Clone {
    fn one_like(&self) -> Self;
    fn ring_mul(&self, other: &Self) -> Self;
}

impl RingLike for UnivariatePolynomial<Rational> {
    fn one_like(&self) -> Self {
        UnivariatePolynomial::constant(Rational::ONE)
    }
    fn ring_mul(&self, other: &Self) -> Self {
        self.mul(other)
    }
}

impl RingLike for MultivariatePolynomial {
    fn one_like(&self) -> Self {
        MultivariatePolynomial::constant(Rational::ONE)
    }
    fn ring_mul(&self, other: &Self) -> Self {
        self.mul(other)
    }
}

fn pow<P: RingLike>(p: &P, n: u32) -> P {
    let mut acc = p.one_like();
    for _ in 0..n {
        acc = acc.ring_mul(p);
    }
    acc
}

/// `sigma^alpha`: `0` if some `alpha_i > 0` and `sigma_i = ZERO`; otherwise
/// `±1`, flipping sign for every component where `alpha_i` is odd and
/// `sigma_i = NEG` (spec.md §4.4's adapted-matrix entry rule).
fn sigma_to_the_alpha(alpha: &[u32], sigma: &SignCondition) -> Rational {
    assert_eq!(alpha.len(), sigma.0.len());
    let mut res = 1i32;
    for (&a, &s) in alpha.iter().zip(sigma.0.iter()) {
        if a > 0 && s == Sign::Zero {
            return Rational::ZERO;
        }
        if s == Sign::Negative && a % 2 == 1 {
            res = -res;
        }
    }
    Rational::from(res)
}

/// `adaptedMat(A, sign)`: rows indexed by exponent tuples `A`, columns by
/// sign conditions, entries `sigma_j^{alpha_i}`.
fn adapted_mat(a: &[Vec<u32>], sign: &[SignCondition]) -> Matrix {
    let mut m = Matrix::zero(a.len(), sign.len());
    for (i, alpha) in a.iter().enumerate() {
        for (j, sigma) in sign.iter().enumerate() {
            *m.at_mut(i, j) = sigma_to_the_alpha(alpha, sigma);
        }
    }
    m
}

/// The base adapted list `{(0), (1), (2)}` and its sign conditions
/// `{ZERO, POS, NEG}`, in that fixed order (spec.md §4.4).
fn basic_adapted_list() -> Vec<Vec<u32>> {
    vec![vec![0], vec![1], vec![2]]
}

fn basic_sign_conditions() -> Vec<SignCondition> {
    vec![
        SignCondition::single(Sign::Zero),
        SignCondition::single(Sign::Positive),
        SignCondition::single(Sign::Negative),
    ]
}

/// `compute_dprime`: the right-hand side of the extended linear system,
/// `TaQ(prod_k p_k^alpha_k)` over every index tuple in `B x Ada` (`b`'s
/// components first, then `ada`'s), `ps[0]` being `p_i` and `ps[1..]` the
/// previously-processed tail `p_{i+1..}`.
fn compute_dprime<P, Taq>(ps: &[P], b: &[Vec<u32>], ada: &[Vec<u32>], taq: &mut Taq) -> Vec<Rational>
where
    P: RingLike,
    Taq: FnMut(&P) -> i64,
{
    let mut out = Vec::with_capacity(ada.len() * b.len());
    for a in ada {
        for bj in b {
            let mut exponents = bj.clone();
            exponents.extend_from_slice(a);
            debug_assert_eq!(exponents.len(), ps.len());
            let mut poly = ps[0].one_like();
            for (k, &e) in exponents.iter().enumerate() {
                poly = poly.ring_mul(&pow(&ps[k], e));
            }
            out.push(Rational::from(taq(&poly)));
        }
    }
    out
}

/// `calculateR(which, sign, newSign)`: the `sigma in sign` realised by at
/// least `which` extensions in `newSign`.
fn calculate_r(which: usize, sign: &[SignCondition], new_sign: &[SignCondition]) -> Vec<SignCondition> {
    sign.iter()
        .filter(|sigma| {
            new_sign.iter().filter(|tau| SignCondition::extends(tau, sigma)).count() >= which
        })
        .cloned()
        .collect()
}

/// `firstNLines`: the first `n` exponent tuples of `ada`, after checking
/// that the corresponding first `n` rows of `mat` are linearly independent.
fn first_n_lines(n: usize, mat: &Matrix, ada: &[Vec<u32>]) -> Vec<Vec<u32>> {
    if n == 0 {
        return vec![];
    }
    let mut first_rows = Matrix::zero(n, mat.cols());
    for i in 0..n {
        for j in 0..mat.cols() {
            *first_rows.at_mut(i, j) = mat.at(i, j).clone();
        }
    }
    debug_assert_eq!(first_rows.rank(), n, "adaptedFamily's first n rows must be linearly independent");
    ada[..n].to_vec()
}

/// `adaptedFamily(Sign(Q,Z), Sign({p}∪Q,Z), Ada(Q,Z))`: extends the previous
/// adapted family so the next Kronecker-product system stays invertible
/// (spec.md §4.4 step 2d).
fn adapted_family(sign: &[SignCondition], new_sign: &[SignCondition], ada: &[Vec<u32>]) -> Vec<Vec<u32>> {
    let r1 = sign.len();
    let mut res: Vec<Vec<u32>> = ada.iter().map(|a| {
        let mut v = Vec::with_capacity(a.len() + 1);
        v.push(0);
        v.extend_from_slice(a);
        v
    }).collect();

    if new_sign.len() != r1 {
        let sign2 = calculate_r(2, sign, new_sign);
        let r2 = sign2.len();
        let mat2 = adapted_mat(ada, &sign2);
        let a2 = first_n_lines(r2, &mat2, ada);
        for a in &a2 {
            let mut v = Vec::with_capacity(a.len() + 1);
            v.push(1);
            v.extend_from_slice(a);
            res.push(v);
        }
        if new_sign.len() != r1 + r2 {
            let sign3 = calculate_r(3, sign, new_sign);
            let r3 = sign3.len();
            let a3 = first_n_lines(r3, &mat2, ada);
            for a in &a3 {
                let mut v = Vec::with_capacity(a.len() + 1);
                v.push(2);
                v.extend_from_slice(a);
                res.push(v);
            }
        }
    }
    res
}

/// The fixed `3x3` system: rows are the base adapted exponents `(0),(1),(2)`,
/// columns the base sign conditions `ZERO,POS,NEG` — `M_3` of spec.md §4.4.
fn solve_basic_system(r: i64, t1: i64, t2: i64) -> Vec<SignCondition> {
    let m3 = adapted_mat(&basic_adapted_list(), &basic_sign_conditions());
    let rhs = vec![Rational::from(r), Rational::from(t1), Rational::from(t2)];
    let c = m3
        .solve(&rhs)
        .expect("the basic 3x3 adapted matrix is always invertible");
    let mut sign = vec![];
    if c[0] != Rational::ZERO {
        sign.push(SignCondition::single(Sign::Zero));
    }
    if c[1] != Rational::ZERO {
        sign.push(SignCondition::single(Sign::Positive));
    }
    if c[2] != Rational::ZERO {
        sign.push(SignCondition::single(Sign::Negative));
    }
    sign
}

/// The core Ben-Or/Kozen/Reif recursion (spec.md §4.4), generic over the
/// polynomial type so both the univariate and multivariate Tarski query
/// managers can drive it.
fn sign_determination_core<P, Taq>(p: &[P], taq: &mut Taq) -> Vec<SignCondition>
where
    P: RingLike,
    Taq: FnMut(&P) -> i64,
{
    assert!(!p.is_empty(), "sign_determination requires a non-empty polynomial family");
    let r = taq(&p[0].one_like());
    debug_assert!(r >= 0, "TaQ(1) counts real zeros and cannot be negative");
    if r == 0 {
        return vec![];
    }

    let n = p.len();
    let mut last_sign: Vec<SignCondition> = vec![];
    let mut last_ada: Vec<Vec<u32>> = vec![];

    for i in (0..n).rev() {
        let t1 = taq(&p[i]);
        let t2 = taq(&pow(&p[i], 2));
        debug_assert!(t1.abs() <= r && t2.abs() <= r);
        let sign = solve_basic_system(r, t1, t2);

        let mut b = basic_adapted_list();
        b.truncate(sign.len());

        if i == n - 1 {
            if i == 0 {
                return sign;
            }
            last_sign = sign;
            last_ada = b;
            continue;
        }

        let m = adapted_mat(&b, &sign);
        let d_prime = compute_dprime(&p[i..], &b, &last_ada, taq);
        let m_prev = adapted_mat(&last_ada, &last_sign);
        let m_prime = m_prev.kronecker(&m);
        let c_prime = m_prime
            .solve(&d_prime)
            .expect("the adapted matrix must be invertible by construction");

        let new_sign: Vec<SignCondition> = iproduct!(last_sign.iter(), sign.iter())
            .zip(c_prime.iter())
            .filter(|(_, c)| **c != Rational::ZERO)
            .map(|((lsign, sigma), _)| SignCondition::prepend(sigma.0[0], lsign))
            .collect();

        if i == 0 {
            return new_sign;
        }
        let new_ada = adapted_family(&last_sign, &new_sign, &last_ada);
        last_sign = new_sign;
        last_ada = new_ada;
    }
    unreachable!("the loop always returns once i reaches 0")
}

/// `sign_determination(P, Z)` for a univariate zero set `Z` (a single
/// polynomial, one real-root-counting Sturm sequence).
pub fn sign_determination_univariate(
    p: &[UnivariatePolynomial<Rational>],
    z: &UnivariatePolynomial<Rational>,
) -> Vec<SignCondition> {
    let mgr = TarskiQueryManager::new_univariate(z.clone());
    sign_determination_core(p, &mut |q: &UnivariatePolynomial<Rational>| mgr.taq(q))
}

/// `sign_determination(P, Z)` for a multivariate, zero-dimensional zero set
/// `Z` described by polynomial generators. Fails with
/// `RanError::ZeroDimensionalRequired` if `Z`'s variety is infinite.
pub fn sign_determination_multivariate(
    p: &[MultivariatePolynomial],
    z: &[MultivariatePolynomial],
    order: MonomialOrder,
) -> Result<Vec<SignCondition>, RanError> {
    let mgr = TarskiQueryManager::new_multivariate(z, order)?;
    Ok(sign_determination_core(p, &mut |q: &MultivariatePolynomial| {
        mgr.taq_mv(q)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranalg_poly::polynomial::mpoly::Monomial;
    use ranalg_poly::Variable;

    fn x2_minus_2() -> UnivariatePolynomial<Rational> {
        UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE])
    }

    #[test]
    fn s8_single_poly_equals_its_own_zero_set() {
        // sign_determination([x^2-2], [x^2-2]) on {+sqrt2, -sqrt2}: the
        // polynomial is zero at every point of its own zero set.
        let z = x2_minus_2();
        let result = sign_determination_univariate(&[z.clone()], &z);
        assert_eq!(result, vec![SignCondition::single(Sign::Zero)]);
    }

    #[test]
    fn s9_x_on_roots_of_x2_minus_1() {
        // sign_determination([x], [x^2-1]) on {-1, +1}: x is negative at -1,
        // positive at +1, in ascending-root order POS-then-NEG per the
        // reference ordering (spec.md §8 scenario S9).
        let x = UnivariatePolynomial::new(vec![Rational::ZERO, Rational::ONE]);
        let z = UnivariatePolynomial::new(vec![Rational::from(-1), Rational::ZERO, Rational::ONE]);
        let result = sign_determination_univariate(&[x], &z);
        assert_eq!(
            result,
            vec![SignCondition::single(Sign::Positive), SignCondition::single(Sign::Negative)]
        );
    }

    #[test]
    fn two_polynomial_family_extends_single_polynomial_result() {
        // sign_determination([x, x^2-2], [x^2-2]): the leading poly is
        // x^2-2 itself (zero on its own zero set); every returned condition
        // must extend that result, per spec.md §8 testable property 6.
        let z = x2_minus_2();
        let x = UnivariatePolynomial::new(vec![Rational::ZERO, Rational::ONE]);
        let result = sign_determination_univariate(&[x, z.clone()], &z);
        for tau in &result {
            assert_eq!(tau.0[1], Sign::Zero);
        }
        assert!(!result.is_empty());
    }

    #[test]
    fn multivariate_circle_and_axis() {
        let x = Variable::new();
        let y = Variable::new();
        let circle = MultivariatePolynomial::from_terms([
            (Monomial::single(x, 2), Rational::ONE),
            (Monomial::single(y, 2), Rational::ONE),
            (Monomial::one(), Rational::from(-1)),
        ]);
        let axis = MultivariatePolynomial::from_terms([(Monomial::single(x, 1).mul(&Monomial::single(y, 1)), Rational::ONE)]);
        let x_poly = MultivariatePolynomial::from_terms([(Monomial::single(x, 1), Rational::ONE)]);
        let result = sign_determination_multivariate(
            &[x_poly],
            &[circle, axis],
            MonomialOrder::DegRevLex,
        )
        .unwrap();
        // four axis intersections: (±1,0), (0,±1) — x takes POS, NEG and
        // ZERO (twice, collapsed to one sign condition).
        let signs: std::collections::HashSet<Sign> = result.iter().map(|c| c.0[0]).collect();
        assert!(signs.contains(&Sign::Positive));
        assert!(signs.contains(&Sign::Negative));
        assert!(signs.contains(&Sign::Zero));
    }
}
