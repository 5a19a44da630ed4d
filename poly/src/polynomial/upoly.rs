//! Univariate polynomials, generic over their coefficient ring.
//!
//! Coefficients are stored ascending by degree (`coeffs[i]` is the coefficient
//! of $x^i$) and always trimmed so the last entry is non-zero, mirroring the
//! teacher's preference for a `Vec`-backed dense representation (see
//! `Matrix`'s own `Vec`-backed `elems` in `src/rings/matrix.rs`) over a sparse
//! map — univariate polynomials arising from root isolation are low-degree and
//! dense in practice.

use super::{FieldCoeff, PolyCoeff};
use crate::interval::Interval;
use crate::sign::Sign;
use ranalg_nzq::{Integer, Rational};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnivariatePolynomial<C: PolyCoeff> {
    coeffs: Vec<C>,
}

impl<C: PolyCoeff> UnivariatePolynomial<C> {
    pub fn new(mut coeffs: Vec<C>) -> Self {
        while coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        UnivariatePolynomial { coeffs }
    }

    pub fn zero() -> Self {
        UnivariatePolynomial { coeffs: vec![] }
    }

    pub fn constant(c: C) -> Self {
        Self::new(vec![c])
    }

    pub fn monomial(coeff: C, degree: usize) -> Self {
        let mut coeffs = vec![C::zero(); degree];
        coeffs.push(coeff);
        Self::new(coeffs)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    pub fn degree(&self) -> Option<usize> {
        if self.coeffs.is_empty() {
            None
        } else {
            Some(self.coeffs.len() - 1)
        }
    }

    pub fn coeffs(&self) -> &[C] {
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> C {
        self.coeffs.get(i).cloned().unwrap_or_else(C::zero)
    }

    pub fn leading_coefficient(&self) -> C {
        self.coeffs.last().cloned().unwrap_or_else(C::zero)
    }

    pub fn eval(&self, x: &C) -> C {
        // Horner's method.
        let mut acc = C::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + c;
        }
        acc
    }

    pub fn derivative(&self) -> Self {
        if self.coeffs.len() <= 1 {
            return Self::zero();
        }
        let mut out = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, c) in self.coeffs.iter().enumerate().skip(1) {
            let mut acc = C::zero();
            for _ in 0..i {
                acc = acc + c;
            }
            out.push(acc);
        }
        Self::new(out)
    }

    pub fn add(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(self.coeff(i) + &other.coeff(i));
        }
        Self::new(out)
    }

    pub fn sub(&self, other: &Self) -> Self {
        let n = self.coeffs.len().max(other.coeffs.len());
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(self.coeff(i) - &other.coeff(i));
        }
        Self::new(out)
    }

    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().cloned().map(|c| -c).collect())
    }

    pub fn scale(&self, c: &C) -> Self {
        Self::new(self.coeffs.iter().map(|a| a.clone() * c).collect())
    }

    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut out = vec![C::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] = out[i + j].clone() + &(a.clone() * b);
            }
        }
        Self::new(out)
    }

    /// Classical pseudo-division: returns `(pseudo_quotient, pseudo_remainder)` such that
    /// `lc(other)^(deg(self) - deg(other) + 1) * self == other * quotient + remainder`,
    /// with `deg(remainder) < deg(other)`. Works over any commutative ring, no division
    /// required — the standard way `resultant`/`gcd` are built for coefficient rings
    /// that aren't fields (`MultivariatePolynomial` coefficients, in particular).
    pub fn pseudo_divide(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "pseudo-division by the zero polynomial");
        let m = self.degree().unwrap_or(0);
        let n = other.degree().unwrap_or(0);
        if self.is_zero() || m < n {
            return (Self::zero(), self.clone());
        }
        let lc_b = other.leading_coefficient();
        let mut remainder = self.clone();
        let mut quotient = Self::zero();
        let mut delta = m - n + 1;
        while !remainder.is_zero() && remainder.degree().unwrap() >= n && delta > 0 {
            let deg_r = remainder.degree().unwrap();
            let lc_r = remainder.leading_coefficient();
            let shift = deg_r - n;
            let term = Self::monomial(lc_r.clone(), shift);
            quotient = quotient.scale(&lc_b).add(&term);
            remainder = remainder.scale(&lc_b).sub(&term.mul(other));
            delta -= 1;
        }
        (quotient, remainder)
    }

    pub fn pseudo_remainder(&self, other: &Self) -> Self {
        self.pseudo_divide(other).1
    }

    /// Resultant of two univariate polynomials over the shared coefficient ring,
    /// via the naive Euclidean pseudo-remainder sequence (not the subresultant
    /// variant CARL uses internally for coefficient-growth control — acceptable
    /// here since RAN root counts keep these polynomials small).
    pub fn resultant(&self, other: &Self) -> C {
        if self.is_zero() || other.is_zero() {
            return C::zero();
        }
        let mut a = self.clone();
        let mut b = other.clone();
        let mut sign = C::one();
        loop {
            let da = match a.degree() {
                Some(d) => d,
                None => return C::zero(),
            };
            let db = match b.degree() {
                Some(d) => d,
                None => return C::zero(),
            };
            if db == 0 {
                // resultant(a, const b) = b^deg(a)
                let mut acc = C::one();
                for _ in 0..da {
                    acc = acc * &b.leading_coefficient();
                }
                return sign * &acc;
            }
            if da % 2 == 1 && db % 2 == 1 {
                sign = -sign;
            }
            let r = a.pseudo_remainder(&b);
            a = b;
            b = r;
        }
    }

    pub fn compose_with_shift(&self, delta: &C) -> Self
    where
        C: Clone,
    {
        // p(x + delta), via repeated synthetic evaluation (Horner in the shift).
        let n = self.coeffs.len();
        let mut table = self.coeffs.clone();
        for i in 1..n {
            for j in (i..n).rev() {
                let shifted = table[j].clone() * delta;
                table[j - 1] = table[j - 1].clone() + &shifted;
            }
        }
        Self::new(table)
    }
}

impl<C: PolyCoeff + fmt::Display> fmt::Display for UnivariatePolynomial<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(f, "({c})*x^{i}")?;
        }
        Ok(())
    }
}

// --- Rational-specific operations: field division, gcd, square-free decomposition,
// Sturm sequences, Lagrange root bounds, bisection-based real-root isolation. ---
impl UnivariatePolynomial<Rational> {
    pub fn divide(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero());
        let n = other.degree().unwrap();
        let lc_b = other.leading_coefficient();
        let mut remainder = self.clone();
        let mut quotient = Self::zero();
        while !remainder.is_zero() && remainder.degree().unwrap() >= n {
            let deg_r = remainder.degree().unwrap();
            let lc_r = remainder.leading_coefficient();
            let coeff = lc_r.div(&lc_b);
            let term = Self::monomial(coeff, deg_r - n);
            quotient = quotient.add(&term);
            remainder = remainder.sub(&term.mul(other));
        }
        (quotient, remainder)
    }

    pub fn remainder(&self, other: &Self) -> Self {
        self.divide(other).1
    }

    pub fn monic(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let lc = self.leading_coefficient();
        self.scale(&Rational::ONE.div(&lc))
    }

    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.remainder(&b);
            a = b;
            b = r;
        }
        a.monic()
    }

    /// The square-free part of `self`: `self / gcd(self, self')`, monic.
    pub fn square_free_part(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let d = self.derivative();
        if d.is_zero() {
            return self.monic();
        }
        let g = self.gcd(&d);
        self.divide(&g).0.monic()
    }

    pub fn is_square_free(&self) -> bool {
        !self.is_zero() && self.gcd(&self.derivative()).degree() == Some(0)
    }

    /// The Sturm sequence `p0 = p, p1 = p', p_{k+1} = -rem(p_{k-1}, p_k)`.
    pub fn sturm_sequence(&self) -> Vec<Self> {
        let mut seq = vec![self.clone(), self.derivative()];
        loop {
            let k = seq.len();
            let prev2 = &seq[k - 2];
            let prev1 = &seq[k - 1];
            if prev1.is_zero() {
                break;
            }
            let r = prev2.remainder(prev1).neg();
            if r.is_zero() {
                seq.push(r);
                break;
            }
            seq.push(r);
        }
        seq
    }

    /// Number of sign variations of the Sturm sequence evaluated at `x`
    /// (`None` for an endpoint at infinity, handled by leading-coefficient signs).
    fn sign_variations_at(seq: &[Self], x: Option<&Rational>) -> usize {
        let signs: Vec<Sign> = seq
            .iter()
            .filter_map(|p| {
                if p.is_zero() {
                    return None;
                }
                let s = match x {
                    Some(v) => Sign::of_i32(p.eval(v).numerator().sign()),
                    None => {
                        // sign at +/- infinity is the sign of the leading coefficient,
                        // flipped at -infinity for odd-degree terms.
                        Sign::of_i32(p.leading_coefficient().numerator().sign())
                    }
                };
                if s == Sign::Zero { None } else { Some(s) }
            })
            .collect();
        let mut variations = 0;
        for w in signs.windows(2) {
            if w[0] != w[1] {
                variations += 1;
            }
        }
        variations
    }

    fn sign_variations_at_neg_infinity(seq: &[Self]) -> usize {
        let signs: Vec<Sign> = seq
            .iter()
            .filter_map(|p| {
                if p.is_zero() {
                    return None;
                }
                let deg = p.degree().unwrap();
                let lc_sign = Sign::of_i32(p.leading_coefficient().numerator().sign());
                let s = if deg % 2 == 0 { lc_sign } else { lc_sign.neg() };
                Some(s)
            })
            .collect();
        let mut variations = 0;
        for w in signs.windows(2) {
            if w[0] != w[1] {
                variations += 1;
            }
        }
        variations
    }

    /// Number of distinct real roots of `self` in the interval `(lo, hi)`,
    /// counted via sign variations of the Sturm sequence at the endpoints.
    pub fn count_roots_in_open_interval(&self, lo: &Rational, hi: &Rational) -> usize {
        let seq = self.sturm_sequence();
        let v_lo = Self::sign_variations_at(&seq, Some(lo));
        let v_hi = Self::sign_variations_at(&seq, Some(hi));
        v_lo.saturating_sub(v_hi)
    }

    pub fn count_roots_on_real_line(&self) -> usize {
        let seq = self.sturm_sequence();
        let v_neg = Self::sign_variations_at_neg_infinity(&seq);
        let v_pos = Self::sign_variations_at(&seq, None);
        v_neg.saturating_sub(v_pos)
    }

    /// The signed count $\sum \operatorname{sgn}(q(x))$ over real roots $x$ of `self`,
    /// computed as the Sturm-sequence sign-variation difference of `(self, self' * q)`.
    pub fn tarski_query(&self, q: &Self) -> i64 {
        let z_prime_q = self.derivative().mul(q);
        let seq = Self::sturm_sequence_of_pair(self, &z_prime_q);
        let v_neg = Self::sign_variations_at_neg_infinity(&seq);
        let v_pos = Self::sign_variations_at(&seq, None);
        v_neg as i64 - v_pos as i64
    }

    /// `sum sgn(q(x))` over the real roots $x$ of `self` lying in `(lo, hi)`,
    /// via the Sturm-sequence sign-variation difference of `(self, self' * q)`
    /// taken at the two endpoints instead of at `±∞`.
    pub fn tarski_query_in_interval(&self, q: &Self, lo: &Rational, hi: &Rational) -> i64 {
        let z_prime_q = self.derivative().mul(q);
        let seq = Self::sturm_sequence_of_pair(self, &z_prime_q);
        let v_lo = Self::sign_variations_at(&seq, Some(lo));
        let v_hi = Self::sign_variations_at(&seq, Some(hi));
        v_lo as i64 - v_hi as i64
    }

    fn sturm_sequence_of_pair(p0: &Self, p1: &Self) -> Vec<Self> {
        let mut seq = vec![p0.clone(), p1.clone()];
        loop {
            let k = seq.len();
            let prev2 = &seq[k - 2];
            let prev1 = &seq[k - 1];
            if prev1.is_zero() {
                break;
            }
            let r = prev2.remainder(prev1).neg();
            seq.push(r.clone());
            if r.is_zero() {
                break;
            }
        }
        seq
    }

    /// A Lagrange bound `B` such that every real root lies in `(-B, B)`.
    pub fn lagrange_bound(&self) -> Rational {
        if self.is_zero() || self.degree() == Some(0) {
            return Rational::ZERO;
        }
        let lc = self.leading_coefficient().abs_ref();
        let mut max_ratio = Rational::ZERO;
        for c in &self.coeffs[..self.coeffs.len() - 1] {
            let ratio = c.abs_ref().div(&lc);
            if ratio > max_ratio {
                max_ratio = ratio;
            }
        }
        Rational::ONE + max_ratio
    }

    /// Lagrange lower bound on the *positive* real roots (0 if there are none,
    /// or if the polynomial has no positive coefficients to bound against).
    pub fn lagrange_positive_lower_bound(&self) -> Rational {
        if self.is_zero() {
            return Rational::ZERO;
        }
        let b = self.lagrange_bound();
        if b == Rational::ZERO {
            Rational::ZERO
        } else {
            Rational::ONE.div(&(Rational::ONE + b))
        }
    }

    /// Lagrange upper bound on the *negative* real roots (0 if there are none).
    pub fn lagrange_negative_upper_bound(&self) -> Rational {
        let reflected = self.compose_with_shift_sign_flip();
        -reflected.lagrange_positive_lower_bound()
    }

    fn compose_with_shift_sign_flip(&self) -> Self {
        // p(-x): flip the sign of odd-degree coefficients.
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
                .collect(),
        )
    }

    pub fn floor_of_root_bound(&self) -> Integer {
        self.lagrange_bound().ceil()
    }

    /// Full real-root isolation: square-free part, Lagrange bound, Sturm-guided
    /// bisection down to one root per sub-interval within `search`.
    pub fn isolate_real_roots_in(
        &self,
        search: &Interval<Rational>,
    ) -> Vec<Interval<Rational>> {
        if self.is_zero() || self.degree() == Some(0) {
            return vec![];
        }
        let sf = self.square_free_part();
        let b = sf.lagrange_bound();
        let default_lo = -b.clone();
        let default_hi = b;
        let lo = search
            .lower()
            .cloned()
            .unwrap_or(default_lo.clone())
            .max(default_lo);
        let hi = search
            .upper()
            .cloned()
            .unwrap_or(default_hi.clone())
            .min(default_hi);
        if lo >= hi {
            return vec![];
        }
        let mut isolating = vec![];
        Self::bisect_isolate(&sf, &lo, &hi, &mut isolating);
        isolating
    }

    fn bisect_isolate(
        sf: &Self,
        lo: &Rational,
        hi: &Rational,
        out: &mut Vec<Interval<Rational>>,
    ) {
        let n = sf.count_roots_in_open_interval(lo, hi);
        if n == 0 {
            return;
        }
        if n == 1 {
            out.push(Interval::new_open(lo.clone(), hi.clone()));
            return;
        }
        let mid = Rational::simplest_rational_in_open_interval(lo, hi);
        let mid = if &mid > lo && &mid < hi {
            mid
        } else {
            (lo.clone() + hi.clone()) / Rational::TWO
        };
        if &sf.eval(&mid) == &Rational::ZERO {
            // split around the rational root to keep both halves root-count-correct
            let eps = (hi.clone() - lo.clone()) / Rational::from(1_000_000u32);
            Self::bisect_isolate(sf, lo, &(mid.clone() - eps.clone()), out);
            out.push(Interval::point(mid.clone()));
            Self::bisect_isolate(sf, &(mid + eps), hi, out);
            return;
        }
        Self::bisect_isolate(sf, lo, &mid, out);
        Self::bisect_isolate(sf, &mid, hi, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p_x2_minus_2() -> UnivariatePolynomial<Rational> {
        UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE])
    }

    #[test]
    fn eval_and_degree() {
        let p = p_x2_minus_2();
        assert_eq!(p.degree(), Some(2));
        assert_eq!(p.eval(&Rational::from(2)), Rational::from(2));
    }

    #[test]
    fn derivative_of_x2_minus_2_is_2x() {
        let p = p_x2_minus_2();
        let d = p.derivative();
        assert_eq!(d.eval(&Rational::from(3)), Rational::from(6));
    }

    #[test]
    fn square_free_x2_minus_2_is_itself() {
        let p = p_x2_minus_2();
        assert!(p.is_square_free());
    }

    #[test]
    fn count_roots_matches_two_irrational_roots() {
        let p = p_x2_minus_2();
        assert_eq!(p.count_roots_in_open_interval(&Rational::from(-10), &Rational::from(10)), 2);
        assert_eq!(p.count_roots_in_open_interval(&Rational::from(1), &Rational::from(2)), 1);
    }

    #[test]
    fn isolate_real_roots_gives_two_disjoint_intervals() {
        let p = p_x2_minus_2();
        let search = Interval::new_open(Rational::from(-10), Rational::from(10));
        let roots = p.isolate_real_roots_in(&search);
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn resultant_of_coprime_is_nonzero() {
        let p = UnivariatePolynomial::new(vec![Rational::from(-1), Rational::ZERO, Rational::ONE]); // x^2 - 1
        let q = UnivariatePolynomial::new(vec![Rational::from(-4), Rational::ZERO, Rational::ONE]); // x^2 - 4
        let r = p.resultant(&q);
        assert_ne!(r, Rational::ZERO);
    }

    #[test]
    fn tarski_query_on_simple_case() {
        // z = x^2 - 1 has roots {-1, 1}; q = x is negative at -1, positive at 1: TaQ = 0.
        let z = UnivariatePolynomial::new(vec![Rational::from(-1), Rational::ZERO, Rational::ONE]);
        let q = UnivariatePolynomial::new(vec![Rational::ZERO, Rational::ONE]);
        assert_eq!(z.tarski_query(&q), 0);
    }
}
