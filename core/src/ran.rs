//! The real algebraic number (RAN) representation: a rational, or a
//! square-free univariate polynomial paired with an open interval known to
//! contain exactly one of its real roots, plus a cached sign at the lower
//! endpoint. Refinement mutates the shared record in place — multiple `RAN`
//! handles may point at the same record (`Rc<RefCell<_>>`, matching the
//! teacher's single-threaded, no-locking concurrency model).

use ranalg_nzq::{Integer, Rational};
use ranalg_poly::{FieldCoeff, Interval, Relation, Sign, UnivariatePolynomial};
use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Before substituting RAN-valued assignments into a multivariate polynomial,
/// CARL refines every RAN down to this diameter first (`ran_interval_evaluation.h`,
/// `ran_interval_extra.h::ran_evaluator::assign`: `min_width = Number(1)/Number(1048576)`).
pub const MIN_REFINEMENT_WIDTH_NUM: i64 = 1;
pub const MIN_REFINEMENT_WIDTH_DEN: i64 = 1_048_576; // 2^20

pub fn min_refinement_width() -> Rational {
    Rational::from_integers(MIN_REFINEMENT_WIDTH_NUM, MIN_REFINEMENT_WIDTH_DEN)
}

#[derive(Debug, Clone)]
struct RanContent {
    poly: UnivariatePolynomial<Rational>,
    interval: Interval<Rational>,
    lower_sign: Sign,
}

impl RanContent {
    fn is_consistent(&self) -> bool {
        self.poly.is_square_free()
            && self.interval.lower().is_some()
            && self.interval.upper().is_some()
    }

    fn width(&self) -> Rational {
        self.interval.upper().unwrap().clone() - self.interval.lower().unwrap().clone()
    }
}

#[derive(Debug, Clone)]
enum RanRepr {
    Numeric(Rational),
    Algebraic(Rc<RefCell<RanContent>>),
}

/// A real algebraic number: either an exact rational, or a handle into a
/// shared, lazily-refined `(polynomial, interval, sign)` record.
#[derive(Debug, Clone)]
pub struct Ran(RanRepr);

impl Ran {
    pub fn from_rational(q: Rational) -> Self {
        Ran(RanRepr::Numeric(q))
    }

    /// Builds a non-numeric RAN from a polynomial and an open interval known
    /// to contain exactly one real root. Eagerly reduces to square-free form,
    /// collapses to numeric for degree ≤ 1 or a point interval, and refines
    /// away any integer or zero in the interior. Returns `None` if the
    /// contract is violated (no root in the interval, or more than one).
    pub fn from_poly_interval(p: UnivariatePolynomial<Rational>, interval: Interval<Rational>) -> Option<Self> {
        if p.is_zero() {
            return None;
        }
        let sf = p.square_free_part();
        let lo = interval.lower()?.clone();
        let hi = interval.upper()?.clone();
        if lo >= hi {
            return None;
        }
        if interval.is_point() {
            return Some(Ran::from_rational(lo));
        }
        let root_count = sf.count_roots_in_open_interval(&lo, &hi);
        if root_count != 1 {
            return None;
        }
        if sf.degree() == Some(1) {
            let a = sf.coeff(1);
            let b = sf.coeff(0);
            return Some(Ran::from_rational(-(b.div(&a))));
        }
        let lower_sign = Sign::of_i32(sf.eval(&lo).numerator().sign());
        let content = RanContent {
            poly: sf,
            interval: Interval::new_open(lo, hi),
            lower_sign,
        };
        let mut ran = Ran(RanRepr::Algebraic(Rc::new(RefCell::new(content))));
        ran.exclude_zero_and_integers();
        Some(ran)
    }

    fn exclude_zero_and_integers(&mut self) {
        loop {
            let Some(content) = self.content_handle() else {
                return;
            };
            let (lo, hi) = {
                let c = content.borrow();
                (c.interval.lower().unwrap().clone(), c.interval.upper().unwrap().clone())
            };
            let straddles_zero = lo < Rational::ZERO && hi > Rational::ZERO;
            // smallest integer strictly greater than `lo`; an interior integer
            // exists iff that candidate is still strictly below `hi`.
            let smallest_above_lo = Rational::from(lo.clone().floor() + Integer::ONE);
            let contains_int_strict = smallest_above_lo < hi;
            if !straddles_zero && !contains_int_strict {
                return;
            }
            if self.refine_step().is_none() {
                return;
            }
        }
    }

    fn content_handle(&self) -> Option<Rc<RefCell<RanContent>>> {
        match &self.0 {
            RanRepr::Numeric(_) => None,
            RanRepr::Algebraic(rc) => Some(rc.clone()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.0, RanRepr::Numeric(_))
    }

    pub fn value(&self) -> Option<Rational> {
        match &self.0 {
            RanRepr::Numeric(q) => Some(q.clone()),
            RanRepr::Algebraic(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(&self.0, RanRepr::Numeric(q) if *q == Rational::ZERO)
    }

    pub fn is_integral(&self) -> bool {
        match &self.0 {
            RanRepr::Numeric(q) => q.denominator() == ranalg_nzq::Natural::from(1u32),
            RanRepr::Algebraic(_) => false,
        }
    }

    pub fn interval(&self) -> Option<Interval<Rational>> {
        match &self.0 {
            RanRepr::Numeric(_) => None,
            RanRepr::Algebraic(rc) => Some(rc.borrow().interval.clone()),
        }
    }

    pub fn polynomial(&self) -> Option<UnivariatePolynomial<Rational>> {
        match &self.0 {
            RanRepr::Numeric(_) => None,
            RanRepr::Algebraic(rc) => Some(rc.borrow().poly.clone()),
        }
    }

    pub fn floor(&self) -> Integer {
        match &self.0 {
            RanRepr::Numeric(q) => q.clone().floor(),
            RanRepr::Algebraic(rc) => rc.borrow().interval.lower().unwrap().clone().floor(),
        }
    }

    pub fn ceil(&self) -> Integer {
        match &self.0 {
            RanRepr::Numeric(q) => q.clone().ceil(),
            RanRepr::Algebraic(rc) => rc.borrow().interval.upper().unwrap().clone().ceil(),
        }
    }

    /// A "nice" sample point in the current interval: prefer an integer, else
    /// the exact midpoint (deterministic sampling, per spec.md §5).
    fn nice_sample(lo: &Rational, hi: &Rational) -> Rational {
        let candidate = lo.clone().floor();
        let candidate_rat = Rational::from(candidate.clone());
        if &candidate_rat > lo && &candidate_rat < hi {
            return candidate_rat;
        }
        let next = Rational::from(candidate + Integer::ONE);
        if &next > lo && &next < hi {
            return next;
        }
        (lo.clone() + hi.clone()) / Rational::TWO
    }

    /// One bisection step. Returns `None` once numeric (a no-op refine).
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn refine_step(&mut self) -> Option<()> {
        let content = self.content_handle()?;
        let (lo, hi, poly, lower_sign) = {
            let c = content.borrow();
            (
                c.interval.lower().unwrap().clone(),
                c.interval.upper().unwrap().clone(),
                c.poly.clone(),
                c.lower_sign,
            )
        };
        let m = Self::nice_sample(&lo, &hi);
        let s = Sign::of_i32(poly.eval(&m).numerator().sign());
        if s == Sign::Zero {
            tracing::trace!(%m, "RAN collapsed to rational during refinement");
            self.0 = RanRepr::Numeric(m);
            return Some(());
        }
        let mut c = content.borrow_mut();
        if s == lower_sign {
            c.interval.set_lower(m, ranalg_poly::BoundType::Strict);
        } else {
            c.interval.set_upper(m, ranalg_poly::BoundType::Strict);
        }
        debug_assert!(c.is_consistent());
        Some(())
    }

    pub fn refine(&mut self) {
        self.refine_step();
    }

    pub fn refine_until_width_below(&mut self, width: &Rational) {
        loop {
            match &self.0 {
                RanRepr::Numeric(_) => return,
                RanRepr::Algebraic(rc) => {
                    if &rc.borrow().width() <= width {
                        return;
                    }
                }
            }
            if self.refine_step().is_none() {
                return;
            }
        }
    }

    /// Refines with the pivot `q` (must lie in the current interval) as the
    /// bisection point, returning the sign relationship between `q` and `self`
    /// (`Zero` if the RAN collapses to exactly `q`), or `None` if `q` lies
    /// outside the current interval.
    pub fn refine_using(&mut self, q: &Rational) -> Option<Sign> {
        let content = self.content_handle()?;
        let (lo, hi, poly, lower_sign) = {
            let c = content.borrow();
            (
                c.interval.lower().unwrap().clone(),
                c.interval.upper().unwrap().clone(),
                c.poly.clone(),
                c.lower_sign,
            )
        };
        if q <= &lo || q >= &hi {
            return None;
        }
        let s = Sign::of_i32(poly.eval(q).numerator().sign());
        if s == Sign::Zero {
            self.0 = RanRepr::Numeric(q.clone());
            return Some(Sign::Zero);
        }
        let mut c = content.borrow_mut();
        if s == lower_sign {
            c.interval.set_lower(q.clone(), ranalg_poly::BoundType::Strict);
            Some(Sign::Positive)
        } else {
            c.interval.set_upper(q.clone(), ranalg_poly::BoundType::Strict);
            Some(Sign::Negative)
        }
    }

    /// Sign of `q` (univariate, same main variable) at this RAN's value.
    pub fn sgn(&self, q: &UnivariatePolynomial<Rational>) -> Sign {
        match &self.0 {
            RanRepr::Numeric(v) => Sign::of_i32(q.eval(v).numerator().sign()),
            RanRepr::Algebraic(rc) => {
                let c = rc.borrow();
                if &c.poly == q {
                    return Sign::Zero;
                }
                let lo = c.interval.lower().unwrap();
                let hi = c.interval.upper().unwrap();
                let count = c.poly.tarski_query_in_interval(q, lo, hi);
                debug_assert!((-1..=1).contains(&count));
                Sign::of_i32(count as i32)
            }
        }
    }

    pub fn contained_in(&mut self, other: &Interval<Rational>) -> bool {
        match self.content_handle() {
            None => {
                let v = self.value().unwrap();
                other.contains(&v)
            }
            Some(_) => {
                if let Some(lo) = other.lower() {
                    self.refine_using(lo);
                }
                if let Some(hi) = other.upper() {
                    self.refine_using(hi);
                }
                let iv = self.interval().unwrap();
                other
                    .lower()
                    .is_none_or(|l| l <= iv.lower().unwrap())
                    && other.upper().is_none_or(|u| iv.upper().unwrap() <= u)
            }
        }
    }

    pub fn sample_above(&self) -> Rational {
        Rational::from(self.ceil() + Integer::ONE)
    }

    pub fn sample_below(&self) -> Rational {
        Rational::from(self.floor() - Integer::ONE)
    }

    /// Samples a rational strictly between two RANs, refining each against
    /// the other until their intervals are disjoint, narrowing the numeric
    /// side's contribution as the gap closes (`ran_interval.h::sample_between`).
    pub fn sample_between(a: &mut Ran, b: &mut Ran) -> Rational {
        loop {
            match (a.value(), b.value()) {
                (Some(x), Some(y)) => {
                    return Rational::simplest_rational_in_open_interval(
                        &x.clone().min(y.clone()),
                        &x.max(y),
                    );
                }
                _ => {}
            }
            let a_iv = a.interval();
            let b_iv = b.interval();
            match (a_iv, b_iv) {
                (Some(ai), Some(bi)) => {
                    if ai.is_disjoint_from(&bi) {
                        break;
                    }
                    a.refine_step();
                    b.refine_step();
                }
                (Some(ai), None) => {
                    let v = b.value().unwrap();
                    if !ai.contains(&v) {
                        break;
                    }
                    a.refine_step();
                }
                (None, Some(bi)) => {
                    let v = a.value().unwrap();
                    if !bi.contains(&v) {
                        break;
                    }
                    b.refine_step();
                }
                (None, None) => break,
            }
        }
        let lo = a
            .interval()
            .map(|i| i.upper().unwrap().clone())
            .or_else(|| a.value())
            .unwrap();
        let hi = b
            .interval()
            .map(|i| i.lower().unwrap().clone())
            .or_else(|| b.value())
            .unwrap();
        if lo <= hi {
            Rational::simplest_rational_in_open_interval(&lo, &hi)
        } else {
            Rational::simplest_rational_in_open_interval(&hi, &lo)
        }
    }

    /// `abs()` via variable negation for a non-numeric RAN whose interval is
    /// semi-negative: reflect the interval rather than re-isolating from
    /// scratch (`ran_interval.h::abs`).
    pub fn abs(&self) -> Ran {
        match &self.0 {
            RanRepr::Numeric(q) => Ran::from_rational(q.clone().abs()),
            RanRepr::Algebraic(rc) => {
                let c = rc.borrow();
                let lo = c.interval.lower().unwrap().clone();
                let hi = c.interval.upper().unwrap().clone();
                if lo >= Rational::ZERO {
                    return self.clone();
                }
                // interval fully negative: reflect p(x) -> p(-x), interval -> (-hi, -lo)
                debug_assert!(hi <= Rational::ZERO);
                let reflected = reflect(&c.poly);
                Ran::from_poly_interval(reflected, Interval::new_open(-hi, -lo))
                    .expect("reflecting a valid RAN interval stays valid")
            }
        }
    }

    /// Compares two RANs under `relation`, per the five-step algorithm of
    /// spec.md §4.1 (shared state / point intervals / refine-to-disjoint /
    /// gcd-unify / endpoint order).
    pub fn compare(a: &mut Ran, b: &mut Ran, relation: Relation) -> bool {
        let sign = Self::compare_sign(a, b);
        relation.holds_for_sign(sign)
    }

    fn compare_sign(a: &mut Ran, b: &mut Ran) -> Sign {
        if let (RanRepr::Algebraic(ra), RanRepr::Algebraic(rb)) = (&a.0, &b.0) {
            if Rc::ptr_eq(ra, rb) {
                return Sign::Zero;
            }
        }
        match (a.value(), b.value()) {
            (Some(x), Some(y)) => return Sign::of_ordering(x.cmp(&y)),
            (Some(x), None) => {
                let s = b.refine_using(&x).unwrap_or(Sign::Zero);
                return s.neg();
            }
            (None, Some(y)) => {
                return a.refine_using(&y).unwrap_or(Sign::Zero);
            }
            (None, None) => {}
        }
        loop {
            let ai = a.interval().unwrap();
            let bi = b.interval().unwrap();
            if ai.intersects(&bi) {
                let (al, ah) = (ai.lower().unwrap().clone(), ai.upper().unwrap().clone());
                let (bl, bh) = (bi.lower().unwrap().clone(), bi.upper().unwrap().clone());
                a.refine_using(&bl);
                a.refine_using(&bh);
                b.refine_using(&al);
                b.refine_using(&ah);
                if let (Some(x), Some(y)) = (a.value(), b.value()) {
                    return Sign::of_ordering(x.cmp(&y));
                }
                let ai2 = a.interval().unwrap();
                let bi2 = b.interval().unwrap();
                if ai2 == bi2 {
                    let pa = a.polynomial().unwrap();
                    let pb = b.polynomial().unwrap();
                    if pa == pb {
                        Self::unify(a, b);
                        return Sign::Zero;
                    }
                    let g = pa.gcd(&pb);
                    let lo = ai2.lower().unwrap();
                    let hi = ai2.upper().unwrap();
                    if g.degree().unwrap_or(0) > 0
                        && g.count_roots_in_open_interval(lo, hi) == 1
                    {
                        Self::unify_on(a, b, g);
                        return Sign::Zero;
                    }
                    a.refine_step();
                    b.refine_step();
                    continue;
                }
                a.refine_step();
                b.refine_step();
                continue;
            }
            let al = ai.lower().unwrap();
            let bl = bi.lower().unwrap();
            return Sign::of_ordering(al.cmp(bl));
        }
    }

    /// After a gcd-based unification, both handles adopt the shared defining
    /// polynomial and the sign cache is recomputed at the *current* lower
    /// endpoint — the resolution spec.md §9 prescribes for its open question.
    fn unify_on(a: &mut Ran, b: &mut Ran, shared_poly: UnivariatePolynomial<Rational>) {
        let interval = a.interval().unwrap();
        let lo = interval.lower().unwrap().clone();
        let lower_sign = Sign::of_i32(shared_poly.eval(&lo).numerator().sign());
        let content = Rc::new(RefCell::new(RanContent {
            poly: shared_poly,
            interval,
            lower_sign,
        }));
        a.0 = RanRepr::Algebraic(content.clone());
        b.0 = RanRepr::Algebraic(content);
    }

    fn unify(a: &mut Ran, b: &mut Ran) {
        if let RanRepr::Algebraic(rc) = &a.0 {
            b.0 = RanRepr::Algebraic(rc.clone());
        }
    }

    /// Hashes only `floor()`, matching CARL's `std::hash<RealAlgebraicNumberInterval>`
    /// (equal RANs must hash equally even while their intervals differ).
    pub fn hash_key(&self) -> Integer {
        self.floor()
    }
}

fn reflect(p: &UnivariatePolynomial<Rational>) -> UnivariatePolynomial<Rational> {
    UnivariatePolynomial::new(
        p.coeffs()
            .iter()
            .enumerate()
            .map(|(i, c)| if i % 2 == 1 { -c.clone() } else { c.clone() })
            .collect(),
    )
}

impl PartialEq for Ran {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.clone();
        let mut b = other.clone();
        Self::compare_sign(&mut a, &mut b) == Sign::Zero
    }
}
impl Eq for Ran {}

impl Hash for Ran {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

impl PartialOrd for Ran {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let mut a = self.clone();
        let mut b = other.clone();
        let sign = Self::compare_sign(&mut a, &mut b);
        Some(match sign {
            Sign::Negative => std::cmp::Ordering::Less,
            Sign::Zero => std::cmp::Ordering::Equal,
            Sign::Positive => std::cmp::Ordering::Greater,
        })
    }
}
impl Ord for Ran {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranalg_nzq::Rational as R;

    fn x2_minus_2() -> UnivariatePolynomial<R> {
        UnivariatePolynomial::new(vec![R::from(-2), R::ZERO, R::ONE])
    }

    #[test]
    fn from_poly_interval_sqrt2() {
        let p = x2_minus_2();
        let ran = Ran::from_poly_interval(p, Interval::new_open(R::from(1), R::from(2))).unwrap();
        assert!(!ran.is_numeric());
        assert_eq!(ran.floor(), Integer::from(1));
        assert_eq!(ran.ceil(), Integer::from(2));
    }

    #[test]
    fn sgn_against_x_minus_1() {
        let p = x2_minus_2();
        let ran = Ran::from_poly_interval(p, Interval::new_open(R::from(1), R::from(2))).unwrap();
        let q = UnivariatePolynomial::new(vec![R::from(-1), R::ONE]);
        assert_eq!(ran.sgn(&q), Sign::Positive);
    }

    #[test]
    fn compare_two_roots_of_x2_minus_2() {
        let mut a = Ran::from_poly_interval(x2_minus_2(), Interval::new_open(R::from(1), R::from(2))).unwrap();
        let mut b = Ran::from_poly_interval(x2_minus_2(), Interval::new_open(R::from(-2), R::from(-1))).unwrap();
        assert!(Ran::compare(&mut a, &mut b, Relation::Greater));
    }

    #[test]
    fn rational_root_collapses_to_numeric() {
        // x - 3 has root 3 exactly; degree 1 collapses eagerly.
        let p = UnivariatePolynomial::new(vec![R::from(-3), R::ONE]);
        let ran = Ran::from_poly_interval(p, Interval::new_open(R::from(0), R::from(10))).unwrap();
        assert!(ran.is_numeric());
        assert_eq!(ran.value(), Some(R::from(3)));
    }
}
