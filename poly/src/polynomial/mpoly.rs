//! Multivariate polynomials over `Rational`, represented sparsely as a
//! sum of monomials. Mirrors the teacher's preference for `BTreeMap`-backed
//! sparse containers over generic rings (see how `rings/src/rings/natural`
//! and friends lean on ordered maps for structural sharing).

use super::upoly::UnivariatePolynomial;
use super::PolyCoeff;
use crate::interval::Interval;
use crate::variable::Variable;
use ranalg_nzq::Rational;
use std::collections::BTreeMap;
use std::fmt;

/// A monomial: the exponent of every variable that appears with non-zero power.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Monomial(BTreeMap<Variable, u32>);

impl Monomial {
    pub fn one() -> Self {
        Monomial(BTreeMap::new())
    }

    pub fn single(v: Variable, power: u32) -> Self {
        let mut m = BTreeMap::new();
        if power > 0 {
            m.insert(v, power);
        }
        Monomial(m)
    }

    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn power_of(&self, v: Variable) -> u32 {
        *self.0.get(&v).unwrap_or(&0)
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.keys().copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Variable, u32)> + '_ {
        self.0.iter().map(|(&v, &p)| (v, p))
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (&v, &p) in &other.0 {
            *out.entry(v).or_insert(0) += p;
        }
        Monomial(out)
    }

    pub fn divides(&self, other: &Monomial) -> bool {
        self.0.iter().all(|(v, &p)| other.power_of(*v) >= p)
    }

    pub fn divide(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (v, p) in other.entries() {
            let e = out.entry(v).or_insert(0);
            *e -= p;
            if *e == 0 {
                out.remove(&v);
            }
        }
        Monomial(out)
    }

    pub fn lcm(&self, other: &Monomial) -> Monomial {
        let mut out = self.0.clone();
        for (&v, &p) in &other.0 {
            let e = out.entry(v).or_insert(0);
            *e = (*e).max(p);
        }
        Monomial(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonomialOrder {
    Lex,
    DegRevLex,
}

impl MonomialOrder {
    /// Compares two monomials under a total order consistent with multiplication,
    /// matching `Variable`'s own `Ord` (fixed at variable-creation time) to fix
    /// the variable precedence used by lex and by degrevlex tie-breaking.
    pub fn compare(self, a: &Monomial, b: &Monomial) -> std::cmp::Ordering {
        match self {
            MonomialOrder::Lex => {
                let mut vars: Vec<Variable> =
                    a.variables().chain(b.variables()).collect();
                vars.sort();
                vars.dedup();
                for v in vars {
                    let pa = a.power_of(v);
                    let pb = b.power_of(v);
                    if pa != pb {
                        return pa.cmp(&pb);
                    }
                }
                std::cmp::Ordering::Equal
            }
            MonomialOrder::DegRevLex => {
                let da = a.degree();
                let db = b.degree();
                if da != db {
                    return da.cmp(&db);
                }
                let mut vars: Vec<Variable> =
                    a.variables().chain(b.variables()).collect();
                vars.sort();
                vars.dedup();
                for v in vars.into_iter().rev() {
                    let pa = a.power_of(v);
                    let pb = b.power_of(v);
                    if pa != pb {
                        return pb.cmp(&pa);
                    }
                }
                std::cmp::Ordering::Equal
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultivariatePolynomial {
    terms: BTreeMap<Monomial, Rational>,
}

impl MultivariatePolynomial {
    pub fn zero() -> Self {
        MultivariatePolynomial {
            terms: BTreeMap::new(),
        }
    }

    pub fn constant(c: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if c != Rational::ZERO {
            terms.insert(Monomial::one(), c);
        }
        MultivariatePolynomial { terms }
    }

    pub fn variable(v: Variable) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(Monomial::single(v, 1), Rational::ONE);
        MultivariatePolynomial { terms }
    }

    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, Rational)>) -> Self {
        let mut map = BTreeMap::new();
        for (m, c) in terms {
            if c == Rational::ZERO {
                continue;
            }
            *map.entry(m).or_insert_with(|| Rational::ZERO) += c;
        }
        map.retain(|_, c| *c != Rational::ZERO);
        MultivariatePolynomial { terms: map }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    pub fn coefficient(&self, m: &Monomial) -> Rational {
        self.terms.get(m).cloned().unwrap_or(Rational::ZERO)
    }

    pub fn variables(&self) -> std::collections::BTreeSet<Variable> {
        let mut set = std::collections::BTreeSet::new();
        for m in self.terms.keys() {
            set.extend(m.variables());
        }
        set
    }

    pub fn leading_term(&self, order: MonomialOrder) -> Option<(&Monomial, &Rational)> {
        self.terms
            .iter()
            .max_by(|(ma, _), (mb, _)| order.compare(ma, mb))
    }

    pub fn leading_monomial(&self, order: MonomialOrder) -> Option<Monomial> {
        self.leading_term(order).map(|(m, _)| m.clone())
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut terms = self.terms.clone();
        for (m, c) in &other.terms {
            let entry = terms.entry(m.clone()).or_insert_with(|| Rational::ZERO);
            *entry += c.clone();
        }
        terms.retain(|_, c| *c != Rational::ZERO);
        MultivariatePolynomial { terms }
    }

    pub fn neg(&self) -> Self {
        MultivariatePolynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c.clone()))
                .collect(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn scale(&self, c: &Rational) -> Self {
        if *c == Rational::ZERO {
            return Self::zero();
        }
        MultivariatePolynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, a)| (m.clone(), a.clone() * c))
                .collect(),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut terms: BTreeMap<Monomial, Rational> = BTreeMap::new();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                let m = ma.mul(mb);
                let entry = terms.entry(m).or_insert_with(|| Rational::ZERO);
                *entry += ca.clone() * cb;
            }
        }
        terms.retain(|_, c| *c != Rational::ZERO);
        MultivariatePolynomial { terms }
    }

    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Substitutes a single variable with a rational value.
    pub fn substitute_numeric(&self, v: Variable, value: &Rational) -> Self {
        let mut terms: BTreeMap<Monomial, Rational> = BTreeMap::new();
        for (m, c) in &self.terms {
            let p = m.power_of(v);
            let mut new_m = m.clone();
            let mut coeff = c.clone();
            if p > 0 {
                new_m = Monomial(
                    m.entries()
                        .filter(|(vv, _)| *vv != v)
                        .collect::<BTreeMap<_, _>>(),
                );
                for _ in 0..p {
                    coeff = coeff * value;
                }
            }
            let entry = terms.entry(new_m).or_insert_with(|| Rational::ZERO);
            *entry += coeff;
        }
        terms.retain(|_, c| *c != Rational::ZERO);
        MultivariatePolynomial { terms }
    }

    pub fn eval_numeric(&self, assignment: &std::collections::BTreeMap<Variable, Rational>) -> Rational {
        let mut acc = Rational::ZERO;
        for (m, c) in &self.terms {
            let mut term = c.clone();
            for (v, p) in m.entries() {
                let val = assignment
                    .get(&v)
                    .expect("eval_numeric requires a full assignment");
                for _ in 0..p {
                    term = term * val;
                }
            }
            acc += term;
        }
        acc
    }

    /// Interval-evaluates under an assignment of (possibly non-degenerate)
    /// intervals, by straightforward interval arithmetic over the monomial sum
    /// (no Horner-style sharpening) — sound but not the tightest enclosure.
    pub fn interval_eval(
        &self,
        assignment: &std::collections::BTreeMap<Variable, Interval<Rational>>,
    ) -> Interval<Rational> {
        let mut acc = Interval::point(Rational::ZERO);
        for (m, c) in &self.terms {
            let mut term = Interval::point(c.clone());
            for (v, p) in m.entries() {
                let iv = assignment
                    .get(&v)
                    .expect("interval_eval requires a full assignment");
                for _ in 0..p {
                    term = interval_mul(&term, iv);
                }
            }
            acc = interval_add(&acc, &term);
        }
        acc
    }

    /// Reinterprets `self` as a univariate polynomial in `main`, with
    /// coefficients that are multivariate polynomials in the remaining
    /// variables — the "UPoly_of_MPoly" shape spec.md §4.3/§6 names.
    pub fn as_univariate_in(&self, main: Variable) -> UnivariatePolynomial<MultivariatePolynomial> {
        let mut by_degree: BTreeMap<u32, MultivariatePolynomial> = BTreeMap::new();
        for (m, c) in &self.terms {
            let d = m.power_of(main);
            let rest = Monomial(
                m.entries()
                    .filter(|(v, _)| *v != main)
                    .collect::<BTreeMap<_, _>>(),
            );
            let entry = by_degree
                .entry(d)
                .or_insert_with(MultivariatePolynomial::zero);
            *entry = entry.add(&MultivariatePolynomial::from_terms([(rest, c.clone())]));
        }
        let max_deg = by_degree.keys().copied().max().unwrap_or(0);
        let mut coeffs = Vec::with_capacity(max_deg as usize + 1);
        for d in 0..=max_deg {
            coeffs.push(
                by_degree
                    .remove(&d)
                    .unwrap_or_else(MultivariatePolynomial::zero),
            );
        }
        UnivariatePolynomial::new(coeffs)
    }

    pub fn from_univariate_in(
        main: Variable,
        p: &UnivariatePolynomial<MultivariatePolynomial>,
    ) -> Self {
        let mut acc = MultivariatePolynomial::zero();
        for (d, c) in p.coeffs().iter().enumerate() {
            let m_term = MultivariatePolynomial::from_terms([(
                Monomial::single(main, d as u32),
                Rational::ONE,
            )]);
            acc = acc.add(&c.mul(&m_term));
        }
        acc
    }
}

fn interval_add(a: &Interval<Rational>, b: &Interval<Rational>) -> Interval<Rational> {
    let lo = match (a.lower(), b.lower()) {
        (Some(x), Some(y)) => Some(x.clone() + y.clone()),
        _ => None,
    };
    let hi = match (a.upper(), b.upper()) {
        (Some(x), Some(y)) => Some(x.clone() + y.clone()),
        _ => None,
    };
    match (lo, hi) {
        (Some(l), Some(h)) => Interval::new_closed(l, h),
        _ => Interval::unbounded(),
    }
}

fn interval_mul(a: &Interval<Rational>, b: &Interval<Rational>) -> Interval<Rational> {
    match (a.lower(), a.upper(), b.lower(), b.upper()) {
        (Some(al), Some(au), Some(bl), Some(bu)) => {
            let candidates = [
                al.clone() * bl.clone(),
                al.clone() * bu.clone(),
                au.clone() * bl.clone(),
                au.clone() * bu.clone(),
            ];
            let lo = candidates.iter().cloned().min().unwrap();
            let hi = candidates.into_iter().max().unwrap();
            Interval::new_closed(lo, hi)
        }
        _ => Interval::unbounded(),
    }
}

impl PolyCoeff for MultivariatePolynomial {
    fn zero() -> Self {
        MultivariatePolynomial::zero()
    }
    fn one() -> Self {
        MultivariatePolynomial::constant(Rational::ONE)
    }
    fn is_zero(&self) -> bool {
        MultivariatePolynomial::is_zero(self)
    }
}

impl std::ops::Add<&MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;
    fn add(self, rhs: &MultivariatePolynomial) -> Self::Output {
        MultivariatePolynomial::add(&self, rhs)
    }
}
impl std::ops::Sub<&MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;
    fn sub(self, rhs: &MultivariatePolynomial) -> Self::Output {
        MultivariatePolynomial::sub(&self, rhs)
    }
}
impl std::ops::Mul<&MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;
    fn mul(self, rhs: &MultivariatePolynomial) -> Self::Output {
        MultivariatePolynomial::mul(&self, rhs)
    }
}
impl std::ops::Neg for MultivariatePolynomial {
    type Output = MultivariatePolynomial;
    fn neg(self) -> Self::Output {
        MultivariatePolynomial::neg(&self)
    }
}

impl fmt::Display for MultivariatePolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let mut first = true;
        for (m, c) in &self.terms {
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(f, "({c})")?;
            for (v, p) in m.entries() {
                write!(f, "*{v}^{p}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_and_eval() {
        let x = Variable::new();
        let y = Variable::new();
        // f = x^2 + y - 1
        let f = MultivariatePolynomial::from_terms([
            (Monomial::single(x, 2), Rational::ONE),
            (Monomial::single(y, 1), Rational::ONE),
            (Monomial::one(), Rational::from(-1)),
        ]);
        let g = f.substitute_numeric(x, &Rational::from(2));
        // g = y + 3
        let mut assignment = std::collections::BTreeMap::new();
        assignment.insert(y, Rational::from(1));
        assert_eq!(g.eval_numeric(&assignment), Rational::from(4));
    }

    #[test]
    fn as_univariate_round_trips() {
        let x = Variable::new();
        let y = Variable::new();
        let f = MultivariatePolynomial::from_terms([
            (Monomial::single(x, 2), Rational::ONE),
            (Monomial::single(y, 1), Rational::ONE),
        ]);
        let u = f.as_univariate_in(x);
        assert_eq!(u.degree(), Some(2));
        let back = MultivariatePolynomial::from_univariate_in(x, &u);
        assert_eq!(back, f);
    }
}
