//! Multivariate evaluation and substitution under a partial RAN assignment
//! (spec.md §4.3): `real_roots` for a polynomial univariate in one variable
//! with multivariate-polynomial coefficients, `evaluate` for a plain
//! multivariate polynomial, and `evaluate` for a polynomial relation.

use crate::ran::{min_refinement_width, Ran};
use crate::root_isolation::RealRootsResult;
use ranalg_nzq::Rational;
use ranalg_poly::polynomial::mpoly::MultivariatePolynomial;
use ranalg_poly::{FieldCoeff, Interval, Relation, Sign, Trivalent, UnivariatePolynomial, Variable};
use std::collections::{BTreeMap, BTreeSet};

pub type Assignment = BTreeMap<Variable, Ran>;

/// Lifts a plain-rational univariate polynomial to one with constant
/// `MultivariatePolynomial` coefficients, so it can be combined (via
/// resultant) with polynomials over other variables.
fn promote(p: &UnivariatePolynomial<Rational>) -> UnivariatePolynomial<MultivariatePolynomial> {
    UnivariatePolynomial::new(
        p.coeffs()
            .iter()
            .map(|c| MultivariatePolynomial::constant(c.clone()))
            .collect(),
    )
}

/// The reverse of `promote`: valid only when every coefficient is a constant
/// (no remaining free variables).
fn demote(p: &UnivariatePolynomial<MultivariatePolynomial>) -> Option<UnivariatePolynomial<Rational>> {
    let mut out = Vec::with_capacity(p.coeffs().len());
    for c in p.coeffs() {
        if c.is_zero() {
            out.push(Rational::ZERO);
        } else {
            let (m, v) = c.terms().next()?;
            if m.variables().count() != 0 || c.terms().count() != 1 {
                return None;
            }
            out.push(v.clone());
        }
    }
    Some(UnivariatePolynomial::new(out))
}

fn substitute_numeric(
    f: &UnivariatePolynomial<MultivariatePolynomial>,
    v: Variable,
    value: &Rational,
) -> UnivariatePolynomial<MultivariatePolynomial> {
    UnivariatePolynomial::new(
        f.coeffs()
            .iter()
            .map(|c| c.substitute_numeric(v, value))
            .collect(),
    )
}

fn free_variables(f: &UnivariatePolynomial<MultivariatePolynomial>) -> BTreeSet<Variable> {
    let mut set = BTreeSet::new();
    for c in f.coeffs() {
        set.extend(c.variables());
    }
    set
}

/// Eliminates every RAN-valued variable from `f` (main variable `main`) via
/// iterated resultants with each RAN's defining polynomial, highest-degree
/// RAN first (spec.md §4.3 step 5). Returns `None` if elimination cannot
/// remove all auxiliary variables.
fn eliminate_ran_variables(
    f: &UnivariatePolynomial<MultivariatePolynomial>,
    main: Variable,
    assignment: &mut Assignment,
) -> Option<UnivariatePolynomial<MultivariatePolynomial>> {
    let mut remaining: Vec<Variable> = free_variables(f).into_iter().filter(|&v| v != main).collect();
    remaining.sort_by_key(|v| {
        std::cmp::Reverse(
            assignment
                .get(v)
                .and_then(|r| r.polynomial())
                .and_then(|p| p.degree())
                .unwrap_or(0),
        )
    });

    let mut cur = f.clone();
    for v in remaining {
        let ran = assignment.get_mut(&v)?;
        // Point 1 from SPEC_FULL.md §4: refine before algebraic substitution.
        ran.refine_until_width_below(&min_refinement_width());
        let defining = ran.polynomial()?;
        let cur_as_mpoly = MultivariatePolynomial::from_univariate_in(main, &cur);
        let cur_in_v = cur_as_mpoly.as_univariate_in(v);
        let defining_in_v = promote(&defining);
        let eliminated: MultivariatePolynomial = cur_in_v.resultant(&defining_in_v);
        cur = eliminated.as_univariate_in(main);
    }

    if free_variables(&cur).iter().any(|&v| v != main) {
        return None;
    }
    Some(cur)
}

/// `real_roots` for a polynomial univariate in `main`, multivariate in the
/// rest, under a partial RAN assignment (spec.md §4.3).
#[tracing::instrument(level = "debug", skip(f_univ, assignment, search))]
pub fn real_roots_multivariate(
    f_univ: &UnivariatePolynomial<MultivariatePolynomial>,
    main: Variable,
    assignment: &mut Assignment,
    search: &Interval<Rational>,
) -> RealRootsResult {
    if f_univ.is_zero() {
        return RealRootsResult::Nullified;
    }
    if f_univ.is_constant() && f_univ.coeff(0).is_zero() {
        return RealRootsResult::Nullified;
    }
    if f_univ.is_constant() {
        return RealRootsResult::Roots(vec![]);
    }

    // Step 2: numeric substitution in place, or bail on a free variable.
    let mut f = f_univ.clone();
    for v in free_variables(&f) {
        if v == main {
            continue;
        }
        match assignment.get(&v) {
            None => return RealRootsResult::NonUnivariate,
            Some(ran) => {
                if let Some(value) = ran.value() {
                    f = substitute_numeric(&f, v, &value);
                }
            }
        }
    }
    if f.is_zero() {
        return RealRootsResult::Nullified;
    }

    let remaining_ran_vars: Vec<Variable> = free_variables(&f).into_iter().filter(|&v| v != main).collect();
    let p_tilde = if remaining_ran_vars.is_empty() {
        match demote(&f) {
            Some(p) => p,
            None => return RealRootsResult::NonUnivariate,
        }
    } else {
        match eliminate_ran_variables(&f, main, assignment) {
            None => return RealRootsResult::NonUnivariate,
            Some(eliminated) => match demote(&eliminated) {
                Some(p) => p,
                None => return RealRootsResult::NonUnivariate,
            },
        }
    };

    if p_tilde.is_zero() {
        return RealRootsResult::Nullified;
    }

    let isolated = crate::root_isolation::real_roots(&p_tilde, search);
    let RealRootsResult::Roots(candidates) = isolated else {
        return isolated;
    };

    // Step 6: verify and discard spurious candidates by direct evaluation of
    // the original (pre-elimination) univariate-in-main polynomial.
    let mut verified = vec![];
    for candidate in candidates {
        let mut test_assignment = assignment.clone();
        test_assignment.insert(main, candidate.clone());
        let value = eval_upoly_of_mpoly(&f, main, &test_assignment);
        if value.map(|v| v.is_zero()).unwrap_or(true) {
            verified.push(candidate);
        }
    }
    RealRootsResult::Roots(verified)
}

fn eval_upoly_of_mpoly(
    f: &UnivariatePolynomial<MultivariatePolynomial>,
    main: Variable,
    assignment: &Assignment,
) -> Option<Ran> {
    let full = MultivariatePolynomial::from_univariate_in(main, f);
    evaluate(&full, assignment)
}

/// Substitutes numeric entries of `m` into `f`.
fn substitute_all_numeric(f: &MultivariatePolynomial, assignment: &Assignment) -> MultivariatePolynomial {
    let mut cur = f.clone();
    for (&v, ran) in assignment {
        if let Some(value) = ran.value() {
            cur = cur.substitute_numeric(v, &value);
        }
    }
    cur
}

/// `evaluate(f, M)` (spec.md §4.3): returns `Some(RAN)`, or `None` if a free
/// variable remains after substitution.
#[tracing::instrument(level = "debug", skip(f, assignment))]
pub fn evaluate(f: &MultivariatePolynomial, assignment: &Assignment) -> Option<Ran> {
    let substituted = substitute_all_numeric(f, assignment);
    if substituted.is_zero() {
        return Some(Ran::from_rational(Rational::ZERO));
    }
    let free: BTreeSet<Variable> = substituted.variables();
    if free.is_empty() {
        // constant polynomial: read off its value directly.
        let (_, c) = substituted.terms().next().unwrap();
        return Some(Ran::from_rational(c.clone()));
    }
    if free.iter().any(|v| !assignment.contains_key(v)) {
        return None;
    }

    // Introduce a fresh auxiliary variable `aux` and form q(aux,...) = aux - f.
    let aux = Variable::new();
    let q = MultivariatePolynomial::variable(aux).sub(&substituted);
    let mut aux_assignment = assignment.clone();
    let q_univ = q.as_univariate_in(aux);
    let mut f_univ_aux = q_univ;
    let vars_in_q: Vec<Variable> = free_variables(&f_univ_aux).into_iter().filter(|&v| v != aux).collect();
    for v in &vars_in_q {
        if let Some(val) = aux_assignment.get(v).and_then(|r| r.value()) {
            f_univ_aux = substitute_numeric(&f_univ_aux, *v, &val);
        }
    }
    let p_tilde = match eliminate_ran_variables(&f_univ_aux, aux, &mut aux_assignment) {
        Some(eliminated) => demote(&eliminated)?,
        None => return None,
    };
    if p_tilde.is_zero() {
        return None;
    }

    // Interval-evaluate f under the current RAN intervals for an enclosing bound.
    let interval_assignment: BTreeMap<Variable, Interval<Rational>> = assignment
        .iter()
        .map(|(&v, r)| {
            let iv = r
                .interval()
                .unwrap_or_else(|| Interval::point(r.value().unwrap()));
            (v, iv)
        })
        .collect();
    let mut enclosing = substituted.interval_eval(&interval_assignment);

    let sf = p_tilde.square_free_part();
    loop {
        let lo = enclosing.lower().cloned().unwrap_or_else(|| -sf.lagrange_bound());
        let hi = enclosing.upper().cloned().unwrap_or_else(|| sf.lagrange_bound());
        let count = sf.count_roots_in_open_interval(&lo, &hi);
        if count == 1 && lo < hi {
            return Ran::from_poly_interval(sf, Interval::new_open(lo, hi));
        }
        // refine every RAN-valued assignment once and recompute the enclosure.
        if !refine_all(assignment, &mut enclosing, &substituted) {
            return None;
        }
    }
}

fn refine_all(
    assignment: &Assignment,
    enclosing: &mut Interval<Rational>,
    substituted: &MultivariatePolynomial,
) -> bool {
    let mut assignment = assignment.clone();
    let mut any = false;
    let mut new_intervals = BTreeMap::new();
    for (&v, ran) in assignment.iter_mut() {
        if ran.value().is_none() {
            ran.refine_step();
            any = true;
        }
        new_intervals.insert(
            v,
            ran.interval()
                .unwrap_or_else(|| Interval::point(ran.value().unwrap())),
        );
    }
    if any {
        *enclosing = substituted.interval_eval(&new_intervals);
    }
    any
}

/// `evaluate(c, M)` for a polynomial relation `f rho 0` (spec.md §4.3).
#[tracing::instrument(level = "debug", skip(f, assignment))]
pub fn evaluate_constraint(f: &MultivariatePolynomial, relation: Relation, assignment: &Assignment) -> Trivalent {
    let substituted = substitute_all_numeric(f, assignment);
    let free: BTreeSet<Variable> = substituted.variables();
    if free.is_empty() {
        let (_, c) = substituted
            .terms()
            .next()
            .map(|(m, c)| (m.clone(), c.clone()))
            .unwrap_or((ranalg_poly::polynomial::mpoly::Monomial::one(), Rational::ZERO));
        return relation.decide(Sign::of_i32(c.numerator().sign()));
    }

    let interval_assignment: BTreeMap<Variable, Interval<Rational>> = assignment
        .iter()
        .filter(|(v, _)| free.contains(v))
        .map(|(&v, r)| {
            let iv = r
                .interval()
                .unwrap_or_else(|| Interval::point(r.value().unwrap()));
            (v, iv)
        })
        .collect();
    let mut enclosing = substituted.interval_eval(&interval_assignment);
    loop {
        if let Some(verdict) = decide_from_interval(&enclosing, relation) {
            return verdict;
        }
        match evaluate(f, assignment) {
            Some(ran) if ran.is_numeric() => {
                let v = ran.value().unwrap();
                return relation.decide(Sign::of_i32(v.numerator().sign()));
            }
            _ => {}
        }
        let mut assignment_mut = assignment.clone();
        let mut any = false;
        let mut new_intervals = BTreeMap::new();
        for (&v, ran) in assignment_mut.iter_mut() {
            if !free.contains(&v) {
                continue;
            }
            if ran.value().is_none() {
                ran.refine_step();
                any = true;
            }
            new_intervals.insert(
                v,
                ran.interval()
                    .unwrap_or_else(|| Interval::point(ran.value().unwrap())),
            );
        }
        if !any {
            return Trivalent::Indeterminate;
        }
        enclosing = substituted.interval_eval(&new_intervals);
    }
}

fn decide_from_interval(iv: &Interval<Rational>, relation: Relation) -> Option<Trivalent> {
    let strictly_positive = iv.lower().map(|l| l > &Rational::ZERO).unwrap_or(false);
    let strictly_negative = iv.upper().map(|u| u < &Rational::ZERO).unwrap_or(false);
    let is_zero = iv.is_point() && iv.lower() == Some(&Rational::ZERO);
    match relation {
        Relation::Greater if strictly_positive => Some(Trivalent::True),
        Relation::Greater if strictly_negative || is_zero => Some(Trivalent::False),
        Relation::Geq if strictly_positive || is_zero => Some(Trivalent::True),
        Relation::Geq if strictly_negative => Some(Trivalent::False),
        Relation::Less if strictly_negative => Some(Trivalent::True),
        Relation::Less if strictly_positive || is_zero => Some(Trivalent::False),
        Relation::Leq if strictly_negative || is_zero => Some(Trivalent::True),
        Relation::Leq if strictly_positive => Some(Trivalent::False),
        Relation::Eq if is_zero => Some(Trivalent::True),
        Relation::Eq if strictly_positive || strictly_negative => Some(Trivalent::False),
        Relation::Neq if is_zero => Some(Trivalent::False),
        Relation::Neq if strictly_positive || strictly_negative => Some(Trivalent::True),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranalg_poly::polynomial::mpoly::Monomial;

    fn sqrt2() -> Ran {
        let p = UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE]);
        Ran::from_poly_interval(p, Interval::new_open(Rational::from(1), Rational::from(2))).unwrap()
    }

    #[test]
    fn evaluate_y_squared_minus_2_at_sqrt2_is_zero() {
        let y = Variable::new();
        let f = MultivariatePolynomial::from_terms([
            (Monomial::single(y, 2), Rational::ONE),
            (Monomial::one(), Rational::from(-2)),
        ]);
        let mut assignment = Assignment::new();
        assignment.insert(y, sqrt2());
        let result = evaluate(&f, &assignment).unwrap();
        assert!(result.is_zero());
    }

    #[test]
    fn evaluate_2x_greater_than_zero_at_sqrt2() {
        let x = Variable::new();
        let f = MultivariatePolynomial::from_terms([(Monomial::single(x, 1), Rational::from(2))]);
        let mut assignment = Assignment::new();
        assignment.insert(x, sqrt2());
        assert_eq!(evaluate_constraint(&f, Relation::Greater, &assignment), Trivalent::True);
    }
}
