//! The concrete scenario table of spec.md §8 (S1-S10), run end to end against
//! the public API: root isolation, comparison, multivariate evaluation, sign
//! determination and the Tarski-query manager.

use ranalg_core::{
    evaluate, evaluate_constraint, real_roots, sign_determination_univariate, Assignment, Ran, RealRootsResult,
    TarskiQueryManager,
};
use ranalg_nzq::Rational;
use ranalg_poly::polynomial::mpoly::{Monomial, MonomialOrder, MultivariatePolynomial};
use ranalg_poly::{Interval, Relation, Sign, Trivalent, UnivariatePolynomial, Variable};

fn x2_minus_2() -> UnivariatePolynomial<Rational> {
    UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE])
}

fn x_minus_1() -> UnivariatePolynomial<Rational> {
    UnivariatePolynomial::new(vec![Rational::from(-1), Rational::ONE])
}

// S1: a RAN built directly from (x^2-2, (1,2)) knows its own interval and sign.
#[test]
fn s1_ran_from_poly_interval() {
    let ran = Ran::from_poly_interval(x2_minus_2(), Interval::new_open(Rational::from(1), Rational::from(2))).unwrap();
    assert_eq!(ran.floor(), 1.into());
    assert_eq!(ran.ceil(), 2.into());
    assert_eq!(ran.sgn(&x_minus_1()), Sign::Positive);
}

// S2: real_roots(x^2-2, (-10,10)) returns two ascending roots in the expected sub-intervals.
#[test]
fn s2_real_roots_of_x2_minus_2() {
    let search = Interval::new_open(Rational::from(-10), Rational::from(10));
    let RealRootsResult::Roots(roots) = real_roots(&x2_minus_2(), &search) else {
        panic!("expected Roots");
    };
    assert_eq!(roots.len(), 2);
    let neg = roots[0].interval().unwrap();
    let pos = roots[1].interval().unwrap();
    assert!(neg.upper().unwrap() <= &Rational::from(-1));
    assert!(neg.lower().unwrap() >= &Rational::from(-2));
    assert!(pos.lower().unwrap() >= &Rational::from(1));
    assert!(pos.upper().unwrap() <= &Rational::from(2));
}

// S3: real_roots(0, (-10,10)) is Nullified.
#[test]
fn s3_real_roots_of_zero_is_nullified() {
    let zero = UnivariatePolynomial::new(vec![Rational::ZERO]);
    let search = Interval::new_open(Rational::from(-10), Rational::from(10));
    assert!(matches!(real_roots(&zero, &search), RealRootsResult::Nullified));
}

// S4: real_roots(17, (-10,10)) is Roots(empty).
#[test]
fn s4_real_roots_of_nonzero_constant_is_empty() {
    let seventeen = UnivariatePolynomial::new(vec![Rational::from(17)]);
    let search = Interval::new_open(Rational::from(-10), Rational::from(10));
    let RealRootsResult::Roots(roots) = real_roots(&seventeen, &search) else {
        panic!("expected Roots");
    };
    assert!(roots.is_empty());
}

// S5: comparing the two roots of x^2-2 orders them correctly and leaves both
// valid with disjoint refined intervals.
#[test]
fn s5_compare_sqrt2_roots() {
    let mut alpha =
        Ran::from_poly_interval(x2_minus_2(), Interval::new_open(Rational::from(1), Rational::from(2))).unwrap();
    let mut beta =
        Ran::from_poly_interval(x2_minus_2(), Interval::new_open(Rational::from(-2), Rational::from(-1))).unwrap();
    assert!(Ran::compare(&mut beta, &mut alpha, Relation::Less));

    let iv_alpha = alpha.interval().unwrap();
    let iv_beta = beta.interval().unwrap();
    assert!(iv_beta.upper().unwrap() <= iv_alpha.lower().unwrap());
}

// S6: evaluate(y^2 - 2, {y -> sqrt(2)}) is the numeric RAN 0.
#[test]
fn s6_evaluate_y_squared_minus_2_at_sqrt2() {
    let alpha =
        Ran::from_poly_interval(x2_minus_2(), Interval::new_open(Rational::from(1), Rational::from(2))).unwrap();
    let y = Variable::new();
    let f = MultivariatePolynomial::from_terms([
        (Monomial::single(y, 2), Rational::ONE),
        (Monomial::one(), Rational::from(-2)),
    ]);
    let mut assignment = Assignment::new();
    assignment.insert(y, alpha);
    let result = evaluate(&f, &assignment).unwrap();
    assert!(result.is_numeric());
    assert!(result.is_zero());
}

// S7: evaluate(2x > 0, {x -> sqrt(2)}) is true.
#[test]
fn s7_evaluate_2x_greater_than_zero_at_sqrt2() {
    let alpha =
        Ran::from_poly_interval(x2_minus_2(), Interval::new_open(Rational::from(1), Rational::from(2))).unwrap();
    let x = Variable::new();
    let f = MultivariatePolynomial::from_terms([(Monomial::single(x, 1), Rational::from(2))]);
    let mut assignment = Assignment::new();
    assignment.insert(x, alpha);
    assert_eq!(evaluate_constraint(&f, Relation::Greater, &assignment), Trivalent::True);
}

// S8: sign_determination([x^2-2], [x^2-2]) is [(ZERO)].
#[test]
fn s8_sign_determination_single_poly_on_its_own_zero_set() {
    let z = x2_minus_2();
    let result = sign_determination_univariate(&[z.clone()], &z);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].0, vec![Sign::Zero]);
}

// S9: sign_determination([x], [x^2-1]) is [(POS),(NEG)] in that order.
#[test]
fn s9_sign_determination_x_on_roots_of_x2_minus_1() {
    let x = UnivariatePolynomial::new(vec![Rational::ZERO, Rational::ONE]);
    let z = UnivariatePolynomial::new(vec![Rational::from(-1), Rational::ZERO, Rational::ONE]);
    let result = sign_determination_univariate(&[x], &z);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].0, vec![Sign::Positive]);
    assert_eq!(result[1].0, vec![Sign::Negative]);
}

// S10: the multivariate Tarski-query manager on {x^2+y^2-1, x*y} has taq(1) = 4.
#[test]
fn s10_tarski_query_manager_on_circle_and_axes() {
    let x = Variable::new();
    let y = Variable::new();
    let circle = MultivariatePolynomial::from_terms([
        (Monomial::single(x, 2), Rational::ONE),
        (Monomial::single(y, 2), Rational::ONE),
        (Monomial::one(), Rational::from(-1)),
    ]);
    let axes = MultivariatePolynomial::from_terms([(Monomial::single(x, 1).mul(&Monomial::single(y, 1)), Rational::ONE)]);
    let mgr = TarskiQueryManager::new_multivariate(&[circle, axes], MonomialOrder::DegRevLex).unwrap();
    assert_eq!(mgr.num_real_zeros(), 4);
}
