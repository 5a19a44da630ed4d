//! Walks through the scenario table of spec.md §8 against the live crate:
//! isolating the roots of `x^2 - 2`, comparing the two real algebraic
//! numbers that come out, evaluating a multivariate polynomial under a RAN
//! assignment, and running sign determination on a small polynomial family.

use ranalg::poly::polynomial::mpoly::{Monomial, MonomialOrder, MultivariatePolynomial};
use ranalg::{
    evaluate, evaluate_constraint, real_roots, real_roots_multivariate, sign_determination_multivariate,
    sign_determination_univariate, Assignment, Interval, Rational, Relation, Trivalent, UnivariatePolynomial,
    Variable,
};

fn x2_minus_2() -> UnivariatePolynomial<Rational> {
    UnivariatePolynomial::new(vec![Rational::from(-2), Rational::ZERO, Rational::ONE])
}

fn main() {
    tracing_subscriber::fmt::init();

    let p = x2_minus_2();
    let search = Interval::new_open(Rational::from(-10), Rational::from(10));
    let roots = match real_roots(&p, &search) {
        ranalg::RealRootsResult::Roots(rs) => rs,
        other => panic!("expected two roots of x^2-2, got {other:?}"),
    };
    println!("real_roots(x^2 - 2, (-10, 10)) found {} roots:", roots.len());
    for r in &roots {
        println!("  floor={} ceil={} interval={:?}", r.floor(), r.ceil(), r.interval());
    }

    let mut neg_sqrt2 = roots[0].clone();
    let mut pos_sqrt2 = roots[1].clone();
    println!(
        "-sqrt(2) < sqrt(2): {}",
        ranalg::Ran::compare(&mut neg_sqrt2, &mut pos_sqrt2, Relation::Less)
    );

    let y = Variable::new();
    let f = MultivariatePolynomial::from_terms([
        (Monomial::single(y, 2), Rational::ONE),
        (Monomial::one(), Rational::from(-2)),
    ]);
    let mut assignment = Assignment::new();
    assignment.insert(y, pos_sqrt2.clone());
    let value = evaluate(&f, &assignment).expect("y^2 - 2 is fully assigned");
    println!("evaluate(y^2 - 2, {{y -> sqrt(2)}}) = {:?}", value.value());

    let doubled_y = MultivariatePolynomial::from_terms([(Monomial::single(y, 1), Rational::from(2))]);
    let verdict = evaluate_constraint(&doubled_y, Relation::Greater, &assignment);
    println!("evaluate(2y > 0, {{y -> sqrt(2)}}) = {:?}", verdict);
    assert_eq!(verdict, Trivalent::True);

    let x = Variable::new();
    let f_univ = UnivariatePolynomial::new(vec![
        MultivariatePolynomial::constant(Rational::from(-2)),
        MultivariatePolynomial::zero(),
        MultivariatePolynomial::constant(Rational::ONE),
    ]);
    let mut empty_assignment = Assignment::new();
    let mv_roots = real_roots_multivariate(&f_univ, x, &mut empty_assignment, &search);
    println!("real_roots_multivariate(x^2 - 2, {{}}, (-10, 10)) = {mv_roots:?}");

    let x_poly = UnivariatePolynomial::new(vec![Rational::ZERO, Rational::ONE]);
    let conditions = sign_determination_univariate(&[x_poly], &x2_minus_2());
    println!("sign_determination([x], [x^2-2]) = {conditions:?}");

    let circle = MultivariatePolynomial::from_terms([
        (Monomial::single(x, 2), Rational::ONE),
        (Monomial::single(y, 2), Rational::ONE),
        (Monomial::one(), Rational::from(-1)),
    ]);
    let axes = MultivariatePolynomial::from_terms([(Monomial::single(x, 1).mul(&Monomial::single(y, 1)), Rational::ONE)]);
    let x_as_mpoly = MultivariatePolynomial::from_terms([(Monomial::single(x, 1), Rational::ONE)]);
    let mv_conditions =
        sign_determination_multivariate(&[x_as_mpoly], &[circle, axes], MonomialOrder::DegRevLex)
            .expect("the unit circle meets the axes in a zero-dimensional variety");
    println!("sign_determination([x], [circle, axes]) = {mv_conditions:?}");
}
