//! Polynomial containers: a generic univariate polynomial `UnivariatePolynomial<C>`
//! (instantiated both over `Rational` coefficients, and over `MultivariatePolynomial`
//! coefficients for the "polynomial univariate in its main variable, multivariate
//! in the rest" shape spec.md calls `UPoly_of_MPoly`), and `MultivariatePolynomial`.
//!
//! Two concrete polynomial traits, per spec.md §9's design note: `PolyCoeff` for
//! anything that can sit in a polynomial's coefficient slot, and `FieldCoeff` for
//! coefficient types supporting exact division (only `Rational` implements it —
//! `MultivariatePolynomial` coefficients only ever need ring operations).

pub mod groebner;
pub mod mpoly;
pub mod upoly;

pub use mpoly::MultivariatePolynomial;
pub use upoly::UnivariatePolynomial;

use ranalg_nzq::Rational;

/// Anything that can be a polynomial coefficient: a commutative ring with 0 and 1.
pub trait PolyCoeff:
    Clone
    + PartialEq
    + std::fmt::Debug
    + for<'a> std::ops::Add<&'a Self, Output = Self>
    + for<'a> std::ops::Sub<&'a Self, Output = Self>
    + for<'a> std::ops::Mul<&'a Self, Output = Self>
    + std::ops::Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
}

/// Coefficient types that additionally support exact division: only `Rational`.
/// Needed for gcd/square-free decomposition, which require a field.
pub trait FieldCoeff: PolyCoeff {
    fn div(&self, rhs: &Self) -> Self;
}

impl PolyCoeff for Rational {
    fn zero() -> Self {
        Rational::ZERO
    }
    fn one() -> Self {
        Rational::ONE
    }
    fn is_zero(&self) -> bool {
        self == &Rational::ZERO
    }
}

impl FieldCoeff for Rational {
    fn div(&self, rhs: &Self) -> Self {
        self.clone() / rhs.clone()
    }
}
