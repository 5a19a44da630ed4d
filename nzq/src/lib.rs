//! Arbitrary-precision naturals, integers and rationals, wrapping `malachite`.
//!
//! These three newtypes are the numeric foundation the rest of the `ranalg`
//! workspace is built on: polynomial coefficients, interval endpoints and
//! real algebraic number sample points are all `Rational`.

pub mod integer;
pub mod natural;
pub mod rational;

pub use integer::Integer;
pub use natural::Natural;
pub use rational::Rational;
