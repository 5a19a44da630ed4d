//! Variables, intervals, signs and polynomials — the "PolyKit"/"Interval"/
//! "VariablePool" collaborators spec.md assumes are supplied externally.

pub mod interval;
pub mod polynomial;
pub mod sign;
pub mod variable;

pub use interval::{BoundType, Interval};
pub use polynomial::{FieldCoeff, MultivariatePolynomial, PolyCoeff, UnivariatePolynomial};
pub use sign::{Relation, Sign, Trivalent};
pub use variable::{Variable, VariablePool};
