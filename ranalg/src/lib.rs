//! `ranalg` re-exports the `ranalg-nzq`/`ranalg-poly`/`ranalg-core` stack
//! under a single crate, mirroring the teacher's own `algebraeon` re-export
//! crate (`algebraeon/Cargo.toml`, which bundles `algebraeon-sets`,
//! `algebraeon-nzq`, `algebraeon-groups`, `algebraeon-rings` and
//! `algebraeon-geometry` the same way).

pub use ranalg_core as core;
pub use ranalg_nzq as nzq;
pub use ranalg_poly as poly;

pub use ranalg_core::{
    evaluate, evaluate_constraint, real_roots, real_roots_multivariate, sign_determination_multivariate,
    sign_determination_univariate, Assignment, Ran, RanError, RealRootsResult, SignCondition, TarskiQueryManager,
};
pub use ranalg_nzq::{Integer, Natural, Rational};
pub use ranalg_poly::{
    BoundType, FieldCoeff, Interval, MultivariatePolynomial, PolyCoeff, Relation, Sign, Trivalent,
    UnivariatePolynomial, Variable, VariablePool,
};
