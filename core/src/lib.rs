//! The real algebraic number (RAN) core: real-root isolation, the RAN
//! representation and its refinement/comparison/evaluation protocol, and
//! sign determination via Tarski query managers (spec.md §2's five-layer
//! stack, built atop `ranalg-nzq` and `ranalg-poly`).

pub mod charpoly;
pub mod error;
pub mod matrix;
pub mod mult_table;
pub mod multivariate;
pub mod ran;
pub mod root_isolation;
pub mod sign_determination;
pub mod tarski;

pub use error::RanError;
pub use multivariate::{evaluate, evaluate_constraint, real_roots_multivariate, Assignment};
pub use ran::Ran;
pub use root_isolation::{real_roots, RealRootsResult};
pub use sign_determination::{sign_determination_multivariate, sign_determination_univariate, SignCondition};
pub use tarski::TarskiQueryManager;
