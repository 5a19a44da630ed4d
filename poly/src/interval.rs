//! An interval over an ordered value, with strict, weak, or infinite bounds.
//!
//! This is the `Interval` collaborator spec.md assumes as external; CARL's
//! `carl::Interval` (see `ran_interval.h`'s use of `BoundType::STRICT`) is
//! the model. Only the operations the RAN core actually needs are exposed.

use ranalg_nzq::Rational;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundType {
    Strict,
    Weak,
    Infty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<T = Rational> {
    lower: Option<T>,
    lower_ty: BoundType,
    upper: Option<T>,
    upper_ty: BoundType,
}

impl<T: Clone + PartialOrd> Interval<T> {
    pub fn new_open(lower: T, upper: T) -> Self {
        Interval {
            lower: Some(lower),
            lower_ty: BoundType::Strict,
            upper: Some(upper),
            upper_ty: BoundType::Strict,
        }
    }

    pub fn new_closed(lower: T, upper: T) -> Self {
        Interval {
            lower: Some(lower),
            lower_ty: BoundType::Weak,
            upper: Some(upper),
            upper_ty: BoundType::Weak,
        }
    }

    pub fn point(value: T) -> Self {
        Interval {
            lower: Some(value.clone()),
            lower_ty: BoundType::Weak,
            upper: Some(value),
            upper_ty: BoundType::Weak,
        }
    }

    pub fn unbounded() -> Self {
        Interval {
            lower: None,
            lower_ty: BoundType::Infty,
            upper: None,
            upper_ty: BoundType::Infty,
        }
    }

    pub fn lower(&self) -> Option<&T> {
        self.lower.as_ref()
    }
    pub fn upper(&self) -> Option<&T> {
        self.upper.as_ref()
    }
    pub fn lower_bound_type(&self) -> BoundType {
        self.lower_ty
    }
    pub fn upper_bound_type(&self) -> BoundType {
        self.upper_ty
    }

    pub fn is_point(&self) -> bool {
        match (&self.lower, &self.upper, self.lower_ty, self.upper_ty) {
            (Some(a), Some(b), BoundType::Weak, BoundType::Weak) => a == b,
            _ => false,
        }
    }

    pub fn set_lower(&mut self, value: T, ty: BoundType) {
        self.lower = Some(value);
        self.lower_ty = ty;
    }

    pub fn set_upper(&mut self, value: T, ty: BoundType) {
        self.upper = Some(value);
        self.upper_ty = ty;
    }

    pub fn contains(&self, x: &T) -> bool {
        let lower_ok = match (&self.lower, self.lower_ty) {
            (None, _) | (_, BoundType::Infty) => true,
            (Some(l), BoundType::Strict) => l < x,
            (Some(l), BoundType::Weak) => l <= x,
        };
        let upper_ok = match (&self.upper, self.upper_ty) {
            (None, _) | (_, BoundType::Infty) => true,
            (Some(u), BoundType::Strict) => x < u,
            (Some(u), BoundType::Weak) => x <= u,
        };
        lower_ok && upper_ok
    }

    /// `true` when `self` and `other` share at least one point.
    pub fn intersects(&self, other: &Interval<T>) -> bool {
        let below_other_upper = match (&self.lower, &other.upper) {
            (Some(a), Some(b)) => {
                if self.lower_ty == BoundType::Strict || other.upper_ty == BoundType::Strict {
                    a < b
                } else {
                    a <= b
                }
            }
            _ => true,
        };
        let above_other_lower = match (&self.upper, &other.lower) {
            (Some(a), Some(b)) => {
                if self.upper_ty == BoundType::Strict || other.lower_ty == BoundType::Strict {
                    b < a
                } else {
                    b <= a
                }
            }
            _ => true,
        };
        below_other_upper && above_other_lower
    }

    pub fn is_disjoint_from(&self, other: &Interval<T>) -> bool {
        !self.intersects(other)
    }
}

impl<T: Clone + PartialOrd + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = match self.lower_ty {
            BoundType::Strict => "(",
            BoundType::Weak => "[",
            BoundType::Infty => "(",
        };
        let u = match self.upper_ty {
            BoundType::Strict => ")",
            BoundType::Weak => "]",
            BoundType::Infty => ")",
        };
        let lo = self
            .lower
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-inf".into());
        let hi = self
            .upper
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "+inf".into());
        write!(f, "{l}{lo}, {hi}{u}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_interval_contains_interior_not_endpoints() {
        let i = Interval::new_open(Rational::from(1), Rational::from(2));
        assert!(!i.contains(&Rational::from(1)));
        assert!(i.contains(&Rational::from_integers(3, 2)));
        assert!(!i.contains(&Rational::from(2)));
    }

    #[test]
    fn disjoint_intervals() {
        let a = Interval::new_open(Rational::from(0), Rational::from(1));
        let b = Interval::new_open(Rational::from(2), Rational::from(3));
        assert!(a.is_disjoint_from(&b));
        let c = Interval::new_open(Rational::from(0), Rational::from(5));
        assert!(!a.is_disjoint_from(&c));
    }
}
