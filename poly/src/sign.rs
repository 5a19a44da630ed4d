//! Signs and three-valued logic, shared across the polynomial and RAN layers.

use std::cmp::Ordering;
use std::ops::Mul;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn of_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    pub fn of_i32(n: i32) -> Self {
        match n.cmp(&0) {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }

    pub fn neg(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        Sign::of_i32(self.to_i32() * rhs.to_i32())
    }
}

/// The outcome of a constraint evaluation that may not be decidable yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trivalent {
    True,
    False,
    Indeterminate,
}

impl Trivalent {
    pub fn is_determined(self) -> bool {
        !matches!(self, Trivalent::Indeterminate)
    }
}

/// `EQ, NEQ, LESS, LEQ, GREATER, GEQ` relations a constraint may compare
/// a polynomial value against zero, or two RANs against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Neq,
    Less,
    Leq,
    Greater,
    Geq,
}

impl Relation {
    /// Does `sign` (of `lhs - rhs`, or of a bare polynomial value) satisfy this relation against zero?
    pub fn holds_for_sign(self, sign: Sign) -> bool {
        match self {
            Relation::Eq => sign == Sign::Zero,
            Relation::Neq => sign != Sign::Zero,
            Relation::Less => sign == Sign::Negative,
            Relation::Leq => sign != Sign::Positive,
            Relation::Greater => sign == Sign::Positive,
            Relation::Geq => sign != Sign::Negative,
        }
    }

    /// `None` when the sign alone cannot decide this relation (never happens: sign always decides).
    pub fn decide(self, sign: Sign) -> Trivalent {
        if self.holds_for_sign(sign) {
            Trivalent::True
        } else {
            Trivalent::False
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_multiplication() {
        assert_eq!(Sign::Positive * Sign::Negative, Sign::Negative);
        assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
        assert_eq!(Sign::Zero * Sign::Positive, Sign::Zero);
    }

    #[test]
    fn relation_decisions() {
        assert_eq!(Relation::Greater.decide(Sign::Positive), Trivalent::True);
        assert_eq!(Relation::Greater.decide(Sign::Zero), Trivalent::False);
        assert_eq!(Relation::Leq.decide(Sign::Zero), Trivalent::True);
    }
}
