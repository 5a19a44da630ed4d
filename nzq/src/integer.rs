use malachite_base::num::basic::traits::{NegativeOne, One, Two, Zero};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};
use std::str::FromStr;

use crate::natural::Natural;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(malachite_nz::integer::Integer);

impl Integer {
    pub(crate) fn from_malachite(value: malachite_nz::integer::Integer) -> Self {
        Self(value)
    }
    pub(crate) fn to_malachite(self) -> malachite_nz::integer::Integer {
        self.0
    }
    pub(crate) fn to_malachite_ref(&self) -> &malachite_nz::integer::Integer {
        &self.0
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Integer {
    pub const ZERO: Self = Self(malachite_nz::integer::Integer::ZERO);
    pub const ONE: Self = Self(malachite_nz::integer::Integer::ONE);
    pub const TWO: Self = Self(malachite_nz::integer::Integer::TWO);
    pub const NEG_ONE: Self = Self(malachite_nz::integer::Integer::NEGATIVE_ONE);
}

impl From<i8> for Integer {
    fn from(value: i8) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<i16> for Integer {
    fn from(value: i16) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<isize> for Integer {
    fn from(value: isize) -> Self {
        Self(malachite_nz::integer::Integer::from(value as i64))
    }
}
impl From<u8> for Integer {
    fn from(value: u8) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(malachite_nz::integer::Integer::from(value))
    }
}
impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Self(malachite_nz::integer::Integer::from(value as u64))
    }
}
impl From<Natural> for Integer {
    fn from(value: Natural) -> Self {
        Self(malachite_nz::integer::Integer::from(value.to_malachite()))
    }
}
impl From<&Natural> for Integer {
    fn from(value: &Natural) -> Self {
        Self(malachite_nz::integer::Integer::from(
            value.to_malachite_ref().clone(),
        ))
    }
}

impl FromStr for Integer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        malachite_nz::integer::Integer::from_str(s)
            .map(Self)
            .map_err(|_| ())
    }
}

impl Neg for Integer {
    type Output = Integer;
    fn neg(self) -> Self::Output {
        Integer(-self.0)
    }
}
impl Neg for &Integer {
    type Output = Integer;
    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}
impl Neg for Natural {
    type Output = Integer;
    fn neg(self) -> Self::Output {
        -Integer::from(self)
    }
}
impl Neg for &Natural {
    type Output = Integer;
    fn neg(self) -> Self::Output {
        -Integer::from(self)
    }
}

impl Add<Integer> for Integer {
    type Output = Integer;
    fn add(self, rhs: Integer) -> Self::Output {
        Integer(self.0 + rhs.0)
    }
}
impl Add<&Integer> for &Integer {
    type Output = Integer;
    fn add(self, rhs: &Integer) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}
impl AddAssign<&Integer> for Integer {
    fn add_assign(&mut self, rhs: &Integer) {
        self.0 += &rhs.0;
    }
}

impl Sub<Integer> for Integer {
    type Output = Integer;
    fn sub(self, rhs: Integer) -> Self::Output {
        Integer(self.0 - rhs.0)
    }
}
impl Sub<&Integer> for &Integer {
    type Output = Integer;
    fn sub(self, rhs: &Integer) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}
impl SubAssign<&Integer> for Integer {
    fn sub_assign(&mut self, rhs: &Integer) {
        self.0 -= &rhs.0;
    }
}

impl Mul<Integer> for Integer {
    type Output = Integer;
    fn mul(self, rhs: Integer) -> Self::Output {
        Integer(self.0 * rhs.0)
    }
}
impl Mul<&Integer> for &Integer {
    type Output = Integer;
    fn mul(self, rhs: &Integer) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}
impl MulAssign<&Integer> for Integer {
    fn mul_assign(&mut self, rhs: &Integer) {
        self.0 *= &rhs.0;
    }
}

impl Div<Integer> for Integer {
    type Output = Integer;
    fn div(self, rhs: Integer) -> Self::Output {
        Integer(self.0 / rhs.0)
    }
}

impl Rem<Integer> for Integer {
    type Output = Integer;
    fn rem(self, rhs: Integer) -> Self::Output {
        Integer(self.0 % rhs.0)
    }
}

impl Integer {
    pub fn is_zero(&self) -> bool {
        self.0 == malachite_nz::integer::Integer::ZERO
    }

    pub fn sign(&self) -> i32 {
        use std::cmp::Ordering;
        match self.0.cmp(&malachite_nz::integer::Integer::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn abs(&self) -> Natural {
        use malachite_base::num::conversion::traits::UnsignedAbs;
        Natural::from_malachite((&self.0).unsigned_abs())
    }

    pub fn gcd(&self, other: &Integer) -> Natural {
        self.abs().gcd(&other.abs())
    }

    pub fn div_floor(&self, other: &Integer) -> Integer {
        use malachite_base::num::arithmetic::traits::DivMod;
        let (q, _) = (&self.0).div_mod(&other.0);
        Integer(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Integer::from(-7);
        let b = Integer::from(3);
        assert_eq!(a.clone() + b.clone(), Integer::from(-4));
        assert_eq!(a.clone() * b.clone(), Integer::from(-21));
        assert_eq!(a.abs(), Natural::from(7u32));
    }

    #[test]
    fn sign_and_gcd() {
        assert_eq!(Integer::from(-5).sign(), -1);
        assert_eq!(Integer::ZERO.sign(), 0);
        assert_eq!(Integer::from(5).sign(), 1);
        assert_eq!(Integer::from(-12).gcd(&Integer::from(18)), Natural::from(6u32));
    }

    #[test]
    fn div_floor_rounds_towards_negative_infinity() {
        assert_eq!(Integer::from(-7).div_floor(&Integer::from(2)), Integer::from(-4));
    }
}
