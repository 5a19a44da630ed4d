use malachite_base::num::basic::traits::{One, Two, Zero};
use malachite_base::num::conversion::traits::RoundingInto;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::integer::Integer;

pub mod traits {
    pub trait DivMod<Rhs = Self> {
        type Output;
        fn div_mod(&self, rhs: &Rhs) -> (Self::Output, Self::Output);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Natural(malachite_nz::natural::Natural);

impl Natural {
    pub(crate) fn from_malachite(value: malachite_nz::natural::Natural) -> Self {
        Self(value)
    }
    pub(crate) fn to_malachite(self) -> malachite_nz::natural::Natural {
        self.0
    }
    pub(crate) fn to_malachite_ref(&self) -> &malachite_nz::natural::Natural {
        &self.0
    }
}

impl std::fmt::Display for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Natural {
    pub const ZERO: Self = Self(malachite_nz::natural::Natural::ZERO);
    pub const ONE: Self = Self(malachite_nz::natural::Natural::ONE);
    pub const TWO: Self = Self(malachite_nz::natural::Natural::TWO);
}

impl From<u8> for Natural {
    fn from(value: u8) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<u16> for Natural {
    fn from(value: u16) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<u32> for Natural {
    fn from(value: u32) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<u64> for Natural {
    fn from(value: u64) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<usize> for Natural {
    fn from(value: usize) -> Self {
        Self(malachite_nz::natural::Natural::from(value as u64))
    }
}

impl FromStr for Natural {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        malachite_nz::natural::Natural::from_str(s)
            .map(Self)
            .map_err(|_| ())
    }
}

impl Add<Natural> for Natural {
    type Output = Natural;
    fn add(self, rhs: Natural) -> Self::Output {
        Natural(self.0 + rhs.0)
    }
}
impl Add<&Natural> for &Natural {
    type Output = Natural;
    fn add(self, rhs: &Natural) -> Self::Output {
        Natural(&self.0 + &rhs.0)
    }
}
impl AddAssign<&Natural> for Natural {
    fn add_assign(&mut self, rhs: &Natural) {
        self.0 += &rhs.0;
    }
}

impl Sub<Natural> for Natural {
    type Output = Natural;
    fn sub(self, rhs: Natural) -> Self::Output {
        Natural(self.0 - rhs.0)
    }
}
impl Sub<&Natural> for &Natural {
    type Output = Natural;
    fn sub(self, rhs: &Natural) -> Self::Output {
        Natural(&self.0 - &rhs.0)
    }
}
impl SubAssign<&Natural> for Natural {
    fn sub_assign(&mut self, rhs: &Natural) {
        self.0 -= &rhs.0;
    }
}

impl Mul<Natural> for Natural {
    type Output = Natural;
    fn mul(self, rhs: Natural) -> Self::Output {
        Natural(self.0 * rhs.0)
    }
}
impl Mul<&Natural> for &Natural {
    type Output = Natural;
    fn mul(self, rhs: &Natural) -> Self::Output {
        Natural(&self.0 * &rhs.0)
    }
}
impl MulAssign<&Natural> for Natural {
    fn mul_assign(&mut self, rhs: &Natural) {
        self.0 *= &rhs.0;
    }
}

impl traits::DivMod for Natural {
    type Output = Natural;
    fn div_mod(&self, rhs: &Natural) -> (Natural, Natural) {
        use malachite_base::num::arithmetic::traits::DivMod as _;
        let (q, r) = (&self.0).div_mod(&rhs.0);
        (Natural(q), Natural(r))
    }
}

impl Natural {
    pub fn is_zero(&self) -> bool {
        self.0 == malachite_nz::natural::Natural::ZERO
    }

    pub fn gcd(&self, other: &Natural) -> Natural {
        use malachite_base::num::arithmetic::traits::Gcd;
        Natural((&self.0).gcd(&other.0))
    }

    pub fn bitsize(&self) -> u64 {
        use malachite_base::num::logic::traits::SignificantBits;
        self.0.significant_bits()
    }

    pub fn sqrt_floor(&self) -> Natural {
        use malachite_base::num::arithmetic::traits::FloorSqrt;
        Natural((&self.0).floor_sqrt())
    }

    pub fn to_f64_approx(&self) -> f64 {
        let (m, e): (f64, i64) = (&self.0).rounding_into(malachite_base::rounding_modes::RoundingMode::Nearest).0;
        m * 2f64.powi(e as i32)
    }
}

impl From<Integer> for Natural {
    fn from(value: Integer) -> Self {
        use malachite_base::num::conversion::traits::UnsignedAbs;
        Natural::from_malachite(value.to_malachite().unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_mod_and_gcd() {
        use traits::DivMod;
        let a = Natural::from(17u32);
        let b = Natural::from(5u32);
        let (q, r) = a.div_mod(&b);
        assert_eq!(q, Natural::from(3u32));
        assert_eq!(r, Natural::from(2u32));
        assert_eq!(
            Natural::from(12u32).gcd(&Natural::from(18u32)),
            Natural::from(6u32)
        );
    }

    #[test]
    fn sqrt_floor() {
        assert_eq!(Natural::from(10u32).sqrt_floor(), Natural::from(3u32));
        assert_eq!(Natural::from(9u32).sqrt_floor(), Natural::from(3u32));
    }
}
