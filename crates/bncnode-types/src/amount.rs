//! Arbitrary precision non-negative amount

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Non-negative coin amount of arbitrary size
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

// Serialized as a decimal string so large values survive JSON
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BigUint::from_str(&s)
            .map(Amount)
            .map_err(serde::de::Error::custom)
    }
}

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn from_u64(n: u64) -> Self {
        Self(BigUint::from(n))
    }

    /// `None` for negative input
    pub fn from_i64(n: i64) -> Option<Self> {
        u64::try_from(n).ok().map(Self::from_u64)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Value as `u64` when it fits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for Amount {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

impl From<BigUint> for Amount {
    fn from(n: BigUint) -> Self {
        Self(n)
    }
}

impl FromStr for Amount {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(BigUint::from_str(s)?))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i64_rejects_negative() {
        assert_eq!(Amount::from_i64(-1), None);
        assert_eq!(Amount::from_i64(0), Some(Amount::zero()));
        assert_eq!(Amount::from_i64(42).unwrap().to_u64(), Some(42));
    }

    #[test]
    fn test_serde_as_string() {
        let big: Amount = "340282366920938463463374607431768211456".parse().unwrap();
        let json = serde_json::to_string(&big).unwrap();
        assert_eq!(json, "\"340282366920938463463374607431768211456\"");
        assert_eq!(big.to_u64(), None);

        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, big);
    }

    #[test]
    fn test_add() {
        let sum = Amount::from_u64(u64::MAX) + Amount::from_u64(1);
        assert_eq!(sum.to_string(), "18446744073709551616");
    }
}
