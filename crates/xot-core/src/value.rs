use std::{
    fmt,
    ops::{BitXor, BitXorAssign},
};

use num_bigint::{BigUint, RandBigInt};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An unsigned integer of configurable bit width.
///
/// Messages, pads and ciphertexts are all secret values. The only operation the protocols
/// rely on is XOR.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(BigUint);

impl SecretValue {
    /// Returns the all-zero value.
    pub fn zero() -> Self {
        Self(BigUint::default())
    }

    /// Samples a value uniformly from `[0, 2^bit_size)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bit_size: usize) -> Self {
        Self(rng.gen_biguint(bit_size as u64))
    }

    /// Returns the number of significant bits.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Returns a reference to the underlying integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Returns the underlying integer.
    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for SecretValue {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for SecretValue {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for SecretValue {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl BitXor<&SecretValue> for &SecretValue {
    type Output = SecretValue;

    #[inline]
    fn bitxor(self, rhs: &SecretValue) -> Self::Output {
        SecretValue(&self.0 ^ &rhs.0)
    }
}

impl BitXor<&SecretValue> for SecretValue {
    type Output = SecretValue;

    #[inline]
    fn bitxor(mut self, rhs: &SecretValue) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl BitXor for SecretValue {
    type Output = SecretValue;

    #[inline]
    fn bitxor(self, rhs: SecretValue) -> Self::Output {
        self ^ &rhs
    }
}

impl BitXorAssign<&SecretValue> for SecretValue {
    #[inline]
    fn bitxor_assign(&mut self, rhs: &SecretValue) {
        self.0 ^= &rhs.0;
    }
}

impl fmt::LowerHex for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
