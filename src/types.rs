//! Core types and data structures

use num_bigint::BigUint;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An integer in `[1, p-1]` for some set of domain parameters.
///
/// Obtained from [`DomainParameters::encode`](crate::DomainParameters::encode),
/// [`PrivateKey::decrypt`](crate::PrivateKey::decrypt), or the range-checked
/// [`DomainParameters::element`](crate::DomainParameters::element).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupElement(pub(crate) BigUint);

impl GroupElement {
    /// Get the underlying integer
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Big-endian bytes of the element
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }
}

impl fmt::Display for GroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

/// ElGamal ciphertext (R, C) with R = g^r and C = m * y^r
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ciphertext {
    pub(crate) r: BigUint,
    pub(crate) c: BigUint,
}

impl Ciphertext {
    /// Create a new ciphertext. Components are range-checked on use.
    pub fn new(r: BigUint, c: BigUint) -> Self {
        Ciphertext { r, c }
    }

    /// Get the ephemeral component g^r
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the masked message component m * y^r
    pub fn c(&self) -> &BigUint {
        &self.c
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.r.to_bytes_be().len() + self.c.to_bytes_be().len()
    }

    pub fn into_parts(self) -> (BigUint, BigUint) {
        (self.r, self.c)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ciphertext({} bytes)", self.size_bytes())
    }
}

/// Configuration for loading domain parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterConfig {
    /// Number of Miller-Rabin rounds for primality testing
    pub primality_rounds: usize,
    /// Reject parameters unless p = 2q + 1, so that every encoding is a subgroup member
    pub require_subgroup_embedding: bool,
}

impl Default for ParameterConfig {
    fn default() -> Self {
        ParameterConfig {
            primality_rounds: 20,
            require_subgroup_embedding: false,
        }
    }
}
