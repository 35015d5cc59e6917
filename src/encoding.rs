//! Bijective mapping between byte strings and group elements
//!
//! A message `m` is framed as the big-endian integer `v = 0x01 || m`. The
//! marker byte keeps leading zero bytes of `m` and makes the empty message
//! `v = 1`. How `v` becomes a group element depends on the
//! [`Embedding`] of the parameters:
//!
//! - [`Embedding::Subgroup`]: p = 2q + 1 and `v <= q`. Exactly one of `v` and
//!   `p - v` is a quadratic residue, i.e. a member of the order-q subgroup, and
//!   that one is the encoding. Because `v <= q < p - v`, comparing the element
//!   with q tells the decoder which probe was taken.
//! - [`Embedding::FullGroup`]: `v` itself, an element of Z*_p.

use num_bigint::BigUint;
use tracing::trace;

use crate::error::{ElGamalError, Result};
use crate::params::{DomainParameters, Embedding};
use crate::types::GroupElement;

const MARKER: u8 = 0x01;

impl DomainParameters {
    /// Encode a byte string of at most [`max_message_bytes`](Self::max_message_bytes)
    /// bytes as a group element.
    pub fn encode(&self, message: &[u8]) -> Result<GroupElement> {
        let max = self.max_message_bytes();
        if message.len() > max {
            return Err(ElGamalError::MessageTooLong {
                len: message.len(),
                max,
            });
        }

        let mut framed = Vec::with_capacity(message.len() + 1);
        framed.push(MARKER);
        framed.extend_from_slice(message);
        let v = BigUint::from_bytes_be(&framed);

        match self.embedding() {
            Embedding::FullGroup => Ok(GroupElement(v)),
            Embedding::Subgroup => {
                let reflected = &self.p - &v;
                for (offset, candidate) in [v, reflected].into_iter().enumerate() {
                    if self.is_subgroup_member(&candidate) {
                        trace!(offset, len = message.len(), "encoded message");
                        return Ok(GroupElement(candidate));
                    }
                }
                Err(ElGamalError::EncodingExhausted)
            }
        }
    }

    /// Recover the byte string carried by an element produced by [`encode`](Self::encode).
    pub fn decode(&self, element: &GroupElement) -> Result<Vec<u8>> {
        let value = element.value();
        if !self.in_range(value) {
            return Err(ElGamalError::MalformedElement(
                "value outside [1, p-1]".to_string(),
            ));
        }

        let framed = match self.embedding() {
            Embedding::FullGroup => value.to_bytes_be(),
            Embedding::Subgroup => {
                if !self.is_subgroup_member(value) {
                    return Err(ElGamalError::MalformedElement(
                        "not a member of the order-q subgroup".to_string(),
                    ));
                }
                if value <= &self.q {
                    value.to_bytes_be()
                } else {
                    (&self.p - value).to_bytes_be()
                }
            }
        };

        match framed.split_first() {
            Some((&MARKER, message)) if message.len() <= self.max_message_bytes() => {
                Ok(message.to_vec())
            }
            Some((&MARKER, _)) => Err(ElGamalError::MalformedElement(
                "payload exceeds message capacity".to_string(),
            )),
            _ => Err(ElGamalError::MalformedElement(
                "missing length marker".to_string(),
            )),
        }
    }
}
