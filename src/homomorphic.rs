//! Homomorphic operations on ciphertexts

use crate::encryption::check_ciphertext;
use crate::error::Result;
use crate::keys::PublicKey;
use crate::types::Ciphertext;

impl PublicKey {
    /// Component-wise product of two ciphertexts.
    ///
    /// If `a` encrypts m1 and `b` encrypts m2 under this key, the result
    /// encrypts `m1 * m2 mod p`. The product of two encodings is generally not
    /// itself a valid encoding, so the result is meant for further group
    /// arithmetic rather than for [`decode`](crate::DomainParameters::decode).
    pub fn multiply(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        let p = &self.params.p;
        check_ciphertext(&self.params, a)?;
        check_ciphertext(&self.params, b)?;

        let r = (&a.r * &b.r) % p;
        let c = (&a.c * &b.c) % p;

        Ok(Ciphertext::new(r, c))
    }
}
