//! Core ElGamal encryption and decryption operations

use num_bigint::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};

use crate::error::{ElGamalError, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::params::DomainParameters;
use crate::types::{Ciphertext, GroupElement};
use crate::utils::{mod_exp, mod_inverse, random_scalar};

impl PublicKey {
    /// Encrypt an encoded message with a fresh ephemeral exponent drawn from `rng`.
    ///
    /// Returns `(R, C) = (g^r, m * y^r) mod p` with r uniform in `[1, q-1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modp_elgamal::DomainParameters;
    ///
    /// let params = DomainParameters::rfc5114_2048_256().unwrap();
    /// let mut rng = rand::thread_rng();
    /// let keypair = params.generate_key_pair(&mut rng).unwrap();
    ///
    /// let m = params.encode(b"Hello, world!").unwrap();
    /// let ciphertext = keypair.public_key.encrypt(&m, &mut rng).unwrap();
    /// let decrypted = keypair.private_key.decrypt(&ciphertext).unwrap();
    /// assert_eq!(params.decode(&decrypted).unwrap(), b"Hello, world!");
    /// ```
    pub fn encrypt<R>(&self, message: &GroupElement, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let r = random_scalar(rng, &self.params.q)?;
        self.encrypt_with_exponent(message, &r)
    }

    /// Encrypt with a caller-chosen ephemeral exponent r in `[1, q-1]`.
    ///
    /// The caller must never use the same r twice under one key: two
    /// ciphertexts sharing r reveal the ratio of their plaintexts.
    pub fn encrypt_with_exponent(&self, message: &GroupElement, r: &BigUint) -> Result<Ciphertext> {
        let params = &self.params;
        if !params.in_range(message.value()) {
            return Err(ElGamalError::MalformedElement(
                "message outside [1, p-1]".to_string(),
            ));
        }
        if r.is_zero() || r >= &params.q {
            return Err(ElGamalError::InvalidParameters(
                "ephemeral exponent must be in [1, q-1]".to_string(),
            ));
        }

        let big_r = mod_exp(&params.g, r, &params.p);
        let y_r = mod_exp(&self.y, r, &params.p);
        let c = (message.value() * y_r) % &params.p;

        Ok(Ciphertext::new(big_r, c))
    }

    /// Re-randomize a ciphertext (produces a different encryption of the same plaintext)
    pub fn rerandomize<R>(&self, ciphertext: &Ciphertext, rng: &mut R) -> Result<Ciphertext>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let params = &self.params;
        check_ciphertext(params, ciphertext)?;

        let s = random_scalar(rng, &params.q)?;
        let g_s = mod_exp(&params.g, &s, &params.p);
        let y_s = mod_exp(&self.y, &s, &params.p);

        let r = (&ciphertext.r * g_s) % &params.p;
        let c = (&ciphertext.c * y_s) % &params.p;

        Ok(Ciphertext::new(r, c))
    }
}

impl PrivateKey {
    /// Decrypt a ciphertext using the private key.
    ///
    /// Recovers `m = C * (R^x)^-1 mod p`. The result is not checked for subgroup
    /// membership; [`DomainParameters::decode`] rejects anything malformed.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<GroupElement> {
        let params = &self.params;
        check_ciphertext(params, ciphertext)?;

        let s = mod_exp(&ciphertext.r, &self.x, &params.p);
        let s_inv = mod_inverse(&s, &params.p).ok_or_else(|| {
            ElGamalError::InvalidCiphertext("shared secret is not invertible".to_string())
        })?;

        Ok(GroupElement((&ciphertext.c * s_inv) % &params.p))
    }
}

/// Both components must lie in `[1, p-1]`.
pub(crate) fn check_ciphertext(params: &DomainParameters, ciphertext: &Ciphertext) -> Result<()> {
    if !params.in_range(&ciphertext.r) {
        return Err(ElGamalError::InvalidCiphertext(
            "R outside [1, p-1]".to_string(),
        ));
    }
    if !params.in_range(&ciphertext.c) {
        return Err(ElGamalError::InvalidCiphertext(
            "C outside [1, p-1]".to_string(),
        ));
    }
    Ok(())
}
