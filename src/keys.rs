//! Key generation and management

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::params::DomainParameters;
use crate::utils::{mod_exp, random_scalar};

/// ElGamal public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) params: Arc<DomainParameters>,
    pub(crate) y: BigUint, // g^x mod p
}

impl PublicKey {
    /// Get the domain parameters this key was generated under
    pub fn params(&self) -> &Arc<DomainParameters> {
        &self.params
    }

    /// Get the public component (g^x mod p)
    pub fn public_component(&self) -> &BigUint {
        &self.y
    }

    /// Get the bit size of the modulus
    pub fn bit_size(&self) -> u64 {
        self.params.p.bits()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({} bits)", self.bit_size())
    }
}

/// ElGamal private key
///
/// The secret exponent never appears in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub(crate) params: Arc<DomainParameters>,
    pub(crate) x: BigUint, // Secret exponent in [1, q-1]
}

impl PrivateKey {
    /// Get the domain parameters this key was generated under
    pub fn params(&self) -> &Arc<DomainParameters> {
        &self.params
    }

    /// Get the secret exponent
    pub fn secret_exponent(&self) -> &BigUint {
        &self.x
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("params", &self.params)
            .field("x", &"***")
            .finish()
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(***)")
    }
}

/// ElGamal key pair
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    /// Get the bit size of the keys
    pub fn bit_size(&self) -> u64 {
        self.public_key.bit_size()
    }

    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public_key, self.private_key)
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({} bits)", self.bit_size())
    }
}

impl DomainParameters {
    /// Generate a key pair under these parameters.
    ///
    /// The secret exponent x is drawn uniformly from `[1, q-1]` and the public
    /// component is `y = g^x mod p`. Both halves share `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modp_elgamal::DomainParameters;
    ///
    /// let params = DomainParameters::rfc5114_2048_256().expect("standard group");
    /// let keypair = params.generate_key_pair(&mut rand::thread_rng()).expect("key generation");
    /// assert_eq!(keypair.bit_size(), 2048);
    /// ```
    pub fn generate_key_pair<R>(self: &Arc<Self>, rng: &mut R) -> Result<KeyPair>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let x = random_scalar(rng, &self.q)?;
        let y = mod_exp(&self.g, &x, &self.p);

        debug!(modulus_bits = self.p.bits(), "generated key pair");

        Ok(KeyPair {
            public_key: PublicKey {
                params: Arc::clone(self),
                y,
            },
            private_key: PrivateKey {
                params: Arc::clone(self),
                x,
            },
        })
    }
}
