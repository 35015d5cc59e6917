//! # ElGamal Encryption over MODP Groups
//!
//! This library provides multiplicative ElGamal encryption over a prime-order
//! subgroup of Z*_p, with:
//! - Validated loading of externally supplied domain parameters (p, g, q)
//! - An exactly invertible encoding of byte strings into group elements
//! - Key generation, encryption and decryption with an injected RNG
//! - Re-randomization and homomorphic multiplication of ciphertexts
//!
//! ## Example
//!
//! ```rust
//! use modp_elgamal::{load_parameters, RFC5114_2048_256_G, RFC5114_2048_256_P, RFC5114_2048_256_Q};
//!
//! let params = load_parameters(RFC5114_2048_256_P, RFC5114_2048_256_G, RFC5114_2048_256_Q).unwrap();
//! let mut rng = rand::thread_rng();
//! let keypair = params.generate_key_pair(&mut rng).unwrap();
//!
//! let m = params.encode(b"Hello, world!").unwrap();
//! let ciphertext = keypair.public_key.encrypt(&m, &mut rng).unwrap();
//! let recovered = keypair.private_key.decrypt(&ciphertext).unwrap();
//! assert_eq!(params.decode(&recovered).unwrap(), b"Hello, world!");
//! ```
//!
//! Every encryption must use a fresh ephemeral exponent. [`PublicKey::encrypt`]
//! draws one per call; callers of [`PublicKey::encrypt_with_exponent`] are
//! responsible for never repeating one under the same key.

use std::sync::Arc;

pub mod encoding;
pub mod encryption;
pub mod error;
pub mod homomorphic;
pub mod keys;
pub mod params;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use error::{ElGamalError, Result};
pub use keys::{KeyPair, PrivateKey, PublicKey};
pub use params::{
    DomainParameters, Embedding, RFC5114_2048_256_G, RFC5114_2048_256_P, RFC5114_2048_256_Q,
};
pub use types::{Ciphertext, GroupElement, ParameterConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load and validate domain parameters from big-endian hexadecimal strings,
/// in the order modulus, generator, subgroup order.
pub fn load_parameters(hex_p: &str, hex_g: &str, hex_q: &str) -> Result<Arc<DomainParameters>> {
    DomainParameters::from_hex(hex_p, hex_g, hex_q).map(Arc::new)
}
