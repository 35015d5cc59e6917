//! Domain parameters (p, g, q) and their validation

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ElGamalError, Result};
use crate::types::{GroupElement, ParameterConfig};
use crate::utils::{is_probable_prime, mod_exp, parse_hex};

/// The modulus P of the RFC 5114 section 2.3 group (2048-bit MODP, 256-bit subgroup).
pub const RFC5114_2048_256_P: &str = concat!(
    "87A8E61DB4B6663CFFBBD19C651959998CEEF608660DD0F2",
    "5D2CEED4435E3B00E00DF8F1D61957D4FAF7DF4561B2AA30",
    "16C3D91134096FAA3BF4296D830E9A7C209E0C6497517ABD",
    "5A8A9D306BCF67ED91F9E6725B4758C022E0B1EF4275BF7B",
    "6C5BFC11D45F9088B941F54EB1E59BB8BC39A0BF12307F5C",
    "4FDB70C581B23F76B63ACAE1CAA6B7902D52526735488A0E",
    "F13C6D9A51BFA4AB3AD8347796524D8EF6A167B5A41825D9",
    "67E144E5140564251CCACB83E6B486F6B3CA3F7971506026",
    "C0B857F689962856DED4010ABD0BE621C3A3960A54E710C3",
    "75F26375D7014103A4B54330C198AF126116D2276E11715F",
    "693877FAD7EF09CADB094AE91E1A1597",
);

/// The generator G of the RFC 5114 section 2.3 group.
pub const RFC5114_2048_256_G: &str = concat!(
    "3FB32C9B73134D0B2E77506660EDBD484CA7B18F21EF2054",
    "07F4793A1A0BA12510DBC15077BE463FFF4FED4AAC0BB555",
    "BE3A6C1B0C6B47B1BC3773BF7E8C6F62901228F8C28CBB18",
    "A55AE31341000A650196F931C77A57F2DDF463E5E9EC144B",
    "777DE62AAAB8A8628AC376D282D6ED3864E67982428EBC83",
    "1D14348F6F2F9193B5045AF2767164E1DFC967C1FB3F2E55",
    "A4BD1BFFE83B9C80D052B985D182EA0ADB2A3B7313D3FE14",
    "C8484B1E052588B9B7D2BBD2DF016199ECD06E1557CD0915",
    "B3353BBB64E0EC377FD028370DF92B52C7891428CDC67EB6",
    "184B523D1DB246C32F63078490F00EF8D647D148D4795451",
    "5E2327CFEF98C582664B4C0F6CC41659",
);

/// The subgroup order Q of the RFC 5114 section 2.3 group.
pub const RFC5114_2048_256_Q: &str =
    "8CF83642A709A097B447997640129DA299B1A47D1EB3750BA308B0FE64F5FBD3";

/// How messages are mapped into group elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Embedding {
    /// p = 2q + 1: the order-q subgroup is the quadratic residues, and each
    /// framed message v maps to whichever of v, p - v is a residue.
    Subgroup,
    /// (p - 1) / q > 2: the framed message is used as an element of Z*_p.
    FullGroup,
}

impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Embedding::Subgroup => write!(f, "Subgroup"),
            Embedding::FullGroup => write!(f, "FullGroup"),
        }
    }
}

/// Validated ElGamal domain parameters.
///
/// Immutable once constructed. Keys hold an `Arc<DomainParameters>`, so all
/// keys derived from one set of parameters share it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    pub(crate) p: BigUint, // Prime modulus
    pub(crate) g: BigUint, // Generator of the order-q subgroup
    pub(crate) q: BigUint, // Prime subgroup order
    embedding: Embedding,
    max_message_bytes: usize,
}

impl DomainParameters {
    /// Load parameters from big-endian hexadecimal strings with the default configuration.
    pub fn from_hex(p: &str, g: &str, q: &str) -> Result<Self> {
        Self::from_hex_with_config(p, g, q, &ParameterConfig::default())
    }

    /// Load parameters from big-endian hexadecimal strings.
    pub fn from_hex_with_config(
        p: &str,
        g: &str,
        q: &str,
        config: &ParameterConfig,
    ) -> Result<Self> {
        let p = parse_hex("modulus", p)?;
        let g = parse_hex("generator", g)?;
        let q = parse_hex("subgroup order", q)?;
        Self::with_config(p, g, q, config)
    }

    /// Validate parameters given as integers with the default configuration.
    pub fn new(p: BigUint, g: BigUint, q: BigUint) -> Result<Self> {
        Self::with_config(p, g, q, &ParameterConfig::default())
    }

    /// Validate parameters given as integers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use modp_elgamal::{DomainParameters, ParameterConfig};
    /// use num_bigint::BigUint;
    ///
    /// // p = 23 = 2 * 11 + 1, g = 4 has order 11
    /// let config = ParameterConfig { primality_rounds: 10, ..Default::default() };
    /// let params = DomainParameters::with_config(23u32.into(), 4u32.into(), 11u32.into(), &config)
    ///     .expect("valid parameters");
    /// assert_eq!(params.subgroup_order(), &BigUint::from(11u32));
    /// ```
    pub fn with_config(
        p: BigUint,
        g: BigUint,
        q: BigUint,
        config: &ParameterConfig,
    ) -> Result<Self> {
        let embedding = validate(&p, &g, &q, config).inspect_err(|e| {
            warn!(error = %e, "rejected domain parameters");
        })?;

        let bound = match embedding {
            Embedding::Subgroup => q.clone(),
            Embedding::FullGroup => &p - BigUint::one(),
        };
        let max_message_bytes = message_capacity(&bound);

        debug!(
            modulus_bits = p.bits(),
            order_bits = q.bits(),
            %embedding,
            max_message_bytes,
            "loaded domain parameters"
        );

        Ok(DomainParameters {
            p,
            g,
            q,
            embedding,
            max_message_bytes,
        })
    }

    /// The RFC 5114 2048-bit MODP group with a 256-bit prime-order subgroup.
    pub fn rfc5114_2048_256() -> Result<Arc<Self>> {
        Self::from_hex(
            RFC5114_2048_256_P,
            RFC5114_2048_256_G,
            RFC5114_2048_256_Q,
        )
        .map(Arc::new)
    }

    /// Get the prime modulus
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Get the generator
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// Get the order of the subgroup generated by g
    pub fn subgroup_order(&self) -> &BigUint {
        &self.q
    }

    pub fn embedding(&self) -> Embedding {
        self.embedding
    }

    /// Byte length of the modulus
    pub fn byte_len(&self) -> usize {
        self.p.bits().div_ceil(8) as usize
    }

    /// Largest message length, in bytes, accepted by [`encode`](Self::encode).
    pub fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }

    /// Wrap an integer as a group element, checking that it lies in `[1, p-1]`.
    pub fn element(&self, value: BigUint) -> Result<GroupElement> {
        if !self.in_range(&value) {
            return Err(ElGamalError::MalformedElement(
                "value outside [1, p-1]".to_string(),
            ));
        }
        Ok(GroupElement(value))
    }

    pub(crate) fn in_range(&self, value: &BigUint) -> bool {
        !value.is_zero() && value < &self.p
    }

    /// v^q == 1 (mod p)
    pub(crate) fn is_subgroup_member(&self, value: &BigUint) -> bool {
        self.in_range(value) && mod_exp(value, &self.q, &self.p).is_one()
    }
}

impl fmt::Display for DomainParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DomainParameters({} bit modulus, {} bit order, {})",
            self.p.bits(),
            self.q.bits(),
            self.embedding
        )
    }
}

fn validate(p: &BigUint, g: &BigUint, q: &BigUint, config: &ParameterConfig) -> Result<Embedding> {
    let rounds = config.primality_rounds;

    if p <= &BigUint::from(3u32) || p.is_even() {
        return Err(ElGamalError::InvalidParameters(
            "modulus must be an odd integer greater than 3".to_string(),
        ));
    }
    if !is_probable_prime(p, rounds) {
        return Err(ElGamalError::InvalidParameters(
            "modulus is not prime".to_string(),
        ));
    }

    if !is_probable_prime(q, rounds) {
        return Err(ElGamalError::InvalidParameters(
            "subgroup order is not prime".to_string(),
        ));
    }
    let p_minus_1 = p - BigUint::one();
    if !(&p_minus_1 % q).is_zero() {
        return Err(ElGamalError::InvalidParameters(
            "subgroup order does not divide modulus - 1".to_string(),
        ));
    }

    if g <= &BigUint::one() || g >= &p_minus_1 {
        return Err(ElGamalError::InvalidParameters(
            "generator must be in range (1, p-1)".to_string(),
        ));
    }
    if !mod_exp(g, q, p).is_one() {
        return Err(ElGamalError::InvalidParameters(
            "generator does not have order q".to_string(),
        ));
    }

    let embedding = if p_minus_1 == q << 1 {
        Embedding::Subgroup
    } else {
        Embedding::FullGroup
    };

    if config.require_subgroup_embedding && embedding != Embedding::Subgroup {
        return Err(ElGamalError::InvalidParameters(
            "subgroup embedding requires a safe prime modulus p = 2q + 1".to_string(),
        ));
    }

    Ok(embedding)
}

/// Largest n such that every framed n-byte message, `0x01 || m`, is at most `bound`.
///
/// A framed n-byte message is below 2^(8n + 1), so n is the largest value with
/// 8n + 1 <= floor(log2(bound + 1)).
fn message_capacity(bound: &BigUint) -> usize {
    let log2 = (bound + BigUint::one()).bits() - 1;
    if log2 == 0 {
        return 0;
    }
    ((log2 - 1) / 8) as usize
}

#[cfg(test)]
pub(crate) mod test_groups {
    /// A 512-bit safe prime p = 2q + 1 with generator 4.
    pub const SAFE_P: &str = concat!(
        "CF561C44CCC34E8F5A43B6862B5AB17A8A22B6DA78B4892D547341C22B9E71EA",
        "3955E14D882DA1C3D98FA29F4EDFD2D9197B569D20E659A104808068EDCC451B",
    );
    pub const SAFE_G: &str = "4";
    pub const SAFE_Q: &str = concat!(
        "67AB0E226661A747AD21DB4315AD58BD45115B6D3C5A4496AA39A0E115CF38F5",
        "1CAAF0A6C416D0E1ECC7D14FA76FE96C8CBDAB4E90732CD08240403476E6228D",
    );
}

#[cfg(test)]
mod tests {
    use super::test_groups::*;
    use super::*;

    fn rfc5114() -> Arc<DomainParameters> {
        DomainParameters::rfc5114_2048_256().unwrap()
    }

    #[test]
    fn test_rfc5114_parameters() {
        let params = rfc5114();
        assert_eq!(params.modulus().bits(), 2048);
        assert_eq!(params.subgroup_order().bits(), 256);
        assert_eq!(params.embedding(), Embedding::FullGroup);
        assert_eq!(params.byte_len(), 256);
        assert_eq!(params.max_message_bytes(), 255);
        assert!(mod_exp(params.generator(), params.subgroup_order(), params.modulus()).is_one());
    }

    #[test]
    fn test_safe_prime_parameters() {
        let params = DomainParameters::from_hex(SAFE_P, SAFE_G, SAFE_Q).unwrap();
        assert_eq!(params.embedding(), Embedding::Subgroup);
        assert_eq!(params.byte_len(), 64);
        assert_eq!(params.max_message_bytes(), 63);
    }

    #[test]
    fn test_lowercase_hex_accepted() {
        let params = DomainParameters::from_hex(
            &SAFE_P.to_lowercase(),
            SAFE_G,
            &SAFE_Q.to_lowercase(),
        )
        .unwrap();
        assert_eq!(params.embedding(), Embedding::Subgroup);
    }

    #[test]
    fn test_even_modulus_rejected() {
        let p = parse_hex("p", RFC5114_2048_256_P).unwrap() + 1u32;
        let g = parse_hex("g", RFC5114_2048_256_G).unwrap();
        let q = parse_hex("q", RFC5114_2048_256_Q).unwrap();
        assert!(matches!(
            DomainParameters::new(p, g, q),
            Err(ElGamalError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_odd_composite_modulus_rejected() {
        // p + 2 is divisible by 5
        let p = parse_hex("p", RFC5114_2048_256_P).unwrap() + 2u32;
        let g = parse_hex("g", RFC5114_2048_256_G).unwrap();
        let q = parse_hex("q", RFC5114_2048_256_Q).unwrap();
        let err = DomainParameters::new(p, g, q).unwrap_err();
        assert_eq!(
            err,
            ElGamalError::InvalidParameters("modulus is not prime".to_string())
        );
    }

    #[test]
    fn test_bad_subgroup_order_rejected() {
        // q + 2 is even, so not prime
        let q = parse_hex("q", RFC5114_2048_256_Q).unwrap() + 2u32;
        let params = DomainParameters::new(
            parse_hex("p", RFC5114_2048_256_P).unwrap(),
            parse_hex("g", RFC5114_2048_256_G).unwrap(),
            q,
        );
        assert!(matches!(params, Err(ElGamalError::InvalidParameters(_))));

        // 11 is prime but does not divide 47 - 1
        let params = DomainParameters::new(47u32.into(), 2u32.into(), 11u32.into());
        assert_eq!(
            params.unwrap_err(),
            ElGamalError::InvalidParameters(
                "subgroup order does not divide modulus - 1".to_string()
            )
        );
    }

    #[test]
    fn test_bad_generator_rejected() {
        let p = || parse_hex("p", RFC5114_2048_256_P).unwrap();
        let q = || parse_hex("q", RFC5114_2048_256_Q).unwrap();

        for g in [BigUint::zero(), BigUint::one(), p() - 1u32, p()] {
            assert!(matches!(
                DomainParameters::new(p(), g, q()),
                Err(ElGamalError::InvalidParameters(_))
            ));
        }

        // 2 does not have order q in this group
        let err = DomainParameters::new(p(), 2u32.into(), q()).unwrap_err();
        assert_eq!(
            err,
            ElGamalError::InvalidParameters("generator does not have order q".to_string())
        );
    }

    #[test]
    fn test_malformed_hex_rejected() {
        for bad in ["", "0x87A8", "87A8 E61D", "XYZ"] {
            assert!(matches!(
                DomainParameters::from_hex(bad, RFC5114_2048_256_G, RFC5114_2048_256_Q),
                Err(ElGamalError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_require_subgroup_embedding() {
        let config = ParameterConfig {
            require_subgroup_embedding: true,
            ..Default::default()
        };
        assert!(DomainParameters::from_hex_with_config(
            RFC5114_2048_256_P,
            RFC5114_2048_256_G,
            RFC5114_2048_256_Q,
            &config
        )
        .is_err());
        assert!(DomainParameters::from_hex_with_config(SAFE_P, SAFE_G, SAFE_Q, &config).is_ok());
    }

    #[test]
    fn test_element_range() {
        let params = rfc5114();
        assert!(params.element(BigUint::zero()).is_err());
        assert!(params.element(params.modulus().clone()).is_err());
        assert!(params.element(BigUint::one()).is_ok());
        assert!(params.element(params.modulus() - 1u32).is_ok());
    }

    #[test]
    fn test_message_capacity() {
        // bound 0x01FF: framed one-byte messages reach 0x01FF
        assert_eq!(message_capacity(&BigUint::from(0x01FFu32)), 1);
        assert_eq!(message_capacity(&BigUint::from(0x01FEu32)), 0);
        assert_eq!(message_capacity(&BigUint::one()), 0);
    }
}
