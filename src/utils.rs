//! Utility functions for cryptographic operations

use crate::error::{ElGamalError, Result};
use num_bigint::{BigInt, BigUint, RandBigInt, Sign, ToBigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, RngCore};

/// Upper bound on rejection-sampling rounds before the source is declared broken.
/// Each round succeeds with probability above 1/2.
const MAX_SAMPLING_ATTEMPTS: usize = 128;

const SMALL_PRIMES: [u32; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Modular exponentiation: base^exp mod modulus
pub fn mod_exp(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Compute modular inverse using the extended Euclidean algorithm
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }

    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let mut r0 = modulus.clone();
    let mut r1 = BigInt::from_biguint(Sign::Plus, a % m);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();

    while !r1.is_zero() {
        let quotient = &r0 / &r1;
        let r2 = &r0 - &quotient * &r1;
        r0 = std::mem::replace(&mut r1, r2);
        let t2 = &t0 - &quotient * &t1;
        t0 = std::mem::replace(&mut t1, t2);
    }

    if !r0.is_one() {
        return None;
    }

    // t0 may be negative; mod_floor maps it into [0, m)
    t0.mod_floor(&modulus).to_biguint()
}

/// Miller-Rabin primality test with `k` random witnesses
pub fn is_probable_prime(n: &BigUint, k: usize) -> bool {
    if n <= &BigUint::one() {
        return false;
    }

    let two = BigUint::from(2u32);
    if n == &two {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if n == &small {
            return true;
        }
        if (n % &small).is_zero() {
            return false;
        }
    }

    let mut rng = thread_rng();
    let n_minus_1 = n - BigUint::one();
    let (s, d) = factor_powers_of_two(&n_minus_1);

    'witness: for _ in 0..k {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        let mut x = mod_exp(&a, &d, n);

        if x.is_one() || x == n_minus_1 {
            continue;
        }

        for _ in 0..s - 1 {
            x = mod_exp(&x, &two, n);
            if x == n_minus_1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Factor out powers of 2 from n
pub fn factor_powers_of_two(n: &BigUint) -> (u64, BigUint) {
    let mut s = 0;
    let mut d = n.clone();

    while !d.is_zero() && d.is_even() {
        d >>= 1;
        s += 1;
    }

    (s, d)
}

/// Draw a uniform scalar in `[1, order - 1]` from `rng`.
///
/// Uses `try_fill_bytes` so that a failing entropy source surfaces as
/// [`ElGamalError::RandomnessUnavailable`] instead of a panic.
pub fn random_scalar<R>(rng: &mut R, order: &BigUint) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    if order <= &BigUint::one() {
        return Err(ElGamalError::InvalidParameters(
            "scalar order must be greater than 1".to_string(),
        ));
    }

    let upper = order - BigUint::one();
    let bits = upper.bits();
    let len = bits.div_ceil(8) as usize;
    let top_bits = (bits % 8) as u32;
    let mut buf = vec![0u8; len];

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| ElGamalError::RandomnessUnavailable(e.to_string()))?;
        if top_bits != 0 {
            buf[0] &= (1u8 << top_bits) - 1;
        }

        let candidate = BigUint::from_bytes_be(&buf);
        if !candidate.is_zero() && candidate <= upper {
            return Ok(candidate);
        }
    }

    Err(ElGamalError::RandomnessUnavailable(format!(
        "no scalar in range after {} samples",
        MAX_SAMPLING_ATTEMPTS
    )))
}

/// Parse a big-endian hexadecimal string with no prefix and no separators.
pub fn parse_hex(label: &str, hex: &str) -> Result<BigUint> {
    if hex.is_empty() {
        return Err(ElGamalError::InvalidParameters(format!("{} is empty", label)));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ElGamalError::InvalidParameters(format!(
            "{} is not a hexadecimal string",
            label
        )));
    }

    BigUint::parse_bytes(hex.as_bytes(), 16).ok_or_else(|| {
        ElGamalError::InvalidParameters(format!("{} could not be parsed", label))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mod_inverse() {
        let a = 3u32.to_biguint().unwrap();
        let m = 11u32.to_biguint().unwrap();
        let inv = mod_inverse(&a, &m).unwrap();

        assert_eq!((a * inv) % m, BigUint::one());
    }

    #[test]
    fn test_mod_inverse_missing() {
        let a = 6u32.to_biguint().unwrap();
        let m = 9u32.to_biguint().unwrap();
        assert!(mod_inverse(&a, &m).is_none());
        assert!(mod_inverse(&BigUint::zero(), &m).is_none());
    }

    #[test]
    fn test_is_probable_prime() {
        // Known small primes
        for p in [2u32, 3, 5, 7, 11, 13, 53, 59, 7919] {
            assert!(is_probable_prime(&p.to_biguint().unwrap(), 20), "{}", p);
        }

        // Known composites, including the Carmichael number 561
        for c in [0u32, 1, 4, 6, 8, 9, 10, 12, 15, 561, 3599] {
            assert!(!is_probable_prime(&c.to_biguint().unwrap(), 20), "{}", c);
        }
    }

    #[test]
    fn test_random_scalar_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let order = 13u32.to_biguint().unwrap();
        for _ in 0..200 {
            let x = random_scalar(&mut rng, &order).unwrap();
            assert!(x >= BigUint::one() && x < order);
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("p", "ff").unwrap(), 255u32.to_biguint().unwrap());
        assert_eq!(parse_hex("p", "00A").unwrap(), 10u32.to_biguint().unwrap());
        assert!(parse_hex("p", "").is_err());
        assert!(parse_hex("p", "0x1f").is_err());
        assert!(parse_hex("p", "12 34").is_err());
        assert!(parse_hex("p", "12_34").is_err());
    }
}
