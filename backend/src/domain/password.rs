//! One-way password hashing.
//!
//! Hashes are Argon2id PHC strings stored as opaque bytes. Hashing is CPU
//! bound; async callers must run it on a blocking thread.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash as PhcHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};

/// Iteration count handed to Argon2 for each hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost(u32);

impl HashCost {
    pub const MIN: u32 = Params::MIN_T_COST;

    /// Validate an iteration count.
    pub fn new(iterations: u32) -> Result<Self, PasswordHashError> {
        if iterations < Self::MIN {
            return Err(PasswordHashError::InvalidCost { cost: iterations });
        }
        Ok(Self(iterations))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self(Params::DEFAULT_T_COST)
    }
}

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("hash cost {cost} is below the minimum of {min}", min = HashCost::MIN)]
    InvalidCost { cost: u32 },
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Stored password hash.
///
/// # Examples
/// ```
/// use backend::domain::{HashCost, PasswordHash};
///
/// let hash = PasswordHash::set("correct horse", HashCost::new(1)?)?;
/// assert!(hash.matches("correct horse")?);
/// assert!(!hash.matches("battery staple")?);
/// # Ok::<(), backend::domain::PasswordHashError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(Vec<u8>);

impl PasswordHash {
    /// Hash `plaintext` with a fresh random salt.
    pub fn set(plaintext: &str, cost: HashCost) -> Result<Self, PasswordHashError> {
        let params = Params::new(Params::DEFAULT_M_COST, cost.get(), Params::DEFAULT_P_COST, None)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })?;
        let hasher = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let phc = hasher
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(phc.to_string().into_bytes()))
    }

    /// Check `plaintext` against the stored hash.
    ///
    /// A wrong password is `Ok(false)`; only an unreadable hash is an error.
    pub fn matches(&self, plaintext: &str) -> Result<bool, PasswordHashError> {
        let encoded = std::str::from_utf8(&self.0).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        let parsed = PhcHash::new(encoded).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::Hash {
                message: err.to_string(),
            }),
        }
    }

    /// Wrap bytes read back from storage.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cheap() -> HashCost {
        HashCost::new(1).expect("minimum cost")
    }

    #[rstest]
    fn hash_never_contains_plaintext(cheap: HashCost) {
        let hash = PasswordHash::set("s3cret-value", cheap).expect("hash");
        let encoded = String::from_utf8(hash.as_bytes().to_vec()).expect("utf8");
        assert!(encoded.starts_with("$argon2id$"));
        assert!(!encoded.contains("s3cret-value"));
    }

    #[rstest]
    #[case("s3cret-value", true)]
    #[case("S3cret-value", false)]
    #[case("", false)]
    fn matches_reports_mismatch_as_false(
        cheap: HashCost,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let hash = PasswordHash::set("s3cret-value", cheap).expect("hash");
        assert_eq!(hash.matches(candidate), Ok(expected));
    }

    #[rstest]
    fn salts_differ_between_calls(cheap: HashCost) {
        let first = PasswordHash::set("same", cheap).expect("hash");
        let second = PasswordHash::set("same", cheap).expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn zero_cost_is_rejected() {
        assert_eq!(
            HashCost::new(0),
            Err(PasswordHashError::InvalidCost { cost: 0 })
        );
    }

    #[rstest]
    fn garbage_bytes_are_malformed() {
        let hash = PasswordHash::from_bytes(b"not a phc string".to_vec());
        assert!(matches!(
            hash.matches("anything"),
            Err(PasswordHashError::Malformed { .. })
        ));
    }

    #[rstest]
    fn debug_output_is_redacted(cheap: HashCost) {
        let hash = PasswordHash::set("pw", cheap).expect("hash");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}
