//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use log::warn;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while configuring or running the hasher.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),

    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Turns passwords into PHC strings and checks them later.
pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<String, HashError>;

    /// Returns true if `password` produces `hash`. Malformed hashes never match.
    fn check_hash(&self, hash: &str, password: &str) -> bool;
}

/// Argon2 cost parameters, read from the `[password_hashing]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingConfig {
    /// The cheapest parameters argon2 accepts. Only for tests.
    pub fn fast_insecure() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Argon2id (v0x13) hasher with configurable costs.
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &HashingConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(HashError::Params)?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Hasher for Argon2Hasher {
    fn generate_hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(HashError::Hash)
    }

    fn check_hash(&self, hash: &str, password: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("stored password hash is malformed: {}", e);
                return false;
            }
        };
        // Costs come from the PHC string, so older hashes keep verifying
        // after the configured parameters change.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
