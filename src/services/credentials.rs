//! One-way password hashing with Argon2id.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::config::SecurityConfig;

/// Hashes and verifies passwords. Every hash carries its own random salt and
/// parameters (PHC string format), so hashes stay verifiable after the
/// configured costs change.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    pub fn new(config: &SecurityConfig) -> Result<Self> {
        let params = Params::new(
            config.argon2_memory_cost_kib,
            config.argon2_time_cost,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

        Ok(hash.to_string())
    }

    /// Returns false for a wrong password and for a malformed hash.
    #[must_use]
    pub fn matches(&self, plaintext: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }

    /// [`Self::hash`] on a blocking thread; Argon2 is CPU-bound.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String> {
        let hasher = self.clone();
        task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .context("Password hashing task panicked")?
    }

    pub async fn matches_blocking(&self, plaintext: String, hash: String) -> Result<bool> {
        let hasher = self.clone();
        task::spawn_blocking(move || hasher.matches(&plaintext, &hash))
            .await
            .context("Password verification task panicked")
    }
}
