//! Argon2i password hashing facade with rehash detection.
//!
//! This module provides the [`Argon2Hasher`] facade that host applications
//! wire in wherever a password hashing service is expected. It hashes with
//! the Argon2i variant and a fresh random salt, verifies in constant time,
//! and reports when a stored hash was produced with cost parameters that
//! differ from the currently configured ones so callers can upgrade weak
//! hashes on the next successful login.
//!
//! # Usage
//!
//! The facade provides three operations, also available through the
//! [`Hasher`] trait:
//! - [`Argon2Hasher::make`]: hash a password
//! - [`Argon2Hasher::check`]: verify a password against a stored hash
//! - [`Argon2Hasher::needs_rehash`]: detect outdated cost parameters
//!
//! # Examples
//!
//! ```rust
//! use argon2_hasher::{Argon2Hasher, HashOptions};
//!
//! let hasher = Argon2Hasher::default();
//! let hash = hasher.make("user_password_123").unwrap();
//!
//! // Store the hash, then verify a later login attempt.
//! assert!(hasher.check("user_password_123", &hash));
//! assert!(!hasher.check("wrong_password", &hash));
//!
//! // The hash carries the current parameters, so no rehash is needed.
//! assert!(!hasher.needs_rehash(&hash));
//!
//! // After raising the memory cost, the same hash reports as outdated.
//! let options = HashOptions {
//!     memory_cost: Some(2048),
//!     ..Default::default()
//! };
//! assert!(hasher.needs_rehash_with(&hash, &options));
//! ```

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{PasswordHash, SaltString},
};
use rand::rngs::OsRng;
use tracing::debug;

use crate::params::{HashOptions, HashParams};
use crate::prelude::*;

/// Effective lanes for every derivation.
///
/// Caller-supplied `threads` overrides and instance defaults are accepted
/// but never forwarded to the primitive: every hash is derived with a
/// single lane, and rehash detection compares against the same pinned
/// value.
pub const FIXED_PARALLELISM: u32 = 1;

/// Generic hashing service capability.
///
/// The exact contract a host application expects from the password hashing
/// service it wires in: hash, verify, and rehash detection. The trait is
/// object safe, so implementations can be shared as `Arc<dyn Hasher>`.
pub trait Hasher {
    /// Hashes the given password with the instance defaults.
    fn make(&self, password: &str) -> Result<String>;
    /// Checks the given password against an encoded hash.
    fn check(&self, password: &str, encoded_hash: &str) -> bool;
    /// Whether the hash was produced with outdated cost parameters.
    fn needs_rehash(&self, encoded_hash: &str) -> bool;
}

/// Argon2i password hasher.
///
/// Constructed once with default cost parameters and reused across many
/// independent calls. It holds no per-call state and no secret material
/// after a call returns, so sharing one instance across threads is safe.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: HashParams,
}

impl Argon2Hasher {
    /// Creates a hasher with the provided default cost parameters.
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    /// Default cost parameters used when a call supplies no override.
    pub fn params(&self) -> &HashParams {
        &self.params
    }

    /// Hashes a password with the instance defaults.
    ///
    /// Every call generates a fresh random salt, so hashing the same
    /// password twice yields two different encoded strings.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - PHC-encoded hash ready for storage
    /// * `Err(Error::HashingUnsupported)` - the primitive failed to derive
    /// * `Err(Error::Configuration)` - resolved parameters out of range
    ///
    /// # Example
    ///
    /// ```rust
    /// use argon2_hasher::Argon2Hasher;
    ///
    /// let hasher = Argon2Hasher::default();
    /// let hash = hasher.make("my_secure_password").unwrap();
    /// assert!(hash.starts_with("$argon2i$"));
    /// ```
    pub fn make(&self, password: &str) -> Result<String> {
        self.make_with(password, &HashOptions::default())
    }

    /// Hashes a password, letting `options` override individual cost
    /// parameters for this call only.
    ///
    /// A requested `threads` value is validated and then ignored: the
    /// effective parallelism is always [`FIXED_PARALLELISM`].
    pub fn make_with(&self, password: &str, options: &HashOptions) -> Result<String> {
        let params = self.effective_params(options)?;
        let argon2 = argon2i_instance(&params)?;
        let salt = SaltString::generate(&mut OsRng);

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(Error::HashingUnsupported)?;
        Ok(hash.to_string())
    }

    /// Checks a password against a stored hash.
    ///
    /// Returns `false` for an empty hash (a blank password column never
    /// verifies) and for a hash the primitive cannot parse; "cannot
    /// verify" is treated as "does not match". Verification itself is
    /// delegated to the primitive's constant-time comparison.
    pub fn check(&self, password: &str, encoded_hash: &str) -> bool {
        if encoded_hash.is_empty() {
            return false;
        }
        let Ok(parsed) = PasswordHash::new(encoded_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Whether a stored hash needs to be re-derived under the current
    /// default parameters.
    pub fn needs_rehash(&self, encoded_hash: &str) -> bool {
        self.needs_rehash_with(encoded_hash, &HashOptions::default())
    }

    /// Whether a stored hash needs to be re-derived under the effective
    /// target parameters (defaults plus `options`, resolved with the same
    /// rule as [`Argon2Hasher::make_with`]).
    ///
    /// The decision is a pure parameter comparison on the hash's embedded
    /// algorithm and cost parameters; no plaintext password is involved.
    /// A hash that cannot be decoded, or a target that cannot be resolved,
    /// reports `true` rather than failing: unparseable and legacy hashes
    /// need a rehash.
    pub fn needs_rehash_with(&self, encoded_hash: &str, options: &HashOptions) -> bool {
        let Ok(target) = self.effective_params(options) else {
            debug!("unresolvable target parameters, treating hash as needing rehash");
            return true;
        };
        let Ok(parsed) = PasswordHash::new(encoded_hash) else {
            debug!("undecodable password hash, treating as needing rehash");
            return true;
        };

        if Algorithm::try_from(parsed.algorithm) != Ok(Algorithm::Argon2i) {
            return true;
        }
        let Ok(stored) = Params::try_from(&parsed) else {
            debug!("password hash with undecodable parameters, treating as needing rehash");
            return true;
        };

        stored.m_cost() != target.memory_cost_kib
            || stored.t_cost() != target.time_cost
            || stored.p_cost() != target.parallelism
    }

    /// Resolves the parameters one call derives with: field-wise override
    /// precedence, then the fixed-lanes policy.
    fn effective_params(&self, options: &HashOptions) -> Result<HashParams> {
        let mut params = options.resolve(&self.params)?;
        if params.parallelism != FIXED_PARALLELISM {
            debug!(
                requested = params.parallelism,
                "ignoring requested parallelism, deriving with a single lane"
            );
            params.parallelism = FIXED_PARALLELISM;
        }
        Ok(params)
    }
}

impl Hasher for Argon2Hasher {
    fn make(&self, password: &str) -> Result<String> {
        Argon2Hasher::make(self, password)
    }

    fn check(&self, password: &str, encoded_hash: &str) -> bool {
        Argon2Hasher::check(self, password, encoded_hash)
    }

    fn needs_rehash(&self, encoded_hash: &str) -> bool {
        Argon2Hasher::needs_rehash(self, encoded_hash)
    }
}

fn argon2i_instance(params: &HashParams) -> Result<Argon2<'static>> {
    let params = Params::new(
        params.memory_cost_kib,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| Error::Configuration(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2i, Version::V0x13, params))
}
