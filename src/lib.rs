//! Password hashing facade built on Argon2.
//!
//! Provides a uniform interface for producing and verifying salted
//! password hashes with the Argon2i algorithm, and for detecting when a
//! stored hash was produced with outdated cost parameters.
//!
//! # Usage
//!
//! ```rust
//! use argon2_hasher::{Argon2Hasher, Hasher};
//!
//! let hasher = Argon2Hasher::default();
//! let hash = hasher.make("correct horse battery staple").unwrap();
//!
//! assert!(hasher.check("correct horse battery staple", &hash));
//! assert!(!hasher.needs_rehash(&hash));
//! ```

pub mod error;
pub mod hasher;
pub mod params;
pub mod prelude;

pub use error::Error;
pub use hasher::{Argon2Hasher, FIXED_PARALLELISM, Hasher};
pub use params::{HashOptions, HashParams};
