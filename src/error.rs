//! Main Crate Error

/// Password hashing errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying primitive could not produce an Argon2i hash.
    #[error("Argon2i hashing not supported: {0}")]
    HashingUnsupported(argon2::password_hash::Error),

    /// A cost parameter is outside its accepted range.
    #[error("invalid cost parameter: {0}")]
    Configuration(String),
}
