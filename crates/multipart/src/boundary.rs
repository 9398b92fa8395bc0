//! Multipart boundary tokens.
//!
//! A boundary is either supplied by the caller and validated here, or built
//! from 16 bytes of a cryptographically secure RNG.

use std::fmt;

use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Prefix of every generated boundary.
pub const GENERATED_PREFIX: &str = "----FormpostBoundary";

/// RFC 2046 caps boundaries at 70 characters.
pub const MAX_BOUNDARY_LEN: usize = 70;

const RANDOM_BYTES: usize = 16;

/// `tspecials` that may not appear in a caller-supplied boundary.
const FORBIDDEN_CHARS: &[u8] = b"()<>@,;:\\\"/[]?=";

/// A validated boundary token. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary(String);

impl Boundary {
    /// Validate a caller-supplied token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if is_valid(&token) {
            Ok(Self(token))
        } else {
            Err(Error::invalid_boundary(token))
        }
    }

    /// Generate a fresh token from the thread-local CSPRNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generate a fresh token from the given RNG.
    pub fn generate_with<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; RANDOM_BYTES];
        rng.fill_bytes(&mut bytes);
        Self(format!("{GENERATED_PREFIX}{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Boundary {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_valid(token: &str) -> bool {
    (1..=MAX_BOUNDARY_LEN).contains(&token.len())
        && token
            .bytes()
            .all(|b| (33..=126).contains(&b) && !FORBIDDEN_CHARS.contains(&b))
}
