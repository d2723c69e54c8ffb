//! Object keys
//!
//! Every stored payload is addressed by an opaque key generated at store time.
//! A key is a random (v4) UUID encoded as unpadded URL-safe base64, so it is
//! always 22 characters drawn from `[A-Za-z0-9_-]` and can be used verbatim as
//! a file name or an object name.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use uuid::Uuid;

/// Length of an encoded key (16 bytes, base64 without padding)
pub const KEY_LEN: usize = 22;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("key must be 22 characters, got {0}")]
    Length(usize),

    #[error("key contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Opaque identifier of a stored object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Generate a fresh key.
    ///
    /// Panics if the operating system's random source is unavailable; no key
    /// can be issued safely without it.
    pub fn generate() -> Self {
        let id = Uuid::new_v4();
        Self(URL_SAFE_NO_PAD.encode(id.as_bytes()))
    }

    /// Validate an untrusted string as a key.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        if raw.len() != KEY_LEN {
            return Err(KeyError::Length(raw.len()));
        }
        if let Some(bad) = raw.chars().find(|c| !is_key_char(*c)) {
            return Err(KeyError::InvalidChar(bad));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ObjectKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
