//! Sync codes: the short keys records are shared by.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CodeError;

/// Symbols a generated code is drawn from.
///
/// `I`, `O`, `0` and `1` are left out so codes survive being read aloud or
/// copied by hand.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in a sync code.
pub const CODE_LEN: usize = 6;

/// A 6-character code identifying one stored record.
///
/// Generated codes only use [`CODE_ALPHABET`]. Codes parsed from requests are
/// upper-cased and length-checked but not restricted to the alphabet; a
/// foreign code is well-formed and simply never found.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SyncCode(String);

impl SyncCode {
    /// Generate a code using the given random source.
    ///
    /// Each character is picked uniformly from [`CODE_ALPHABET`], with
    /// replacement.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Generate a code from the thread-local RNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    /// Normalize and validate a code taken from user input.
    ///
    /// The input is upper-cased; it must then be exactly [`CODE_LEN`]
    /// characters long.
    pub fn parse(raw: &str) -> Result<Self, CodeError> {
        let code = raw.to_uppercase();
        let len = code.chars().count();
        if len != CODE_LEN {
            return Err(CodeError::InvalidLength { len });
        }
        Ok(Self(code))
    }

    /// Whether every character belongs to [`CODE_ALPHABET`].
    pub fn is_canonical(&self) -> bool {
        self.0.bytes().all(|b| CODE_ALPHABET.contains(&b))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SyncCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SyncCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SyncCode> for String {
    fn from(code: SyncCode) -> Self {
        code.0
    }
}

impl AsRef<str> for SyncCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for SyncCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyncCode({})", self.0)
    }
}
