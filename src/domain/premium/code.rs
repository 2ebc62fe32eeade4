//! Premium code value object and stored code record.
//!
//! Every code is normalized before it is compared, stored or looked up:
//! surrounding whitespace is trimmed and the remainder is upper-cased.
//! `" abc123 "`, `"abc123"` and `"ABC123"` are therefore the same code.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized premium code.
///
/// # Example
///
/// ```ignore
/// let code = PremiumCode::try_new("  free2024 ")?;
/// assert_eq!(code.as_str(), "FREE2024");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PremiumCode(String);

impl PremiumCode {
    /// Creates a PremiumCode from raw user input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the input is blank.
    pub fn try_new(raw: &str) -> Result<Self, ValidationError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trims and upper-cases a raw code.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl fmt::Display for PremiumCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PremiumCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PremiumCode::try_new(&value)
    }
}

impl From<PremiumCode> for String {
    fn from(code: PremiumCode) -> Self {
        code.0
    }
}

/// Stored state of a premium code.
///
/// # Invariants
///
/// - `is_used` moves from false to true at most once
/// - `used_by` and `used_at` are set exactly when `is_used` is true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumCodeRecord {
    pub code: PremiumCode,
    pub is_used: bool,
    pub used_by: Option<UserId>,
    pub used_at: Option<Timestamp>,
}

impl PremiumCodeRecord {
    /// A freshly provisioned, unused code.
    pub fn unused(code: PremiumCode) -> Self {
        Self {
            code,
            is_used: false,
            used_by: None,
            used_at: None,
        }
    }

    /// Returns true while the code can still be redeemed.
    pub fn is_available(&self) -> bool {
        !self.is_used
    }

    /// Marks the code consumed by `user_id`.
    ///
    /// Returns false without touching the record if the code was already used,
    /// which is the conditional-write contract every store must honour.
    pub fn consume(&mut self, user_id: &UserId, at: Timestamp) -> bool {
        if self.is_used {
            return false;
        }
        self.is_used = true;
        self.used_by = Some(user_id.clone());
        self.used_at = Some(at);
        true
    }
}
