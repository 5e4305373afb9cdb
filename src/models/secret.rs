//! Secret text for passwords and SSNs
//!
//! Zeroes its contents on drop and never prints them through `Debug`.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that zeroes its memory on drop
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretText(String);

impl SecretText {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the string contents
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masked form for display, e.g. `•••••••89`
    pub fn masked(&self, visible_suffix: usize) -> String {
        let len = self.0.chars().count();
        let keep = visible_suffix.min(len);
        let suffix: String = self.0.chars().skip(len - keep).collect();
        format!("{}{}", "•".repeat(len - keep), suffix)
    }
}

impl Deref for SecretText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for SecretText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecretText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for SecretText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretText([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts() {
        let secret = SecretText::new("hunter22");
        assert_eq!(format!("{:?}", secret), "SecretText([REDACTED])");
        assert_eq!(secret.expose(), "hunter22");
    }

    #[test]
    fn test_masked() {
        let ssn = SecretText::new("123-45-6789");
        assert_eq!(ssn.masked(4), "•••••••6789");
        assert_eq!(SecretText::new("ab").masked(4), "ab");
    }

    #[test]
    fn test_zeroize() {
        let mut secret = SecretText::new("hunter22");
        secret.zeroize();
        assert!(secret.is_empty());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&SecretText::new("pw")).unwrap();
        assert_eq!(json, "\"pw\"");
    }
}
