// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NVD API credential.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// An NVD API key. Only the masked form is ever displayed or logged.
#[derive(Clone)]
pub struct NvdCredential(SecretString);

impl NvdCredential {
    /// Wrap a key; blank input yields `None`.
    pub fn new(key: &str) -> Option<Self> {
        let key = key.trim();
        (!key.is_empty()).then(|| Self(SecretString::from(key.to_string())))
    }

    /// Show only the first and last four characters of keys of ten or more
    /// characters.
    pub fn masked(&self) -> String {
        let value = self.0.expose_secret();
        if value.chars().count() < 10 {
            return "****".to_string();
        }
        let prefix: String = value.chars().take(4).collect();
        let suffix: String = value.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{prefix}...{suffix}")
    }
}

impl fmt::Debug for NvdCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NvdCredential").field(&self.masked()).finish()
    }
}

impl fmt::Display for NvdCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_none() {
        assert!(NvdCredential::new("  ").is_none());
    }

    #[test]
    fn long_key_is_masked() {
        let key = NvdCredential::new("abcd-1234-efgh-5678").unwrap();
        assert_eq!(key.to_string(), "abcd...5678");
        assert_eq!(format!("{key:?}"), "NvdCredential(\"abcd...5678\")");
        assert!(!format!("{key} {key:?}").contains("1234-efgh"));
    }

    #[test]
    fn short_key_is_fully_hidden() {
        assert_eq!(NvdCredential::new("short").unwrap().masked(), "****");
    }
}
