//! Email Value Object
//!
//! Syntactic check only; ownership of the address is never verified.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{PlaytrackError, PlaytrackResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> PlaytrackResult<Self> {
        let email = email.as_ref().trim();

        if email.is_empty() {
            return Err(invalid("email cannot be empty"));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(invalid("email is too long"));
        }
        if !Self::is_valid_format(email) {
            return Err(invalid("invalid email address"));
        }

        Ok(Self(email.to_string()))
    }

    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > LOCAL_PART_MAX_LENGTH || domain.contains('@') {
            return false;
        }
        if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }
        if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
            return false;
        }

        // Domain labels: alphanumerics and inner hyphens, at least one dot
        if !domain.contains('.') {
            return false;
        }
        domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
    }

    /// Rebuild from a stored value
    pub fn from_db(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

fn invalid(reason: &str) -> PlaytrackError {
    PlaytrackError::InvalidPlayer(reason.to_string())
}

impl FromStr for Email {
    type Err = PlaytrackError;

    fn from_str(s: &str) -> PlaytrackResult<Self> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = PlaytrackError;

    fn try_from(value: String) -> PlaytrackResult<Self> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@sub-domain.example.com").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        for raw in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "us er@example.com",
            ".user@example.com",
            "user@-example.com",
            "user@example..com",
        ] {
            assert!(
                matches!(Email::new(raw), Err(PlaytrackError::InvalidPlayer(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_domain() {
        let email: Email = "player@example.com".parse().unwrap();
        assert_eq!(email.domain(), "example.com");
    }
}
