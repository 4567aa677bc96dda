//! Player Password Value Objects
//!
//! Domain wrappers over `platform::password`. The clear text only lives in
//! [`RawPassword`] (zeroized on drop); entities hold a [`PlayerPassword`] hash.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{PlaytrackError, PlaytrackResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> PlaytrackResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let reason = match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    format!("password must not be less than {min} symbols")
                }
                PasswordPolicyError::InvalidCharacter => {
                    "password contains control characters".to_string()
                }
            };
            PlaytrackError::InvalidPlayer(reason)
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Player Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct PlayerPassword(HashedPassword);

impl PlayerPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> PlaytrackResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| PlaytrackError::Internal(e.to_string()))
    }

    /// Rebuild from a stored PHC string
    pub fn from_db(phc: &str) -> PlaytrackResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| PlaytrackError::Internal(format!("stored password hash: {e}")))
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for PlayerPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlayerPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_is_invalid_player() {
        let err = RawPassword::new("1234567".to_string()).unwrap_err();
        assert!(matches!(err, PlaytrackError::InvalidPlayer(ref m) if m.contains("8")));
    }

    #[test]
    fn test_hash_verify_and_reload() {
        let raw = RawPassword::new("hunter2hunter2".to_string()).unwrap();
        let hashed = PlayerPassword::from_raw(&raw, Some(b"pepper")).unwrap();
        assert!(hashed.verify(&raw, Some(b"pepper")));

        let reloaded = PlayerPassword::from_db(hashed.as_str()).unwrap();
        assert!(reloaded.verify(&raw, Some(b"pepper")));
        assert!(!reloaded.verify(&RawPassword::new("wrong-password".to_string()).unwrap(), Some(b"pepper")));
    }

    #[test]
    fn test_debug_hides_hash() {
        let raw = RawPassword::new("hunter2hunter2".to_string()).unwrap();
        let hashed = PlayerPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{hashed:?}").contains("argon2"));
        assert_eq!(format!("{raw:?}"), "RawPassword(\"[REDACTED]\")");
    }
}
