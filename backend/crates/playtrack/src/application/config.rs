//! Application Configuration
//!
//! Configuration for the Playtrack application layer.

/// Playtrack application configuration
#[derive(Debug, Clone, Default)]
pub struct PlaytrackConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl PlaytrackConfig {
    pub fn with_pepper(pepper: impl Into<Vec<u8>>) -> Self {
        let pepper = pepper.into();
        Self {
            password_pepper: (!pepper.is_empty()).then_some(pepper),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pepper_is_none() {
        assert!(PlaytrackConfig::with_pepper("").pepper().is_none());
        assert_eq!(PlaytrackConfig::with_pepper("s3cret").pepper(), Some(&b"s3cret"[..]));
        assert!(PlaytrackConfig::default().pepper().is_none());
    }
}
