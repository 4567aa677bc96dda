//! Application Error
//!
//! The single error type that leaves the core. Domain errors are folded into
//! it at the boundary; callers only look at [`ErrorKind`] and the action hint.

use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// 境界で返される統一エラー
///
/// `action` は利用者が次に取るべき行動のヒント。明示しない場合は種別ごとの
/// 既定値（認証失敗、一時的な障害）が使われる。
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::Conflict, "Played game already finished")
///     .with_action("Reload the played game");
/// assert_eq!(err.status_code(), 409);
/// assert_eq!(err.action(), Some("Reload the played game"));
///
/// let err = AppError::new(ErrorKind::ServiceUnavailable, "Database unavailable");
/// assert!(err.is_retryable());
/// assert!(err.action().is_some());
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: String,
    action: Option<&'static str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// Hint used when the error does not carry its own
const fn default_action(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::Unauthorized => Some("Check the username and password"),
        ErrorKind::ServiceUnavailable => Some("Retry the request later"),
        _ => None,
    }
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: default_action(kind),
            source: None,
        }
    }

    /// Replace the action hint
    pub fn with_action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }

    /// Keep the underlying error for logs; it never reaches `Display`
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action(&self) -> Option<&str> {
        self.action
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(action) = self.action {
            write!(f, ". {action}")?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actions() {
        assert!(AppError::new(ErrorKind::Conflict, "x").action().is_none());
        assert_eq!(
            AppError::new(ErrorKind::Unauthorized, "Invalid credentials").action(),
            Some("Check the username and password")
        );
        assert!(AppError::new(ErrorKind::ServiceUnavailable, "x").is_retryable());
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::Conflict, "Username already exists")
            .with_action("Choose a different username");
        assert_eq!(
            err.to_string(),
            "CONFLICT: Username already exists. Choose a different username"
        );

        let err = AppError::new(ErrorKind::NotFound, "game 42 not found");
        assert_eq!(err.to_string(), "NOT_FOUND: game 42 not found");
    }

    #[test]
    fn test_source_is_hidden_from_display() {
        let io_err = std::io::Error::other("connection reset by peer");
        let err = AppError::new(ErrorKind::ServiceUnavailable, "Database unavailable")
            .with_source(io_err);
        assert!(err.source().is_some());
        assert!(!err.to_string().contains("connection reset"));
    }
}
