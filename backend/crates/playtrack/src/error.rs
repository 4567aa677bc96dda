//! Playtrack Error Types
//!
//! Domain error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::PlayedGameId;
use thiserror::Error;

use crate::domain::value_object::played_game_status::TransitionError;
use crate::domain::value_object::rating::{MAX_RATING, MIN_RATING};

/// Playtrack-specific result type alias
pub type PlaytrackResult<T> = Result<T, PlaytrackError>;

/// Playtrack-specific error variants
#[derive(Debug, Error)]
pub enum PlaytrackError {
    /// Catalog game failed validation (title, hours to beat, url)
    #[error("Invalid game: {0}")]
    InvalidGame(String),

    /// Player profile failed validation (username, password, email, image)
    #[error("Invalid player: {0}")]
    InvalidPlayer(String),

    #[error("Rating must be in range [{}; {}] (got {value})", MIN_RATING, MAX_RATING)]
    InvalidRating { value: i32 },

    #[error("Text must be at most {max} characters (got {actual})")]
    TextTooLong { max: usize, actual: usize },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// Requested status is not reachable from the current one
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The player still has a played game in a non-terminal status
    #[error("Player has a played game in non-terminal status: {0}")]
    ActiveGameExists(PlayedGameId),

    #[error("{0} not found")]
    NotFound(String),

    /// Unknown username or wrong password
    #[error("Invalid credentials")]
    Unauthorized,

    /// The actor may not act on behalf of the target player
    #[error("Not allowed to act for this player")]
    Forbidden,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlaytrackError {
    pub(crate) fn not_found(what: impl std::fmt::Display) -> Self {
        PlaytrackError::NotFound(what.to_string())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaytrackError::InvalidGame(_)
            | PlaytrackError::InvalidPlayer(_)
            | PlaytrackError::InvalidRating { .. }
            | PlaytrackError::TextTooLong { .. }
            | PlaytrackError::InvalidDateRange(_) => ErrorKind::BadRequest,
            PlaytrackError::Transition(_)
            | PlaytrackError::ActiveGameExists(_)
            | PlaytrackError::UsernameTaken => ErrorKind::Conflict,
            PlaytrackError::NotFound(_) => ErrorKind::NotFound,
            PlaytrackError::Unauthorized => ErrorKind::Unauthorized,
            PlaytrackError::Forbidden => ErrorKind::Forbidden,
            PlaytrackError::Database(_) | PlaytrackError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the error was raised by input validation (before any store call)
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::BadRequest
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PlaytrackError::Database(e) => {
                tracing::error!(error = %e, "Playtrack database error");
            }
            PlaytrackError::Internal(msg) => {
                tracing::error!(message = %msg, "Playtrack internal error");
            }
            PlaytrackError::Unauthorized => {
                tracing::warn!("Rejected credential check");
            }
            PlaytrackError::Forbidden => {
                tracing::warn!("Rejected cross-player action");
            }
            PlaytrackError::ActiveGameExists(id) => {
                tracing::warn!(played_game_id = %id, "Rejected start while a game is active");
            }
            _ => {
                tracing::debug!(error = %self, "Playtrack error");
            }
        }
    }

    /// What the caller can do to resolve a conflict
    fn conflict_action(&self) -> Option<&'static str> {
        match self {
            PlaytrackError::ActiveGameExists(_) => {
                Some("Complete, drop or reroll the current game first")
            }
            PlaytrackError::Transition(_) => Some("Reload the played game and retry"),
            PlaytrackError::UsernameTaken => Some("Choose a different username"),
            _ => None,
        }
    }
}

impl From<PlaytrackError> for AppError {
    fn from(err: PlaytrackError) -> Self {
        err.log();
        if let PlaytrackError::Database(e) = err {
            return AppError::from(e);
        }
        let app = AppError::new(err.kind(), err.to_string());
        match err.conflict_action() {
            Some(action) => app.with_action(action),
            None => app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::played_game_status::PlayedGameStatus;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert!(PlaytrackError::InvalidRating { value: 0 }.is_validation());
        assert!(PlaytrackError::TextTooLong { max: 256, actual: 300 }.is_validation());
        assert!(PlaytrackError::InvalidDateRange("x".into()).is_validation());
        assert!(!PlaytrackError::UsernameTaken.is_validation());
    }

    #[test]
    fn test_conflicts() {
        let transition = TransitionError {
            from: PlayedGameStatus::Completed,
            to: PlayedGameStatus::Dropped,
        };
        assert_eq!(PlaytrackError::from(transition).kind(), ErrorKind::Conflict);
        assert_eq!(
            PlaytrackError::ActiveGameExists(PlayedGameId::new()).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_rating_message() {
        assert_eq!(
            PlaytrackError::InvalidRating { value: 101 }.to_string(),
            "Rating must be in range [1; 100] (got 101)"
        );
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = PlaytrackError::Forbidden.into();
        assert_eq!(app.status_code(), 403);

        let app: AppError = PlaytrackError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(app.kind(), ErrorKind::ServiceUnavailable);

        let app: AppError = PlaytrackError::ActiveGameExists(PlayedGameId::new()).into();
        assert!(app.action().is_some());
    }

    #[test]
    fn test_conflict_actions() {
        let transition = TransitionError {
            from: PlayedGameStatus::Completed,
            to: PlayedGameStatus::Dropped,
        };
        let app: AppError = PlaytrackError::from(transition).into();
        assert_eq!(app.kind(), ErrorKind::Conflict);
        assert_eq!(app.action(), Some("Reload the played game and retry"));

        let app: AppError = PlaytrackError::UsernameTaken.into();
        assert_eq!(app.action(), Some("Choose a different username"));
        assert!(!app.is_retryable());

        // Kind defaults still apply where no conflict hint exists
        let app: AppError = PlaytrackError::Unauthorized.into();
        assert_eq!(app.action(), Some("Check the username and password"));
        let app: AppError = PlaytrackError::not_found("game 7").into();
        assert!(app.action().is_none());
    }
}
