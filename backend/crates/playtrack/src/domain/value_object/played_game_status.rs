//! Played Game Status Value Object
//!
//! プレイ中ゲームのライフサイクルを表す状態機械。
//!
//! ```text
//! added ──► in_progress ──► completed
//!   │            │      └──► dropped
//!   │            └─────────► rerolled
//!   └──► completed | dropped | rerolled
//! ```
//!
//! ## 不変条件
//! - `completed` / `dropped` / `rerolled` は終端状態（以降の遷移なし）
//! - 自己遷移は不可
//! - 状態が非終端のプレイ中ゲームはプレイヤーごとに最大1件

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Lifecycle status of a played game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayedGameStatus {
    /// Attached to the player's list, not started yet
    #[default]
    Added,
    InProgress,
    Completed,
    Dropped,
    Rerolled,
}

/// Rejected status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot change played game status from {from} to {to}")]
pub struct TransitionError {
    pub from: PlayedGameStatus,
    pub to: PlayedGameStatus,
}

impl PlayedGameStatus {
    pub const ALL: [PlayedGameStatus; 5] = [
        Self::Added,
        Self::InProgress,
        Self::Completed,
        Self::Dropped,
        Self::Rerolled,
    ];

    /// Get string code for storage/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
            Self::Rerolled => "rerolled",
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "added" => Some(Self::Added),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "dropped" => Some(Self::Dropped),
            "rerolled" => Some(Self::Rerolled),
            _ => None,
        }
    }

    /// 終端状態かどうか
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Dropped | Self::Rerolled)
    }

    /// 遷移表
    pub const fn can_transition_to(&self, next: PlayedGameStatus) -> bool {
        use PlayedGameStatus::*;
        match (*self, next) {
            (Added, InProgress | Completed | Dropped | Rerolled) => true,
            (InProgress, Completed | Dropped | Rerolled) => true,
            (Added, Added) | (InProgress, Added | InProgress) => false,
            (Completed | Dropped | Rerolled, _) => false,
        }
    }

    /// Validate a move to `next` and return it
    pub fn transition_to(self, next: PlayedGameStatus) -> Result<PlayedGameStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for PlayedGameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
