//! Acting player, as established by the caller's authentication layer.

use kernel::id::PlayerId;

use crate::error::{PlaytrackError, PlaytrackResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub player_id: PlayerId,
    pub is_admin: bool,
}

impl Actor {
    pub fn player(player_id: PlayerId) -> Self {
        Self {
            player_id,
            is_admin: false,
        }
    }

    pub fn admin(player_id: PlayerId) -> Self {
        Self {
            player_id,
            is_admin: true,
        }
    }

    /// Admins may act for anyone; other players only for themselves
    pub fn ensure_can_act_for(&self, target: &PlayerId) -> PlaytrackResult<()> {
        if self.is_admin || self.player_id == *target {
            Ok(())
        } else {
            Err(PlaytrackError::Forbidden)
        }
    }
}
