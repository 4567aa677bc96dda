//! Player Entity
//!
//! Identity and credentials of a tracked player. The password is hashed at
//! construction; the clear text never reaches the entity.

use chrono::{DateTime, Utc};
use kernel::id::PlayerId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    BoundedText, Email, PlayerPassword, RawPassword, Username, WebUrl,
};
use crate::error::{PlaytrackError, PlaytrackResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: Username,
    #[serde(skip_serializing)]
    pub password: PlayerPassword,
    pub is_admin: bool,
    pub image: Option<WebUrl>,
    pub email: Option<Email>,
    pub description: Option<BoundedText>,
    pub created_at: DateTime<Utc>,
}

/// Registration input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlayer {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    pub image: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

impl Player {
    /// Validate every field and hash the password
    pub fn register(params: NewPlayer, pepper: Option<&[u8]>) -> PlaytrackResult<Self> {
        let username = Username::new(&params.username)?;
        let raw = RawPassword::new(params.password)?;
        let image = params.image.map(parse_image).transpose()?;
        let email = params.email.map(Email::new).transpose()?;
        let description = params.description.map(BoundedText::new).transpose()?;
        let password = PlayerPassword::from_raw(&raw, pepper)?;

        Ok(Self {
            id: PlayerId::new(),
            username,
            password,
            is_admin: params.is_admin,
            image,
            email,
            description,
            created_at: Utc::now(),
        })
    }

    pub fn check_password(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password.verify(raw, pepper)
    }

    /// Re-check every invariant without touching the entity
    pub fn validate(&self) -> PlaytrackResult<()> {
        Username::new(self.username.as_str())?;
        if let Some(image) = &self.image {
            parse_image(image.as_str().to_string())?;
        }
        if let Some(email) = &self.email {
            Email::new(email.as_str())?;
        }
        if let Some(description) = &self.description {
            BoundedText::new(description.as_str())?;
        }
        Ok(())
    }
}

fn parse_image(raw: String) -> PlaytrackResult<WebUrl> {
    WebUrl::parse(raw).map_err(|e| PlaytrackError::InvalidPlayer(format!("image url: {e}")))
}

// ============================================================================
// Merge-patch input and validated patch
// ============================================================================

/// Caller-supplied partial update; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

impl PlayerUpdate {
    /// Validate only the supplied fields; a new password is hashed here
    pub fn validate(self, pepper: Option<&[u8]>) -> PlaytrackResult<PlayerPatch> {
        let password = match self.password {
            Some(raw) => Some(PlayerPassword::from_raw(&RawPassword::new(raw)?, pepper)?),
            None => None,
        };

        Ok(PlayerPatch {
            username: self.username.map(Username::new).transpose()?,
            password,
            image: self.image.map(parse_image).transpose()?,
            email: self.email.map(Email::new).transpose()?,
            description: self.description.map(BoundedText::new).transpose()?,
        })
    }
}

/// Validated set of columns to write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub username: Option<Username>,
    pub password: Option<PlayerPassword>,
    pub image: Option<WebUrl>,
    pub email: Option<Email>,
    pub description: Option<BoundedText>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, player: &mut Player) {
        if let Some(username) = &self.username {
            player.username = username.clone();
        }
        if let Some(password) = &self.password {
            player.password = password.clone();
        }
        if let Some(image) = &self.image {
            player.image = Some(image.clone());
        }
        if let Some(email) = &self.email {
            player.email = Some(email.clone());
        }
        if let Some(description) = &self.description {
            player.description = Some(description.clone());
        }
    }
}
