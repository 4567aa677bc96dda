//! Game Entity
//!
//! A catalog entry. Created once and never mutated; `points` is derived from
//! `hours_to_beat` and can't be supplied by a caller.

use chrono::{DateTime, Utc};
use kernel::id::GameId;
use serde::Serialize;

use crate::domain::services::calculate_points;
use crate::domain::value_object::WebUrl;
use crate::error::{PlaytrackError, PlaytrackResult};

pub const MIN_TITLE_LENGTH: usize = 3;

/// Catalog creation input
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub hours_to_beat: i32,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub hours_to_beat: i32,
    pub url: Option<WebUrl>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(params: NewGame) -> PlaytrackResult<Self> {
        validate_title(&params.title)?;
        let points = calculate_points(params.hours_to_beat)?;
        let url = params
            .url
            .map(|raw| WebUrl::parse(raw).map_err(|e| PlaytrackError::InvalidGame(format!("url: {e}"))))
            .transpose()?;

        Ok(Self {
            id: GameId::new(),
            title: params.title,
            hours_to_beat: params.hours_to_beat,
            url,
            points,
            created_at: Utc::now(),
        })
    }

    /// Re-check every invariant without touching the entity
    pub fn validate(&self) -> PlaytrackResult<()> {
        validate_title(&self.title)?;
        if self.points != calculate_points(self.hours_to_beat)? {
            return Err(PlaytrackError::InvalidGame(format!(
                "points {} do not match {} hours to beat",
                self.points, self.hours_to_beat
            )));
        }
        if let Some(url) = &self.url {
            WebUrl::parse(url.as_str()).map_err(|e| PlaytrackError::InvalidGame(format!("url: {e}")))?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> PlaytrackResult<()> {
    if title.chars().count() < MIN_TITLE_LENGTH {
        return Err(PlaytrackError::InvalidGame(format!(
            "title must not be less than {MIN_TITLE_LENGTH} symbols"
        )));
    }
    Ok(())
}
