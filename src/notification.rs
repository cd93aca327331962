//! Transient toasts surfaced to the player.

use serde::Serialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn correct(answer: &str) -> Self {
        Self {
            level: Level::Success,
            title: "Correct!".into(),
            description: format!("You guessed it right: {}", answer),
        }
    }

    pub fn game_over(answer: &str) -> Self {
        Self {
            level: Level::Info,
            title: "Game Over".into(),
            description: format!("The correct answer was: {}", answer),
        }
    }

    /// Toast for a load or playback failure.
    pub fn from_error(err: &Error) -> Self {
        let title = match err {
            Error::AudioLoad(_) => "Audio Error",
            Error::Playback(_) => "Playback Error",
            Error::CatalogEmpty
            | Error::CatalogFetch(_)
            | Error::CatalogDecode(_)
            | Error::DuplicateTrackId(_) => "Playlist Error",
            _ => "Error",
        };
        let description = match err {
            Error::Playback(_) => format!(
                "{}. Check that the audio files are correctly loaded.",
                err
            ),
            _ => err.to_string(),
        };
        Self {
            level: Level::Error,
            title: title.into(),
            description,
        }
    }
}
