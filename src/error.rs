//! Error types for the game core.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Catalog resolved to zero playable tracks
    #[error("No tracks available")]
    CatalogEmpty,

    /// Remote playlist request failed or the proxy reported an error
    #[error("Could not load playlist: {0}")]
    CatalogFetch(String),

    /// Playlist payload was not the expected JSON shape
    #[error("Malformed playlist: {0}")]
    CatalogDecode(#[from] serde_json::Error),

    #[error("Duplicate track id {0} in catalog")]
    DuplicateTrackId(u32),

    #[error("Track {0} is not in the catalog")]
    UnknownTrack(u32),

    /// The selected track's audio resource failed to load
    #[error("Could not load audio: {0}")]
    AudioLoad(String),

    /// An asynchronous play request was rejected
    #[error("Playback failed: {0}")]
    Playback(String),

    /// Empty guess, or an action attempted after the round ended
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
