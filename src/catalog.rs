//! Track catalog: the candidate tracks for a round and the one acting as the
//! answer key. Built from the bundled playlist or from a playlist proxy reply.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Audio files shipped with the page. Titles come from the file stem.
pub const BUNDLED_PLAYLIST: &[&str] = &[
    "assets/playlist/Kabhi Khushi Kabhie Gham.mp3",
    "assets/playlist/Dil Chahta Hai.mp3",
    "assets/playlist/Kal Ho Naa Ho.mp3",
    "assets/playlist/Dil Se Re.mp3",
    "assets/playlist/Chaiyya Chaiyya.mp3",
    "assets/playlist/Tujhe Dekha To.mp3",
    "assets/playlist/Dilbaro.mp3",
    "assets/playlist/Kuch Kuch Hota Hai.mp3",
    "assets/playlist/Tum Hi Ho.mp3",
    "assets/playlist/Dil Diyan Gallan.mp3",
    "assets/playlist/Jai Ho.mp3",
    "assets/playlist/Taal Se Taal Mila.mp3",
    "assets/playlist/Dilli 6.mp3",
];

const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: u32,
    pub title: String,
    /// Playable audio URL or bundled path.
    #[serde(rename = "file")]
    pub audio_ref: String,
}

/// How the answer track is picked from a freshly loaded catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackSelection {
    #[default]
    First,
    /// Same seed, same track for a given catalog. The browser front-end fills
    /// a missing seed from the page's entropy source before the game starts.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

/// Playlist proxy reply: `{ "tracks": [...] }` on success, `{ "error": "..." }`
/// (with a 500 status) on failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlaylistResponse {
    Tracks { tracks: Vec<Track> },
    Error { error: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
    current: usize,
}

impl Catalog {
    /// Non-empty catalog with unique ids; the first track is current.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::CatalogEmpty);
        }
        let mut seen = HashSet::with_capacity(tracks.len());
        for t in &tracks {
            if !seen.insert(t.id) {
                return Err(Error::DuplicateTrackId(t.id));
            }
        }
        Ok(Self { tracks, current: 0 })
    }

    /// One track per audio path, ids in listing order.
    pub fn from_bundle<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        let tracks = paths
            .iter()
            .enumerate()
            .map(|(idx, path)| Track {
                id: idx as u32,
                title: title_from_path(path.as_ref()),
                audio_ref: path.as_ref().to_string(),
            })
            .collect();
        Self::new(tracks)
    }

    /// Parse a playlist proxy body.
    pub fn from_playlist_json(body: &str) -> Result<Self> {
        match serde_json::from_str::<PlaylistResponse>(body)? {
            PlaylistResponse::Tracks { tracks } => Self::new(tracks),
            PlaylistResponse::Error { error } => Err(Error::CatalogFetch(error)),
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn get(&self, id: u32) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Apply a selection policy and return the chosen track.
    pub fn select(&mut self, selection: TrackSelection) -> &Track {
        self.current = match selection {
            TrackSelection::First => 0,
            TrackSelection::Random { seed } => seeded_index(seed.unwrap_or(0), self.tracks.len()),
        };
        self.current()
    }

    /// Make the track with `id` current.
    pub fn set_current(&mut self, id: u32) -> Result<&Track> {
        let idx = self
            .tracks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::UnknownTrack(id))?;
        self.current = idx;
        Ok(self.current())
    }
}

/// File stem of a path or URL, e.g. `a/b/Dil Se Re.mp3` -> `Dil Se Re`.
pub fn title_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    let stem = match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    };
    if stem.trim().is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        stem.to_string()
    }
}

fn seeded_index(seed: u64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    // LCG step so nearby seeds spread across the list (not crypto secure)
    (seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
        >> 33) as usize
        % len
}
