//! Playback session: exclusive owner of the audio primitive for the loaded
//! track. Enforces the reveal cap against time updates and tracks play state.
//!
//! Every asynchronous signal from the primitive carries the load generation it
//! was subscribed under (or, for play requests, a [`PlayTicket`]). Signals from
//! an older generation are dropped, so a late callback from a replaced track
//! never reaches the new one.

use tracing::{debug, info, warn};

use crate::catalog::Track;
use crate::error::{Error, Result};

/// Identifies one asynchronous play request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayTicket {
    pub generation: u64,
    pub request: u64,
}

/// The audio element seam. `play` is fire-and-forget: the implementation must
/// report completion through `PlaybackSession::on_play_resolved` with the same
/// ticket. Event delivery (time update, ended, error, ready) starts on
/// `attach` and must stop on `detach`.
pub trait AudioPrimitive {
    fn set_source(&mut self, src: &str);
    fn load(&mut self);
    fn play(&mut self, ticket: PlayTicket);
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn current_time(&self) -> f64;
    /// Track length once metadata is known.
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f64);
    fn attach(&mut self, generation: u64);
    fn detach(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Nothing loaded yet.
    Empty,
    Loading,
    Ready,
    /// The resource failed to load; play stays inert until the next
    /// `load_track`. That load counts as playable while still `Loading`, since
    /// a play request on a loading element starts once data arrives.
    Failed(String),
}

/// Result of a play/pause toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Paused,
    PlayRequested(PlayTicket),
    Ignored,
}

pub struct PlaybackSession<A: AudioPrimitive> {
    audio: A,
    generation: u64,
    next_request: u64,
    track_id: Option<u32>,
    readiness: Readiness,
    is_playing: bool,
    position: f64,
    pending: Option<PlayTicket>,
    volume: f64,
}

impl<A: AudioPrimitive> PlaybackSession<A> {
    pub fn new(audio: A, volume: f64) -> Self {
        Self {
            audio,
            generation: 0,
            next_request: 0,
            track_id: None,
            readiness: Readiness::Empty,
            is_playing: false,
            position: 0.0,
            pending: None,
            volume,
        }
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn track_id(&self) -> Option<u32> {
        self.track_id
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.audio.duration()
    }

    /// True while a track is loading or ready.
    pub fn can_play(&self) -> bool {
        matches!(self.readiness, Readiness::Loading | Readiness::Ready)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.track_id.is_some()
    }

    /// Point the primitive at a new track. Subscriptions bound to the previous
    /// track are released before new ones are attached. Returns the new
    /// generation.
    pub fn load_track(&mut self, track: &Track) -> u64 {
        self.audio.detach();
        self.audio.pause();

        self.generation += 1;
        self.track_id = Some(track.id);
        self.readiness = Readiness::Loading;
        self.is_playing = false;
        self.pending = None;
        self.position = 0.0;

        self.audio.attach(self.generation);
        self.audio.set_source(&track.audio_ref);
        self.audio.load();
        self.audio.set_volume(self.volume);
        info!(track = %track.title, generation = self.generation, "loading track");
        self.generation
    }

    /// Stop playback and release the loaded track. Play stays inert until the
    /// next `load_track`.
    pub fn unload(&mut self) {
        self.audio.detach();
        self.audio.pause();
        if self.track_id.take().is_some() {
            info!(generation = self.generation, "track unloaded");
        }
        self.generation += 1;
        self.readiness = Readiness::Empty;
        self.is_playing = false;
        self.pending = None;
        self.position = 0.0;
    }

    /// Pause when playing; otherwise start playing, rewinding first when the
    /// position already sits at or past `cap`.
    pub fn toggle_play(&mut self, cap: Option<f64>) -> Toggle {
        if !self.can_play() {
            warn!(readiness = ?self.readiness, "play toggled with no playable track");
            return Toggle::Ignored;
        }
        if self.is_playing || self.pending.is_some() {
            self.pause();
            return Toggle::Paused;
        }
        if cap.is_some_and(|c| self.position >= c) {
            self.seek_to_start();
        }
        Toggle::PlayRequested(self.request_play())
    }

    /// Seek to zero and pause, so the next manual play starts inside the
    /// (possibly wider) window.
    pub fn rewind(&mut self) {
        self.pause();
        self.seek_to_start();
    }

    /// Seek to zero and play without a cap, used once the round is won.
    pub fn play_from_start(&mut self) -> Option<PlayTicket> {
        if !self.can_play() {
            warn!("full reveal requested but the track can not play");
            return None;
        }
        self.pending = None;
        self.seek_to_start();
        Some(self.request_play())
    }

    /// Completion of an earlier play request. A failure of the current request
    /// is returned as `Error::Playback`; stale tickets are ignored.
    pub fn on_play_resolved(
        &mut self,
        ticket: PlayTicket,
        result: std::result::Result<(), String>,
    ) -> Result<()> {
        if self.pending != Some(ticket) {
            debug!(?ticket, "discarding stale play result");
            return Ok(());
        }
        self.pending = None;
        match result {
            Ok(()) => {
                self.is_playing = true;
                Ok(())
            }
            Err(message) => {
                self.is_playing = false;
                warn!(%message, "play request rejected");
                Err(Error::Playback(message))
            }
        }
    }

    /// Position advanced. Pauses once when `seconds` reaches `cap`; returns true
    /// on that crossing.
    pub fn on_time_update(&mut self, generation: u64, seconds: f64, cap: Option<f64>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.position = seconds.max(0.0);
        let active = self.is_playing || self.pending.is_some();
        match cap {
            Some(c) if active && seconds >= c => {
                debug!(cap = c, position = seconds, "reveal cap reached");
                self.pause();
                true
            }
            _ => false,
        }
    }

    pub fn on_ended(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.is_playing = false;
            self.pending = None;
        }
    }

    pub fn on_ready(&mut self, generation: u64) {
        if self.is_current(generation) && self.readiness == Readiness::Loading {
            self.readiness = Readiness::Ready;
        }
    }

    /// The current resource failed to load. Returns `Error::AudioLoad` for the
    /// current generation; stale reports are ignored.
    pub fn on_load_error(&mut self, generation: u64, message: &str) -> Result<()> {
        if !self.is_current(generation) {
            debug!(generation, "discarding stale load error");
            return Ok(());
        }
        self.readiness = Readiness::Failed(message.to_string());
        self.is_playing = false;
        self.pending = None;
        Err(Error::AudioLoad(message.to_string()))
    }

    /// Fraction of the current window already heard, in `[0, 1]`. Zero when
    /// there is no cap.
    pub fn progress_fraction(&self, cap: Option<f64>) -> f64 {
        match cap {
            Some(c) if c > 0.0 => (self.position / c).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    fn pause(&mut self) {
        self.audio.pause();
        self.is_playing = false;
        self.pending = None;
    }

    fn seek_to_start(&mut self) {
        self.audio.set_current_time(0.0);
        self.position = 0.0;
    }

    fn request_play(&mut self) -> PlayTicket {
        self.next_request += 1;
        let ticket = PlayTicket {
            generation: self.generation,
            request: self.next_request,
        };
        self.pending = Some(ticket);
        self.audio.play(ticket);
        ticket
    }
}

impl<A: AudioPrimitive> Drop for PlaybackSession<A> {
    fn drop(&mut self) {
        self.audio.detach();
        self.audio.pause();
    }
}
