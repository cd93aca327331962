//! One game: the loaded catalog, the active round and the playback session
//! bound to its track. User actions and audio callbacks all land here so the
//! reveal cap is always computed from the live attempt history.

use std::collections::VecDeque;

use tracing::{debug, error, info};

use crate::catalog::{Catalog, Track};
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::guess::{GuessEvent, GuessSession, Outcome};
use crate::notification::Notification;
use crate::playback::{AudioPrimitive, PlayTicket, PlaybackSession, Readiness, Toggle};
use crate::reveal::RevealPolicy;
use crate::suggest::suggestions;
use crate::view::{GameView, format_clock};

pub struct Game<A: AudioPrimitive> {
    config: GameConfig,
    policy: RevealPolicy,
    catalog: Option<Catalog>,
    round: Option<GuessSession>,
    playback: PlaybackSession<A>,
    notifications: VecDeque<Notification>,
    catalog_error: Option<String>,
    // token of the most recent catalog request
    catalog_load: u64,
}

impl<A: AudioPrimitive> Game<A> {
    pub fn new(config: GameConfig, audio: A) -> Result<Self> {
        config.validate()?;
        let policy = config.reveal_policy()?;
        let playback = PlaybackSession::new(audio, config.volume);
        Ok(Self {
            config,
            policy,
            catalog: None,
            round: None,
            playback,
            notifications: VecDeque::new(),
            catalog_error: None,
            catalog_load: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn policy(&self) -> &RevealPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn round(&self) -> Option<&GuessSession> {
        self.round.as_ref()
    }

    pub fn playback(&self) -> &PlaybackSession<A> {
        &self.playback
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.catalog.as_ref().map(Catalog::current)
    }

    pub fn outcome(&self) -> Outcome {
        self.round
            .as_ref()
            .map(GuessSession::outcome)
            .unwrap_or(Outcome::InProgress)
    }

    /// The active reveal cap, looked up from the current history.
    pub fn cap(&self) -> Option<f64> {
        let round = self.round.as_ref()?;
        self.policy.cap(round.attempt_count(), round.outcome())
    }

    /// Install a catalog that is already at hand (bundled playlist, tests).
    pub fn load_catalog(&mut self, catalog: Result<Catalog>) {
        let token = self.begin_catalog_load();
        self.finish_catalog_load(token, catalog);
    }

    /// Start an asynchronous catalog request. Only the result carrying the
    /// newest token is installed.
    pub fn begin_catalog_load(&mut self) -> u64 {
        self.catalog_load += 1;
        self.catalog_load
    }

    /// Install a freshly loaded catalog, or enter the catalog-error state.
    /// Returns false when `token` was superseded and the result is dropped.
    pub fn finish_catalog_load(&mut self, token: u64, catalog: Result<Catalog>) -> bool {
        if token != self.catalog_load {
            debug!(token, current = self.catalog_load, "discarding stale catalog load");
            return false;
        }
        match catalog {
            Ok(mut catalog) => {
                let track = catalog.select(self.config.selection).clone();
                info!(tracks = catalog.len(), answer_id = track.id, "catalog loaded");
                self.catalog = Some(catalog);
                self.catalog_error = None;
                self.start_round(&track);
            }
            Err(err) => {
                error!(%err, "catalog load failed");
                self.playback.unload();
                self.catalog = None;
                self.round = None;
                self.catalog_error = Some(err.to_string());
                self.notifications.push_back(Notification::from_error(&err));
            }
        }
        true
    }

    /// Replace the active track with `id`, starting a fresh round.
    pub fn select_track(&mut self, id: u32) -> Result<()> {
        let catalog = self.catalog.as_mut().ok_or(Error::CatalogEmpty)?;
        let track = catalog.set_current(id)?.clone();
        self.start_round(&track);
        Ok(())
    }

    fn start_round(&mut self, track: &Track) {
        self.round = Some(GuessSession::new(
            track.title.clone(),
            self.config.max_attempts,
        ));
        self.playback.load_track(track);
    }

    // --- user actions ---------------------------------------------------------

    pub fn toggle_play(&mut self) -> Toggle {
        if self.round.is_none() {
            debug!("play toggled before a track was loaded");
            return Toggle::Ignored;
        }
        let cap = self.cap();
        self.playback.toggle_play(cap)
    }

    pub fn submit_guess(&mut self, text: &str) {
        if let Some(round) = self.round.as_mut() {
            let result = round.submit_guess(text);
            self.apply(result);
        }
    }

    /// Submit the pending input (Enter key or SUBMIT).
    pub fn submit_input(&mut self) {
        if let Some(round) = self.round.as_mut() {
            let result = round.submit_input();
            self.apply(result);
        }
    }

    /// Every recorded skip rewinds and pauses, including the one that ends
    /// the round.
    pub fn skip(&mut self) {
        if let Some(round) = self.round.as_mut() {
            let result = round.skip();
            if result.is_ok() {
                self.playback.rewind();
            }
            self.apply(result);
        }
    }

    pub fn clear_input(&mut self) {
        if let Some(round) = self.round.as_mut() {
            round.clear_input();
        }
    }

    pub fn set_input(&mut self, text: &str) {
        if let Some(round) = self.round.as_mut() {
            round.set_input(text);
        }
    }

    pub fn select_suggestion(&mut self, title: &str) {
        if let Some(round) = self.round.as_mut() {
            round.select_suggestion(title);
        }
    }

    /// Suggestions for the current input, hidden right after a selection.
    pub fn suggestions(&self) -> Vec<&Track> {
        match (&self.round, &self.catalog) {
            (Some(round), Some(catalog)) if !round.suggestions_suppressed() => suggestions(
                round.input(),
                catalog.tracks(),
                self.config.suggestion_limit,
            ),
            _ => Vec::new(),
        }
    }

    fn apply(&mut self, result: Result<GuessEvent>) {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                debug!(%err, "ignoring action");
                return;
            }
        };
        debug!(?event, "attempt recorded");
        match event {
            GuessEvent::Won { answer } => {
                info!(%answer, "round won");
                self.notifications.push_back(Notification::correct(&answer));
                self.playback.play_from_start();
            }
            GuessEvent::Lost { answer } => {
                info!(%answer, "round lost");
                self.notifications.push_back(Notification::game_over(&answer));
            }
            GuessEvent::Skipped { .. } | GuessEvent::Wrong { .. } => {}
        }
    }

    // --- audio callbacks ------------------------------------------------------

    /// Returns true when this update hit the reveal cap and paused playback.
    pub fn on_time_update(&mut self, generation: u64, seconds: f64) -> bool {
        let cap = self.cap();
        self.playback.on_time_update(generation, seconds, cap)
    }

    pub fn on_ended(&mut self, generation: u64) {
        self.playback.on_ended(generation);
    }

    pub fn on_ready(&mut self, generation: u64) {
        self.playback.on_ready(generation);
    }

    pub fn on_load_error(&mut self, generation: u64, message: &str) {
        if let Err(err) = self.playback.on_load_error(generation, message) {
            error!(%err, generation, "audio load failed");
            self.notifications.push_back(Notification::from_error(&err));
        }
    }

    pub fn on_play_resolved(
        &mut self,
        ticket: PlayTicket,
        result: std::result::Result<(), String>,
    ) {
        if let Err(err) = self.playback.on_play_resolved(ticket, result) {
            self.notifications.push_back(Notification::from_error(&err));
        }
    }

    // --- presentation ---------------------------------------------------------

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn view(&self) -> GameView {
        let max = self.config.max_attempts;
        let mut attempts: Vec<String> = self
            .round
            .as_ref()
            .map(|r| r.attempts().iter().map(|a| a.label().to_string()).collect())
            .unwrap_or_default();
        attempts.resize(max, String::new());

        let outcome = self.outcome();
        let in_progress = self.round.is_some() && !outcome.is_terminal();
        let input = self
            .round
            .as_ref()
            .map(|r| r.input().to_string())
            .unwrap_or_default();
        let cap = self.cap();

        let window_label = match cap {
            Some(c) => format_clock(c),
            None => format_clock(
                self.playback
                    .duration()
                    .unwrap_or_else(|| self.policy.allowed_seconds(max - 1, None)),
            ),
        };
        let error = match (self.playback.readiness(), &self.catalog_error) {
            (_, Some(msg)) => Some(msg.clone()),
            (Readiness::Failed(msg), None) => Some(msg.clone()),
            _ => None,
        };

        GameView {
            attempts,
            outcome,
            can_submit: in_progress && !input.trim().is_empty(),
            can_skip: in_progress,
            input,
            suggestions: self.suggestions().into_iter().cloned().collect(),
            is_playing: self.playback.is_playing(),
            can_play: self.playback.can_play(),
            loading: self.catalog.is_none() && self.catalog_error.is_none(),
            progress: self.playback.progress_fraction(cap),
            elapsed_label: format_clock(self.playback.position()),
            window_label,
            error,
            answer: outcome
                .is_terminal()
                .then(|| self.round.as_ref().map(|r| r.answer().to_string()))
                .flatten(),
        }
    }
}
