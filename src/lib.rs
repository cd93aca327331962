//! Bollydle core crate.
//!
//! A short clip of a track plays and the player guesses the title. Every wrong
//! guess or skip widens how much of the clip may be heard. The round logic
//! (reveal policy, guess session, playback session, suggestions) is plain Rust
//! and runs natively under `cargo test`; the `web` module wires it to the DOM
//! and an `HtmlAudioElement` when built for wasm32.

use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod guess;
pub mod notification;
pub mod playback;
pub mod reveal;
pub mod suggest;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod web;

pub use catalog::{BUNDLED_PLAYLIST, Catalog, Track, TrackSelection};
pub use config::{CatalogSource, GameConfig};
pub use error::{Error, Result};
pub use game::Game;
pub use guess::{GuessAttempt, GuessEvent, GuessSession, MAX_ATTEMPTS, Outcome};
pub use notification::{Level, Notification};
pub use playback::{AudioPrimitive, PlayTicket, PlaybackSession, Readiness, Toggle};
pub use reveal::{DEFAULT_THRESHOLDS, RevealPolicy};
pub use suggest::{DEFAULT_SUGGESTION_LIMIT, suggestions};
pub use view::{GameView, format_clock};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Build the page and start loading the catalog. `config_json` follows
/// [`GameConfig`]; `None` plays the bundled playlist with default settings.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => GameConfig::default(),
    };
    web::start(config)
}

/// Start a fresh round on catalog track `id`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn select_track(id: u32) -> std::result::Result<(), JsValue> {
    web::select_track(id)
}

/// The current [`GameView`] serialized as JSON, for host pages that render
/// their own UI.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn game_view() -> std::result::Result<String, JsValue> {
    web::view_json()
}
