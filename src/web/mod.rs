//! Browser front-end: owns the single game instance for the page, builds the
//! DOM, and drives rendering from `requestAnimationFrame`.
//!
//! All state lives in thread-locals. Event callbacks borrow the game with
//! `try_borrow_mut` so a callback arriving while another handler is mid-update
//! is dropped instead of mutating the game reentrantly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

use crate::catalog::{BUNDLED_PLAYLIST, Catalog, TrackSelection};
use crate::config::{CatalogSource, GameConfig};
use crate::game::Game;

mod audio;
mod dom;
mod fetch;

use audio::HtmlAudio;

pub(crate) type WebGame = Game<HtmlAudio>;

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
    static LOOP_STARTED: Cell<bool> = const { Cell::new(false) };
    // bumped by every `start`; async work from an earlier start is dropped
    static EPOCH: Cell<u64> = const { Cell::new(0) };
}

/// Run `f` against the page's game. Returns `None` when no game is running or
/// the game is already borrowed further up the stack.
pub(crate) fn with_game<R>(f: impl FnOnce(&mut WebGame) -> R) -> Option<R> {
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            warn!("game busy, dropping event");
            None
        }
    })
}

pub(crate) fn start(mut config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if let TrackSelection::Random { seed } = &mut config.selection {
        seed.get_or_insert_with(random_seed);
    }
    let source = config.catalog.clone();
    let game = Game::new(config, HtmlAudio::new()?).map_err(|e| JsValue::from_str(&e.to_string()))?;
    // Dropping a previous game releases its audio listeners.
    GAME.with(|cell| cell.replace(Some(game)));
    let epoch = EPOCH.with(|e| {
        e.set(e.get() + 1);
        e.get()
    });

    dom::mount(&doc)?;

    match source {
        CatalogSource::Bundled => {
            with_game(|game| game.load_catalog(Catalog::from_bundle(BUNDLED_PLAYLIST)));
        }
        CatalogSource::Remote {
            base_url,
            playlist_id,
        } => {
            let token = with_game(|game| game.begin_catalog_load());
            spawn_local(async move {
                let catalog = fetch::fetch_playlist(&base_url, &playlist_id).await;
                if EPOCH.with(Cell::get) != epoch {
                    warn!("game restarted, dropping playlist response");
                    return;
                }
                if let Some(token) = token {
                    with_game(|game| game.finish_catalog_load(token, catalog));
                }
            })
        }
    }

    info!("game started");
    start_render_loop();
    Ok(())
}

/// Switch the round to another catalog track.
pub(crate) fn select_track(id: u32) -> Result<(), JsValue> {
    with_game(|game| game.select_track(id))
        .ok_or_else(|| JsValue::from_str("game not running"))?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Current render snapshot as JSON.
pub(crate) fn view_json() -> Result<String, JsValue> {
    let view = with_game(|game| game.view()).ok_or_else(|| JsValue::from_str("game not running"))?;
    serde_json::to_string(&view).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_render_loop() {
    // One loop per page; it renders whichever game is current.
    if LOOP_STARTED.with(|flag| flag.replace(true)) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if let Some((view, notes)) = with_game(|game| (game.view(), game.drain_notifications())) {
            dom::render(&view);
            for note in &notes {
                dom::toast(note);
            }
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

#[cfg(feature = "rng")]
fn random_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(e) => {
            warn!(%e, "getrandom failed, seeding from the clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn random_seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0) as u64
}
