//! `HtmlAudioElement` behind the `AudioPrimitive` seam.

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Event, HtmlAudioElement};

use super::{describe_js, with_game};
use crate::playback::{AudioPrimitive, PlayTicket};

pub(crate) struct HtmlAudio {
    element: HtmlAudioElement,
    subscriptions: Option<Subscriptions>,
}

impl HtmlAudio {
    pub(crate) fn new() -> Result<Self, JsValue> {
        Ok(Self {
            element: HtmlAudioElement::new()?,
            subscriptions: None,
        })
    }
}

impl AudioPrimitive for HtmlAudio {
    fn set_source(&mut self, src: &str) {
        self.element.set_src(src);
    }

    fn load(&mut self) {
        self.element.load();
    }

    fn play(&mut self, ticket: PlayTicket) {
        // The promise settles on a later task; report back with the ticket.
        let settled = self.element.play();
        spawn_local(async move {
            let result = match settled {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| describe_js(&e)),
                Err(e) => Err(describe_js(&e)),
            };
            with_game(|game| game.on_play_resolved(ticket, result));
        });
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!(error = %describe_js(&e), "pause failed");
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let d = self.element.duration();
        (d.is_finite() && d > 0.0).then_some(d)
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn attach(&mut self, generation: u64) {
        // Replacing the guard removes the old listeners first.
        self.subscriptions = None;
        match Subscriptions::attach(&self.element, generation) {
            Ok(subs) => self.subscriptions = Some(subs),
            Err(e) => warn!(error = %describe_js(&e), generation, "could not attach audio listeners"),
        }
    }

    fn detach(&mut self) {
        if let Some(subs) = self.subscriptions.take() {
            debug!(generation = subs.generation, "detaching audio listeners");
        }
    }
}

/// Event listeners bound to one load generation. Dropping the guard removes
/// every listener it added.
struct Subscriptions {
    target: HtmlAudioElement,
    generation: u64,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Subscriptions {
    fn attach(element: &HtmlAudioElement, generation: u64) -> Result<Self, JsValue> {
        let mut subs = Self {
            target: element.clone(),
            generation,
            listeners: Vec::with_capacity(4),
        };

        let el = element.clone();
        subs.listen("timeupdate", move |_evt| {
            let seconds = el.current_time();
            with_game(|game| game.on_time_update(generation, seconds));
        })?;
        subs.listen("ended", move |_evt| {
            with_game(|game| game.on_ended(generation));
        })?;
        subs.listen("canplay", move |_evt| {
            with_game(|game| game.on_ready(generation));
        })?;
        let el = element.clone();
        subs.listen("error", move |_evt| {
            let message = el
                .error()
                .map(|e| e.message())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            with_game(|game| game.on_load_error(generation, &message));
        })?;
        Ok(subs)
    }

    fn listen(&mut self, kind: &'static str, f: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        self.target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push((kind, closure));
        Ok(())
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        for (kind, closure) in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
}
