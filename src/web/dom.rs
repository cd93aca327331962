//! DOM construction and per-frame rendering of the game view.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, window};

use super::with_game;
use crate::guess::Outcome;
use crate::notification::{Level, Notification};
use crate::view::GameView;

const TOAST_MS: i32 = 5000;

/// Handles to the elements rendering touches every frame.
struct Ui {
    doc: Document,
    attempts: Element,
    elapsed: Element,
    window: Element,
    progress_fill: HtmlElement,
    play: HtmlElement,
    input: HtmlInputElement,
    clear: HtmlElement,
    suggestions: HtmlElement,
    skip: HtmlElement,
    submit: HtmlElement,
    status: Element,
    toasts: Element,
    last: Option<GameView>,
}

thread_local! {
    static UI: RefCell<Option<Ui>> = const { RefCell::new(None) };
}

fn el(doc: &Document, parent: &Element, tag: &str, id: &str, style: &str) -> Result<Element, JsValue> {
    let e = doc.create_element(tag)?;
    if !id.is_empty() {
        e.set_id(id);
    }
    e.set_attribute("style", style)?;
    parent.append_child(&e)?;
    Ok(e)
}

fn on_click(target: &Element, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    let mut f = f;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| f()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Build the page once. Calling again replaces the previous root.
pub(super) fn mount(doc: &Document) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    for id in ["bd-root", "bd-toasts"] {
        if let Some(old) = doc.get_element_by_id(id) {
            old.remove();
        }
    }
    let root = el(doc, &body, "div", "bd-root", "background:#000; color:#fff; min-height:100vh; font-family:system-ui, sans-serif; display:flex; flex-direction:column; align-items:stretch; max-width:640px; margin:0 auto; padding:16px;")?;

    let header = el(doc, &root, "div", "", "display:flex; justify-content:center; padding:12px 0; border-bottom:1px solid #333;")?;
    let title = el(doc, &header, "h1", "", "font-size:26px; margin:0;")?;
    title.set_text_content(Some("Bollydle Unlimited"));

    let attempts = el(doc, &root, "div", "bd-attempts", "padding:24px 0 8px;")?;
    let status = el(doc, &root, "div", "bd-status", "text-align:center; color:#9a9a9a; margin:16px 0;")?;

    let player = el(doc, &root, "div", "bd-player", "padding:16px 0;")?;
    let bar = el(doc, &player, "div", "", "display:flex; align-items:center; gap:12px;")?;
    let elapsed = el(doc, &bar, "span", "bd-elapsed", "font-variant-numeric:tabular-nums;")?;
    let track = el(doc, &bar, "div", "", "flex:1; height:4px; background:#555; border-radius:2px; overflow:hidden;")?;
    let progress_fill: HtmlElement = el(doc, &track, "div", "bd-progress", "height:100%; width:0%; background:#fff; transition:width 0.25s linear;")?.dyn_into()?;
    let window_label = el(doc, &bar, "span", "bd-window", "font-variant-numeric:tabular-nums;")?;
    let play_row = el(doc, &player, "div", "", "display:flex; justify-content:center; margin-top:16px;")?;
    let play: HtmlElement = el(doc, &play_row, "button", "bd-play", "width:56px; height:56px; border-radius:50%; border:2px solid #fff; background:transparent; color:#fff; font-size:20px; cursor:pointer;")?.dyn_into()?;

    let controls = el(doc, &root, "div", "", "position:relative; padding-top:16px; border-top:1px solid #222;")?;
    let input_row = el(doc, &controls, "div", "", "display:flex; background:#222; border-radius:6px;")?;
    let input: HtmlInputElement = el(doc, &input_row, "input", "bd-input", "flex:1; background:transparent; border:none; color:#fff; padding:10px 12px; font-size:16px; outline:none;")?.dyn_into()?;
    input.set_placeholder("Know it? Search for the title");
    input.set_attribute("autocomplete", "off")?;
    let clear: HtmlElement = el(doc, &input_row, "button", "bd-clear", "background:transparent; border:none; color:#aaa; padding:0 12px; cursor:pointer;")?.dyn_into()?;
    clear.set_text_content(Some("×"));
    let suggestions: HtmlElement = el(doc, &controls, "div", "bd-suggestions", "position:absolute; left:0; right:0; background:#333; border-radius:6px; margin-top:4px; max-height:200px; overflow-y:auto; z-index:10;")?.dyn_into()?;

    let buttons = el(doc, &controls, "div", "", "display:flex; justify-content:space-between; margin-top:16px;")?;
    let skip: HtmlElement = el(doc, &buttons, "button", "bd-skip", "width:120px; padding:8px; background:transparent; color:#fff; border:1px solid #555; border-radius:6px; cursor:pointer;")?.dyn_into()?;
    skip.set_text_content(Some("SKIP (+1s)"));
    let submit: HtmlElement = el(doc, &buttons, "button", "bd-submit", "width:120px; padding:8px; background:#6c9bcf; color:#fff; border:none; border-radius:6px; cursor:pointer;")?.dyn_into()?;
    submit.set_text_content(Some("SUBMIT"));

    let toasts = el(doc, &body, "div", "bd-toasts", "position:fixed; top:16px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; gap:8px; z-index:50;")?;

    // --- listeners ---
    on_click(&play, || {
        with_game(|game| game.toggle_play());
    })?;
    on_click(&skip, || {
        with_game(|game| game.skip());
    })?;
    on_click(&submit, || {
        with_game(|game| game.submit_input());
    })?;
    on_click(&clear, || {
        with_game(|game| game.clear_input());
    })?;
    {
        let input_evt = input.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let text = input_evt.value();
            with_game(|game| game.set_input(&text));
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() == "Enter" {
                with_game(|game| game.submit_input());
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        // Suggestion rows are rebuilt on render; listen on the container.
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let title = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|e| e.get_attribute("data-title"));
            if let Some(title) = title {
                with_game(|game| game.select_suggestion(&title));
            }
        }) as Box<dyn FnMut(_)>);
        suggestions.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let ui = Ui {
        doc: doc.clone(),
        attempts,
        elapsed,
        window: window_label,
        progress_fill,
        play,
        input,
        clear,
        suggestions,
        skip,
        submit,
        status,
        toasts,
        last: None,
    };
    UI.with(|cell| cell.replace(Some(ui)));
    Ok(())
}

/// Bring the DOM in line with `view`. Unchanged views are skipped.
pub(super) fn render(view: &GameView) {
    UI.with(|cell| {
        if let Some(ui) = cell.borrow_mut().as_mut() {
            if ui.last.as_ref() == Some(view) {
                return;
            }
            if let Err(e) = render_into(ui, view) {
                tracing::warn!(error = %super::describe_js(&e), "render failed");
            }
            ui.last = Some(view.clone());
        }
    });
}

fn render_into(ui: &Ui, view: &GameView) -> Result<(), JsValue> {
    let mut rows = String::new();
    for attempt in &view.attempts {
        rows.push_str("<div style='border:1px solid #555; margin-bottom:8px; height:50px; display:flex; align-items:center; padding:0 16px; font-size:20px; font-weight:bold;'>");
        rows.push_str(&escape(attempt));
        rows.push_str("</div>");
    }
    ui.attempts.set_inner_html(&rows);

    ui.elapsed.set_text_content(Some(&view.elapsed_label));
    ui.window.set_text_content(Some(&view.window_label));
    ui.progress_fill
        .style()
        .set_property("width", &format!("{:.1}%", view.progress * 100.0))?;

    ui.play.set_text_content(Some(if view.loading {
        "…"
    } else if view.is_playing {
        "❚❚"
    } else {
        "▶"
    }));
    set_disabled(&ui.play, !view.can_play);
    set_disabled(&ui.skip, !view.can_skip);
    set_disabled(&ui.submit, !view.can_submit);

    // Only overwrite the box when the game changed it (submit, clear, pick).
    if ui.input.value() != view.input {
        ui.input.set_value(&view.input);
    }
    ui.clear
        .style()
        .set_property("visibility", if view.input.is_empty() { "hidden" } else { "visible" })?;

    let mut list = String::new();
    for track in &view.suggestions {
        let title = escape(&track.title);
        list.push_str(&format!(
            "<div data-title=\"{}\" style='padding:12px; cursor:pointer;'>{}</div>",
            title, title
        ));
    }
    ui.suggestions.set_inner_html(&list);
    ui.suggestions
        .style()
        .set_property("display", if view.suggestions.is_empty() { "none" } else { "block" })?;

    let status = match (&view.error, view.outcome, &view.answer) {
        (Some(err), _, _) => format!("⚠ {}", err),
        (None, Outcome::Won, Some(answer)) => format!("You got it: {}", answer),
        (None, Outcome::Lost, Some(answer)) => format!("The answer was: {}", answer),
        _ if view.loading => "Loading playlist…".to_string(),
        _ => "Turn up the volume and tap to start the track!".to_string(),
    };
    ui.status.set_text_content(Some(&status));
    Ok(())
}

fn set_disabled(e: &HtmlElement, disabled: bool) {
    if disabled {
        e.set_attribute("disabled", "").ok();
        e.style().set_property("opacity", "0.4").ok();
    } else {
        e.remove_attribute("disabled").ok();
        e.style().set_property("opacity", "1").ok();
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Show a transient notification for a few seconds.
pub(super) fn toast(note: &Notification) {
    UI.with(|cell| {
        let borrowed = cell.borrow();
        let Some(ui) = borrowed.as_ref() else { return };
        let color = match note.level {
            Level::Success => "#2f855a",
            Level::Info => "#2b6cb0",
            Level::Error => "#c53030",
        };
        let Ok(div) = ui.doc.create_element("div") else { return };
        div.set_attribute("style", &format!("background:{}; color:#fff; padding:10px 16px; border-radius:6px; min-width:260px; box-shadow:0 4px 12px rgba(0,0,0,0.4);", color)).ok();
        div.set_inner_html(&format!(
            "<strong>{}</strong><div>{}</div>",
            escape(&note.title),
            escape(&note.description)
        ));
        if ui.toasts.append_child(&div).is_err() {
            return;
        }
        let remove = Closure::once_into_js(move || div.remove());
        if let Some(w) = window() {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(remove.unchecked_ref(), TOAST_MS)
                .ok();
        }
    });
}
