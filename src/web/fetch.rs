//! Playlist proxy client.

use tracing::info;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use super::describe_js;
use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// `GET {base_url}/playlist?playlistId={id}`.
pub(crate) async fn fetch_playlist(base_url: &str, playlist_id: &str) -> Result<Catalog> {
    let url = format!(
        "{}/playlist?playlistId={}",
        base_url.trim_end_matches('/'),
        String::from(js_sys::encode_uri_component(playlist_id))
    );
    info!(%url, "fetching playlist");

    let win = window().ok_or_else(|| Error::CatalogFetch("no window".into()))?;
    let fetch_err = |e: JsValue| Error::CatalogFetch(describe_js(&e));

    let resp: Response = JsFuture::from(win.fetch_with_str(&url))
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(fetch_err)?;
    let body = JsFuture::from(resp.text().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?
        .as_string()
        .unwrap_or_default();

    // Error replies carry `{ error }`; anything else unreadable is reported by status.
    match Catalog::from_playlist_json(&body) {
        Err(Error::CatalogDecode(_)) if !resp.ok() => Err(Error::CatalogFetch(format!(
            "proxy returned HTTP {}",
            resp.status()
        ))),
        other => other,
    }
}
