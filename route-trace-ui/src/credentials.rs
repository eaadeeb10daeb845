//! Session token in `document.cookie`.

use trace_core::credential::{clear_cookie_string, cookie_value, set_cookie_string, COOKIE_NAME};
use trace_core::CredentialStore;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

#[derive(Debug, Clone, Copy, Default)]
pub struct CookieCredentials;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
}

impl CredentialStore for CookieCredentials {
    fn load(&self) -> Option<String> {
        let header = html_document()?.cookie().ok()?;
        let encoded = cookie_value(&header, COOKIE_NAME)?;
        js_sys::decode_uri_component(encoded)
            .ok()
            .map(String::from)
            .filter(|token| !token.is_empty())
    }

    fn store(&self, token: &str) {
        let Some(document) = html_document() else {
            return;
        };
        let encoded = String::from(js_sys::encode_uri_component(token));
        if let Err(e) = document.set_cookie(&set_cookie_string(COOKIE_NAME, &encoded)) {
            dioxus_logger::tracing::warn!("Failed to store session cookie: {:?}", e);
        }
    }

    fn clear(&self) {
        if let Some(document) = html_document() {
            let _ = document.set_cookie(&clear_cookie_string(COOKIE_NAME));
        }
    }
}
