//! Helpers navigateur : cookies, localStorage, alert().

use gloo::storage::{LocalStorage, Storage};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use posts_core::cookies::CookieSource;
use posts_core::store::KvStore;
use posts_core::view::Notifier;

/// Renvoie la chaîne complète des cookies.
pub fn get_cookies() -> Option<String> {
    let document = window()?.document()?;
    let html_doc: &HtmlDocument = document.unchecked_ref();
    html_doc.cookie().ok()
}

/// `document.cookie`, relu à chaque appel.
pub struct DocumentCookies;

impl CookieSource for DocumentCookies {
    fn cookie_string(&self) -> Option<String> {
        get_cookies()
    }
}

/// `localStorage` brut : valeurs en texte simple, pas en JSON.
pub struct BrowserStore;

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::raw().set_item(key, value) {
            warn!("localStorage.setItem({key}) failed: {e:?}");
        }
    }
}

pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn alert(&self, message: &str) {
        gloo_dialogs::alert(message);
    }
}
