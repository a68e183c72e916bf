//! Lecture des cookies (jeton CSRF…).

use cookie::Cookie;
use log::warn;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Source de la chaîne `document.cookie`. Relue à chaque appel : le jeton CSRF
/// ne doit jamais être mis en cache côté client.
pub trait CookieSource {
    fn cookie_string(&self) -> Option<String>;
}

/// Chaîne fixe, pour le playground natif et les tests.
#[derive(Clone, Debug, Default)]
pub struct StaticCookies(pub Option<String>);

impl CookieSource for StaticCookies {
    fn cookie_string(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Valeur décodée du premier cookie `name=…`, `None` sinon.
pub fn read_cookie(cookies: Option<&str>, name: &str) -> Option<String> {
    let cookies = cookies.filter(|c| !c.is_empty())?;
    let prefix  = format!("{name}=");

    let entry = cookies
        .split(';')
        .map(str::trim)
        .find(|entry| entry.starts_with(&prefix))?;

    let raw = &entry[prefix.len()..];
    match Cookie::parse_encoded(entry) {
        Ok(c) => Some(c.value().to_string()),
        Err(e) => {
            // %-encodage invalide : on rend la valeur brute
            warn!("cookie `{name}` not decodable ({e}), using raw value");
            Some(raw.to_string())
        }
    }
}

/// Jeton CSRF courant, relu depuis la source.
pub fn csrf_token(source: &dyn CookieSource, cookie_name: &str) -> Option<String> {
    read_cookie(source.cookie_string().as_deref(), cookie_name)
}
