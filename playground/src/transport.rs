use std::cell::RefCell;

use anyhow::{Context, Result};
use cookie::Cookie;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use reqwest::blocking::Client;
use reqwest::header::{COOKIE, SET_COOKIE};

use posts_core::http::{ApiRequest, ApiResponse, Method, Transport, TransportError};

/// Transport natif : reqwest bloquant, enveloppé dans un futur déjà prêt.
/// Comme un navigateur, renvoie le jar de cookies (`Cookie:`) avec chaque
/// requête : le jeton CSRF seul ne suffit pas sans la session qui le porte.
pub struct BlockingTransport {
    client:  Client,
    cookies: RefCell<Option<String>>,
}

impl BlockingTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, cookies: RefCell::new(None) })
    }

    /// Jar au format `document.cookie` (`a=1; b=2`).
    pub fn set_cookies(&self, jar: impl Into<String>) {
        let jar = jar.into();
        *self.cookies.borrow_mut() = (!jar.trim().is_empty()).then_some(jar);
    }

    fn send_blocking(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.header_value(COOKIE.as_str()).is_none() {
            if let Some(jar) = self.cookies.borrow().as_deref() {
                builder = builder.header(COOKIE, jar);
            }
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp   = builder.send().map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status().as_u16();
        let body   = resp.text().map_err(|e| TransportError(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }

    /// GET sur une page du backend pour récupérer les cookies posés
    /// (dont `csrf_token`), au format de `document.cookie`.
    pub fn prime_cookies(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to GET {url} for cookies"))?;

        let headers = resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok());
        let jar = cookie_string(headers);
        self.set_cookies(jar.clone());
        Ok(jar)
    }
}

impl Transport for BlockingTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        future::ready(self.send_blocking(request)).boxed_local()
    }
}

/// `Set-Cookie` → `a=1; b=2` (attributs Path, HttpOnly… ignorés).
pub fn cookie_string<'a>(set_cookie: impl IntoIterator<Item = &'a str>) -> String {
    set_cookie
        .into_iter()
        .filter_map(|h| Cookie::parse(h).ok())
        .map(|c| format!("{}={}", c.name(), c.value()))
        .collect::<Vec<_>>()
        .join("; ")
}
