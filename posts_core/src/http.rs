//! Requêtes HTTP vues côté client, indépendantes de la plateforme.
//!
//! Le navigateur passe par gloo-net, le playground natif par reqwest : chacun
//! implémente [`Transport`].

use futures::future::LocalBoxFuture;
use serde::Serialize;
use thiserror::Error;

use crate::error::ClientError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                  requête                                   */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method:  Method,
    pub url:     String,
    pub query:   Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body:    Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Body JSON + `Content-Type` correspondant.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let raw = serde_json::to_string(body).map_err(ClientError::Encode)?;
        self.body = Some(raw);
        Ok(self.header("Content-Type", "application/json"))
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/* -------------------------------------------------------------------------- */
/*                                  réponse                                   */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body:   String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    /// Équivalent de `response.ok` : 200..=299.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Échec réseau (DNS, CORS, connexion refusée…). Jamais montré tel quel à
/// l'utilisateur : le client le replie sur [`ClientError::RequestFailed`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>>;
}
