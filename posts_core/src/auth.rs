//! Inscription / connexion : un POST JSON, en-tête CSRF relu depuis les
//! cookies au moment de l'appel.

use log::{error, info, warn};
use serde_json::Value;

use crate::cookies::{csrf_token, CookieSource};
use crate::error::ClientError;
use crate::http::{ApiRequest, Transport};
use crate::models::{Credentials, LoginResponse};

pub const DEFAULT_REGISTER_URL: &str = "http://127.0.0.1:5002/register";

/// Noms du cookie et de l'en-tête CSRF.
#[derive(Clone, Copy, Debug)]
pub struct CsrfNames<'a> {
    pub cookie: &'a str,
    pub header: &'a str,
}

fn credentials_request(
    cookies: &dyn CookieSource,
    csrf: CsrfNames<'_>,
    url: &str,
    creds: &Credentials,
) -> Result<ApiRequest, ClientError> {
    let mut request = ApiRequest::post(url).json(creds)?;
    match csrf_token(cookies, csrf.cookie) {
        Some(token) => request = request.header(csrf.header, token),
        None => warn!("no `{}` cookie, POST {url} sent without CSRF header", csrf.cookie),
    }
    Ok(request)
}

pub async fn register(
    transport: &dyn Transport,
    cookies: &dyn CookieSource,
    csrf: CsrfNames<'_>,
    url: &str,
    creds: &Credentials,
) -> Result<Value, ClientError> {
    let request = credentials_request(cookies, csrf, url, creds)?;

    let result = match transport.send(request).await {
        Ok(resp) if resp.ok() => serde_json::from_str::<Value>(&resp.body).map_err(ClientError::Decode),
        Ok(_) | Err(_) => Err(ClientError::RequestFailed("Failed to register.")),
    };

    match &result {
        Ok(data) => info!("User registered: {data}"),
        Err(e) => error!("Error: {e}"),
    }
    result
}

/// Renvoie le JWT à passer en `Authorization: Bearer …`.
pub async fn login(
    transport: &dyn Transport,
    cookies: &dyn CookieSource,
    csrf: CsrfNames<'_>,
    url: &str,
    creds: &Credentials,
) -> Result<String, ClientError> {
    let request = credentials_request(cookies, csrf, url, creds)?;

    let result = match transport.send(request).await {
        Ok(resp) if resp.ok() => serde_json::from_str::<LoginResponse>(&resp.body)
            .map(|r| r.token)
            .map_err(ClientError::Decode),
        Ok(_) | Err(_) => Err(ClientError::RequestFailed("Failed to log in.")),
    };

    match &result {
        Ok(_) => info!("Logged in as {}", creds.username),
        Err(e) => error!("Error: {e}"),
    }
    result
}
