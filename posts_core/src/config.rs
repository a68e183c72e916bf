use serde::Deserialize;

use crate::cookies::{CSRF_COOKIE, CSRF_HEADER};
use crate::error::ConfigError;
use crate::store::ENDPOINT_KEY;
use crate::variant::ApiVariant;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub variant:     ApiVariant,
    pub storage_key: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            variant:     ApiVariant::default(),
            storage_key: ENDPOINT_KEY.into(),
            csrf_cookie: CSRF_COOKIE.into(),
            csrf_header: CSRF_HEADER.into(),
        }
    }
}

impl ClientConfig {
    /// Construit la config depuis des variables `POSTS_*` (env au runtime pour
    /// le natif, `option_env!` pour le front wasm).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("POSTS_API_VARIANT") {
            cfg.variant = v.parse()?;
        }
        if let Some(v) = lookup("POSTS_STORAGE_KEY") {
            cfg.storage_key = v;
        }
        if let Some(v) = lookup("POSTS_CSRF_COOKIE") {
            cfg.csrf_cookie = v;
        }
        if let Some(v) = lookup("POSTS_CSRF_HEADER") {
            cfg.csrf_header = v;
        }
        Ok(cfg)
    }
}
