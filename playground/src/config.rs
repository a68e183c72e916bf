use std::env;

use anyhow::{Context, Result};

use posts_core::auth::DEFAULT_REGISTER_URL;
use posts_core::ClientConfig;

#[derive(Debug)]
pub struct PlaygroundConfig {
    pub client:          ClientConfig,
    pub register_url:    String,
    pub login_url:       Option<String>,
    pub username:        String,
    pub password:        String,
    /// Chaîne façon `document.cookie`, prioritaire sur `csrf_source_url`.
    pub cookies:         Option<String>,
    pub csrf_source_url: Option<String>,
    pub posts_base_url:  Option<String>,
}

impl PlaygroundConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = ClientConfig::from_lookup(&lookup).context("invalid POSTS_* configuration")?;
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            client,
            register_url:    non_empty("REGISTER_URL").unwrap_or_else(|| DEFAULT_REGISTER_URL.into()),
            login_url:       non_empty("LOGIN_URL"),
            username:        non_empty("REGISTER_USERNAME").unwrap_or_else(|| "siggi".into()),
            password:        non_empty("REGISTER_PASSWORD").unwrap_or_else(|| "12345".into()),
            cookies:         non_empty("CSRF_COOKIES"),
            csrf_source_url: non_empty("CSRF_SOURCE_URL"),
            posts_base_url:  non_empty("POSTS_BASE_URL"),
        })
    }
}
