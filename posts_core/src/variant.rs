//! Les deux formes d'API déployées.
//!
//! * `Plain` : `/posts`, tableau JSON brut, ni CSRF ni alertes.
//! * `Versioned` : `/api/v1/posts`, enveloppe `{posts: [...]}`, en-tête CSRF,
//!   champs échappés avant envoi, erreurs remontées par `alert()`.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{Post, PostsPage};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVariant {
    Plain,
    #[default]
    Versioned,
}

impl ApiVariant {
    pub fn collection_path(self) -> &'static str {
        match self {
            ApiVariant::Plain => "/posts",
            ApiVariant::Versioned => "/api/v1/posts",
        }
    }

    pub fn collection_url(self, base: &str) -> String {
        format!("{base}{}", self.collection_path())
    }

    pub fn item_url(self, base: &str, id: i64) -> String {
        format!("{base}{}/{id}", self.collection_path())
    }

    pub fn search_url(self, base: &str) -> String {
        format!("{base}{}/search", self.collection_path())
    }

    /// Variante « durcie » : CSRF, échappement, alertes.
    pub fn is_hardened(self) -> bool {
        matches!(self, ApiVariant::Versioned)
    }

    pub fn search_params(self, query: &str) -> Vec<(String, String)> {
        match self {
            ApiVariant::Plain => vec![
                ("title".into(), query.into()),
                ("content".into(), query.into()),
            ],
            ApiVariant::Versioned => vec![("query".into(), query.into())],
        }
    }

    /// Décode le corps de `GET <collection>` ; renvoie aussi le total annoncé
    /// par l'API versionnée.
    pub fn decode_list(self, body: &str) -> Result<(Vec<Post>, Option<u64>), serde_json::Error> {
        match self {
            ApiVariant::Plain => Ok((serde_json::from_str(body)?, None)),
            ApiVariant::Versioned => {
                let page: PostsPage = serde_json::from_str(body)?;
                Ok((page.posts, page.total_posts))
            }
        }
    }
}

impl FromStr for ApiVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "a" | "unversioned" => Ok(ApiVariant::Plain),
            "versioned" | "b" | "v1" => Ok(ApiVariant::Versioned),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

/// Pagination / tri de `GET /api/v1/posts`. Ignoré par la variante `Plain`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page:      Option<u32>,
    pub per_page:  Option<u32>,
    pub sort:      Option<String>,
    pub direction: Option<String>,
}

impl ListQuery {
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(p) = self.page {
            out.push(("page".into(), p.to_string()));
        }
        if let Some(p) = self.per_page {
            out.push(("per_page".into(), p.to_string()));
        }
        if let Some(s) = &self.sort {
            out.push(("sort".into(), s.clone()));
        }
        if let Some(d) = &self.direction {
            out.push(("direction".into(), d.clone()));
        }
        out
    }
}
