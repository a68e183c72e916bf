//! Client de l'API « posts » de myblog, indépendant de la plateforme.
//!
//! Le front Yew et le playground natif branchent leurs propres effets
//! (HTTP, cookies, stockage, affichage, alertes) via [`client::Platform`].

pub mod auth;
pub mod client;
pub mod config;
pub mod cookies;
pub mod error;
pub mod http;
pub mod models;
pub mod store;
pub mod text;
pub mod variant;
pub mod view;

#[cfg(test)]
mod fakes;

pub use client::{Platform, PostsClient, RenderOutcome};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use variant::{ApiVariant, ListQuery};
