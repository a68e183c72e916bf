use thiserror::Error;

pub const EMPTY_FIELDS_MESSAGE: &str = "Title and content cannot be empty!";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Statut HTTP hors 2xx *ou* échec réseau : l'appelant ne distingue pas
    /// les deux, seul le message littéral remonte.
    #[error("{0}")]
    RequestFailed(&'static str),

    #[error("{}", EMPTY_FIELDS_MESSAGE)]
    EmptyFields,

    #[error("invalid JSON response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown API variant `{0}` (expected `plain` or `versioned`)")]
    UnknownVariant(String),
}
