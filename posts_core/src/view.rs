//! Ce que le client pilote côté UI : champ d'URL, conteneur des posts,
//! alertes bloquantes. Plus le séquencement des rendus.

use std::cell::Cell;

use log::warn;

use crate::models::PostCard;

pub trait PostsView {
    /// Remplit le champ « URL de l'API ».
    fn show_endpoint(&self, endpoint: &str);
    /// Remplace *tout* le contenu du conteneur.
    fn replace_posts(&self, cards: Vec<PostCard>);
}

/// Canal d'alerte bloquante (`window.alert` dans le navigateur).
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Pas d'UI : l'alerte finit dans les logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        warn!("ALERT: {message}");
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Empty,
    Loading,
    Rendered,
    /// Dernier chargement en échec, contenu précédent conservé.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// Numérote les rendus ; seule la réponse du dernier ticket émis a le droit
/// de toucher au conteneur.
#[derive(Debug, Default)]
pub struct RenderSequencer {
    issued: Cell<u64>,
}

impl RenderSequencer {
    pub fn issue(&self) -> RenderTicket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        RenderTicket(next)
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.0 == self.issued.get()
    }
}
