//! Stockage persistant de l'URL de base (`localStorage` côté navigateur).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const ENDPOINT_KEY: &str = "apiBaseUrl";

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Store en mémoire (playground natif, tests).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// Une seule clé, une seule valeur : l'URL saisie par l'utilisateur, sans
/// validation.
#[derive(Clone)]
pub struct EndpointStore {
    store: Rc<dyn KvStore>,
    key:   String,
}

impl EndpointStore {
    pub fn new(store: Rc<dyn KvStore>, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    /// `None` si rien n'a été enregistré ou si la valeur est vide.
    pub fn load(&self) -> Option<String> {
        self.store.get(&self.key).filter(|v| !v.is_empty())
    }

    pub fn save(&self, endpoint: &str) {
        self.store.set(&self.key, endpoint);
    }
}
