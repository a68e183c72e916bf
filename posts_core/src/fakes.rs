//! Doublures de test pour les traits de plateforme.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::client::{Platform, PostsClient};
use crate::config::ClientConfig;
use crate::cookies::CookieSource;
use crate::http::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::models::PostCard;
use crate::store::MemoryStore;
use crate::variant::ApiVariant;
use crate::view::{Notifier, PostsView};

type Responder = Box<dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError>>;

/// Enregistre chaque requête ; la réponse vient d'un `responder`, ou d'un
/// oneshot à compléter à la main en mode différé.
pub struct FakeTransport {
    pub sent:  RefCell<Vec<ApiRequest>>,
    responder: RefCell<Responder>,
    deferred:  RefCell<Option<Vec<oneshot::Sender<Result<ApiResponse, TransportError>>>>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            sent:      RefCell::new(Vec::new()),
            responder: RefCell::new(Box::new(|_| Ok(ApiResponse::new(200, "[]")))),
            deferred:  RefCell::new(None),
        }
    }
}

impl FakeTransport {
    pub fn respond_with<F>(&self, f: F)
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + 'static,
    {
        *self.responder.borrow_mut() = Box::new(f);
    }

    pub fn defer(&self) {
        *self.deferred.borrow_mut() = Some(Vec::new());
    }

    /// Complète la `index`-ième requête différée.
    pub fn resolve(&self, index: usize, response: ApiResponse) {
        let sender = {
            let mut pending = self.deferred.borrow_mut();
            let pending = pending.as_mut().expect("transport not deferred");
            std::mem::replace(&mut pending[index], oneshot::channel().0)
        };
        let _ = sender.send(Ok(response));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub fn methods(&self) -> Vec<Method> {
        self.sent.borrow().iter().map(|r| r.method).collect()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        self.sent.borrow_mut().push(request.clone());

        if let Some(pending) = self.deferred.borrow_mut().as_mut() {
            let (tx, rx) = oneshot::channel();
            pending.push(tx);
            return rx
                .map(|r| r.unwrap_or_else(|_| Err(TransportError("dropped".into()))))
                .boxed_local();
        }

        let responder = self.responder.borrow();
        future::ready(responder(&request)).boxed_local()
    }
}

#[derive(Default)]
pub struct FakeCookies(pub RefCell<Option<String>>);

impl FakeCookies {
    pub fn set(&self, cookies: &str) {
        *self.0.borrow_mut() = Some(cookies.to_string());
    }
}

impl CookieSource for FakeCookies {
    fn cookie_string(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

#[derive(Default)]
pub struct FakeView {
    pub endpoints: RefCell<Vec<String>>,
    pub renders:   RefCell<Vec<Vec<PostCard>>>,
}

impl FakeView {
    pub fn current(&self) -> Option<Vec<PostCard>> {
        self.renders.borrow().last().cloned()
    }
}

impl PostsView for FakeView {
    fn show_endpoint(&self, endpoint: &str) {
        self.endpoints.borrow_mut().push(endpoint.to_string());
    }

    fn replace_posts(&self, cards: Vec<PostCard>) {
        self.renders.borrow_mut().push(cards);
    }
}

#[derive(Default)]
pub struct FakeNotifier(pub RefCell<Vec<String>>);

impl FakeNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Notifier for FakeNotifier {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct Harness {
    pub transport: Rc<FakeTransport>,
    pub cookies:   Rc<FakeCookies>,
    pub store:     Rc<MemoryStore>,
    pub view:      Rc<FakeView>,
    pub notifier:  Rc<FakeNotifier>,
}

impl Harness {
    pub fn client(&self, variant: ApiVariant) -> PostsClient {
        let config = ClientConfig { variant, ..ClientConfig::default() };
        PostsClient::new(
            config,
            Platform {
                transport: self.transport.clone(),
                cookies:   self.cookies.clone(),
                store:     self.store.clone(),
                view:      self.view.clone(),
                notifier:  self.notifier.clone(),
            },
        )
    }
}

/* -------------------------------------------------------------------------- */
/*                             capture des logs                               */
/* -------------------------------------------------------------------------- */

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger global qui range chaque ligne dans le thread qui l'a émise : les
/// tests tournent en parallèle sans se voir.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|c| c.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

pub fn capture_logs() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
}

pub fn captured(level: Level) -> Vec<String> {
    CAPTURED.with(|c| {
        c.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    })
}
