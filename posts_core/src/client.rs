//! Contexte client : URL de base, état d'affichage, et les opérations
//! lister / créer / modifier / supprimer / rechercher.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::cookies::{csrf_token, CookieSource};
use crate::error::{ClientError, EMPTY_FIELDS_MESSAGE};
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::models::{NewPost, Post, PostCard, PostPatch};
use crate::store::{EndpointStore, KvStore};
use crate::text::SafeText;
use crate::variant::ListQuery;
use crate::view::{Notifier, PostsView, RenderSequencer, ViewState};

/// Effets de bord fournis par la plateforme (navigateur, natif, tests).
pub struct Platform {
    pub transport: Rc<dyn Transport>,
    pub cookies:   Rc<dyn CookieSource>,
    pub store:     Rc<dyn KvStore>,
    pub view:      Rc<dyn PostsView>,
    pub notifier:  Rc<dyn Notifier>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { shown: usize, total: Option<u64> },
    /// Un rendu plus récent a été lancé entre-temps : réponse ignorée.
    Superseded,
}

#[derive(Clone, Copy)]
enum ListShape {
    Collection,
    Array,
}

pub struct PostsClient {
    config:      ClientConfig,
    transport:   Rc<dyn Transport>,
    cookies:     Rc<dyn CookieSource>,
    view:        Rc<dyn PostsView>,
    notifier:    Rc<dyn Notifier>,
    endpoints:   EndpointStore,
    endpoint:    RefCell<String>,
    auth_token:  RefCell<Option<String>>,
    list_query:  RefCell<ListQuery>,
    sequencer:   RenderSequencer,
    state:       Cell<ViewState>,
    has_content: Cell<bool>,
}

impl PostsClient {
    pub fn new(config: ClientConfig, platform: Platform) -> Self {
        let endpoints = EndpointStore::new(platform.store, config.storage_key.clone());
        Self {
            config,
            transport:   platform.transport,
            cookies:     platform.cookies,
            view:        platform.view,
            notifier:    platform.notifier,
            endpoints,
            endpoint:    RefCell::new(String::new()),
            auth_token:  RefCell::new(None),
            list_query:  RefCell::new(ListQuery::default()),
            sequencer:   RenderSequencer::default(),
            state:       Cell::new(ViewState::Empty),
            has_content: Cell::new(false),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.borrow().clone()
    }

    /// Saisie utilisateur ; persistée seulement au prochain rendu.
    pub fn set_endpoint(&self, endpoint: impl Into<String>) {
        *self.endpoint.borrow_mut() = endpoint.into();
    }

    pub fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.borrow_mut() = token.filter(|t| !t.is_empty());
    }

    pub fn set_list_query(&self, query: ListQuery) {
        *self.list_query.borrow_mut() = query;
    }

    pub fn state(&self) -> ViewState {
        self.state.get()
    }

    /* ---------------------------------------------------------------------- */
    /*                               bootstrap                                */
    /* ---------------------------------------------------------------------- */

    /// Au chargement de la page : URL enregistrée → champ rempli + premier
    /// rendu. Sinon rien, aucune requête.
    pub async fn bootstrap(&self) -> Result<Option<RenderOutcome>, ClientError> {
        let Some(saved) = self.endpoints.load() else {
            debug!("no saved endpoint, waiting for user input");
            return Ok(None);
        };

        self.set_endpoint(saved.clone());
        self.view.show_endpoint(&saved);
        self.render().await.map(Some)
    }

    /* ---------------------------------------------------------------------- */
    /*                                lecture                                 */
    /* ---------------------------------------------------------------------- */

    pub async fn render(&self) -> Result<RenderOutcome, ClientError> {
        let base = self.endpoint();
        self.endpoints.save(&base);

        let variant = self.config.variant;
        let mut request = ApiRequest::get(variant.collection_url(&base));
        if variant.is_hardened() {
            for (k, v) in self.list_query.borrow().pairs() {
                request = request.query(k, v);
            }
        }

        self.show(request, ListShape::Collection, "Failed to fetch posts.", "Error loading posts")
            .await
    }

    pub async fn search(&self, query: &str) -> Result<RenderOutcome, ClientError> {
        let base    = self.endpoint();
        let variant = self.config.variant;

        let mut request = ApiRequest::get(variant.search_url(&base));
        for (k, v) in variant.search_params(query) {
            request = request.query(k, v);
        }

        self.show(request, ListShape::Array, "Failed to search posts.", "Error searching posts")
            .await
    }

    async fn show(
        &self,
        request: ApiRequest,
        shape: ListShape,
        failure: &'static str,
        context: &str,
    ) -> Result<RenderOutcome, ClientError> {
        let ticket = self.sequencer.issue();
        self.state.set(ViewState::Loading);

        let result = match self.execute(request, failure).await {
            Ok(resp) => self.decode_list(&resp, shape),
            Err(e) => Err(e),
        };

        match result {
            Ok((posts, total)) => {
                if !self.sequencer.is_current(ticket) {
                    debug!("discarding response of superseded render {ticket:?}");
                    return Ok(RenderOutcome::Superseded);
                }

                // le conteneur n'est vidé qu'une fois la réponse validée
                let cards: Vec<PostCard> = posts.iter().map(PostCard::from).collect();
                let shown = cards.len();
                self.view.replace_posts(cards);
                self.has_content.set(true);
                self.state.set(ViewState::Rendered);

                Ok(RenderOutcome::Rendered { shown, total })
            }
            Err(e) => {
                // échec d'un rendu périmé : journalisé, jamais alerté
                if !self.sequencer.is_current(ticket) {
                    error!("{context} (superseded render {ticket:?}): {e}");
                    return Ok(RenderOutcome::Superseded);
                }

                self.state.set(if self.has_content.get() {
                    ViewState::Stale
                } else {
                    ViewState::Empty
                });
                self.report(context, &e);
                Err(e)
            }
        }
    }

    fn decode_list(
        &self,
        resp: &ApiResponse,
        shape: ListShape,
    ) -> Result<(Vec<Post>, Option<u64>), ClientError> {
        match shape {
            ListShape::Collection => self.config.variant.decode_list(&resp.body),
            ListShape::Array => serde_json::from_str(&resp.body).map(|posts| (posts, None)),
        }
        .map_err(ClientError::Decode)
    }

    /* ---------------------------------------------------------------------- */
    /*                               mutations                                */
    /* ---------------------------------------------------------------------- */

    pub async fn create(&self, title: &str, content: &str) -> Result<Post, ClientError> {
        if title.is_empty() || content.is_empty() {
            self.notifier.alert(EMPTY_FIELDS_MESSAGE);
            return Err(ClientError::EmptyFields);
        }

        let body = NewPost {
            title:   self.outgoing(title),
            content: self.outgoing(content),
        };
        let url = self.config.variant.collection_url(&self.endpoint());

        let result: Result<Post, ClientError> = async {
            let request  = self.protect(ApiRequest::post(url).json(&body)?);
            let response = self.execute(request, "Failed to add post.").await?;
            serde_json::from_str::<Post>(&response.body).map_err(ClientError::Decode)
        }
        .await;

        match result {
            Ok(post) => {
                info!("Post added: {post:?}");
                self.refresh().await;
                Ok(post)
            }
            Err(e) => {
                self.report("Error adding post", &e);
                Err(e)
            }
        }
    }

    /// Pas de confirmation : la suppression part directement.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let url     = self.config.variant.item_url(&self.endpoint(), id);
        let request = self.protect(ApiRequest::delete(url));

        match self.execute(request, "Failed to delete post.").await {
            Ok(_) => {
                info!("Post deleted: {id}");
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.report("Error deleting post", &e);
                Err(e)
            }
        }
    }

    /// Champs vides = non modifiés ; les deux vides → rejet local.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<Post, ClientError> {
        if title.is_empty() && content.is_empty() {
            self.notifier.alert(EMPTY_FIELDS_MESSAGE);
            return Err(ClientError::EmptyFields);
        }

        let patch = PostPatch {
            title:   (!title.is_empty()).then(|| self.outgoing(title)),
            content: (!content.is_empty()).then(|| self.outgoing(content)),
        };
        let url = self.config.variant.item_url(&self.endpoint(), id);

        let result: Result<Post, ClientError> = async {
            let request  = self.protect(ApiRequest::put(url).json(&patch)?);
            let response = self.execute(request, "Failed to update post.").await?;
            serde_json::from_str::<Post>(&response.body).map_err(ClientError::Decode)
        }
        .await;

        match result {
            Ok(post) => {
                info!("Post updated: {post:?}");
                self.refresh().await;
                Ok(post)
            }
            Err(e) => {
                self.report("Error updating post", &e);
                Err(e)
            }
        }
    }

    /* ---------------------------------------------------------------------- */
    /*                                helpers                                 */
    /* ---------------------------------------------------------------------- */

    async fn refresh(&self) {
        // déjà loggé / alerté par `show`
        if let Err(e) = self.render().await {
            debug!("re-render after mutation failed: {e}");
        }
    }

    async fn execute(
        &self,
        request: ApiRequest,
        failure: &'static str,
    ) -> Result<ApiResponse, ClientError> {
        debug!("{} {}", request.method.as_str(), request.url);

        match self.transport.send(request).await {
            Ok(resp) if resp.ok() => Ok(resp),
            Ok(resp) => {
                debug!("HTTP {} : {}", resp.status, resp.body);
                Err(ClientError::RequestFailed(failure))
            }
            Err(e) => {
                debug!("transport: {e}");
                Err(ClientError::RequestFailed(failure))
            }
        }
    }

    /// En-têtes des requêtes mutantes : CSRF relu à chaque appel, jeton
    /// d'auth éventuel.
    fn protect(&self, mut request: ApiRequest) -> ApiRequest {
        if !self.config.variant.is_hardened() {
            return request;
        }

        match csrf_token(self.cookies.as_ref(), &self.config.csrf_cookie) {
            Some(token) => request = request.header(self.config.csrf_header.clone(), token),
            None => warn!(
                "no `{}` cookie, sending {} {} without CSRF header",
                self.config.csrf_cookie,
                request.method.as_str(),
                request.url
            ),
        }

        if let Some(token) = self.auth_token.borrow().as_deref() {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    fn outgoing(&self, raw: &str) -> String {
        if self.config.variant.is_hardened() {
            SafeText::escape(raw).into_string()
        } else {
            raw.to_string()
        }
    }

    fn report(&self, context: &str, err: &ClientError) {
        error!("{context}: {err}");
        if self.config.variant.is_hardened() {
            self.notifier.alert(&format!("{context}: {err}"));
        }
    }
}
