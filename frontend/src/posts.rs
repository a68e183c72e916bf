use std::rc::Rc;

use log::{debug, error};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use posts_core::models::PostCard;
use posts_core::view::PostsView;
use posts_core::{ClientConfig, Platform, PostsClient};

use crate::api::GlooTransport;
use crate::utils::{BrowserStore, DialogNotifier, DocumentCookies};

/* -------------------------------------------------------------------------- */
/*                         config (figée à la compilation)                     */
/* -------------------------------------------------------------------------- */

fn build_config() -> ClientConfig {
    let lookup = |key: &str| {
        match key {
            "POSTS_API_VARIANT" => option_env!("POSTS_API_VARIANT"),
            "POSTS_STORAGE_KEY" => option_env!("POSTS_STORAGE_KEY"),
            "POSTS_CSRF_COOKIE" => option_env!("POSTS_CSRF_COOKIE"),
            "POSTS_CSRF_HEADER" => option_env!("POSTS_CSRF_HEADER"),
            _ => None,
        }
        .map(str::to_string)
    };

    ClientConfig::from_lookup(lookup).unwrap_or_else(|e| {
        error!("{e}, falling back to defaults");
        ClientConfig::default()
    })
}

/* -------------------------------------------------------------------------- */
/*                    vue Yew branchée sur le client                           */
/* -------------------------------------------------------------------------- */

struct YewView {
    cards:    UseStateSetter<Vec<PostCard>>,
    endpoint: UseStateSetter<String>,
}

impl PostsView for YewView {
    fn show_endpoint(&self, endpoint: &str) {
        self.endpoint.set(endpoint.to_string());
    }

    fn replace_posts(&self, cards: Vec<PostCard>) {
        self.cards.set(cards);
    }
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

/// Lance une opération du client ; les erreurs sont déjà loggées / alertées.
fn run<F, Fut, T>(client: &Rc<PostsClient>, op: F)
where
    F: FnOnce(Rc<PostsClient>) -> Fut + 'static,
    Fut: std::future::Future<Output = Result<T, posts_core::ClientError>> + 'static,
{
    let client = client.clone();
    spawn_local(async move {
        if let Err(e) = op(client).await {
            debug!("operation ended with: {e}");
        }
    });
}

/* -------------------------------------------------------------------------- */
/*                             composant principal                            */
/* -------------------------------------------------------------------------- */

#[function_component(PostsPage)]
pub fn posts_page() -> Html {
    /* ---------------- states ---------------- */
    let cards    = use_state(Vec::<PostCard>::new);
    let endpoint = use_state(String::new);
    let title    = use_state(String::new);
    let content  = use_state(String::new);
    let query    = use_state(String::new);
    let editing  = use_state(|| None::<i64>);

    let client: Rc<PostsClient> = {
        let view = YewView { cards: cards.setter(), endpoint: endpoint.setter() };
        use_memo((), move |_| {
            PostsClient::new(
                build_config(),
                Platform {
                    transport: Rc::new(GlooTransport),
                    cookies:   Rc::new(DocumentCookies),
                    store:     Rc::new(BrowserStore),
                    view:      Rc::new(view),
                    notifier:  Rc::new(DialogNotifier),
                },
            )
        })
    };

    /* -------------- bootstrap (window.onload) -------------- */
    {
        let client = client.clone();
        use_effect_with((), move |_| {
            run(&client, |c| async move { c.bootstrap().await });
            || ()
        });
    }

    /* -------------- handlers -------------- */

    let on_endpoint = {
        let client   = client.clone();
        let endpoint = endpoint.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(e);
            client.set_endpoint(value.clone());
            endpoint.set(value);
        })
    };

    let on_token = {
        let client = client.clone();
        Callback::from(move |e: InputEvent| client.set_auth_token(Some(input_value(e))))
    };

    let on_title = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| title.set(input_value(e)))
    };

    let on_content = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| content.set(input_value(e)))
    };

    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| query.set(input_value(e)))
    };

    let on_load = {
        let client = client.clone();
        Callback::from(move |_: MouseEvent| {
            run(&client, |c| async move { c.render().await });
        })
    };

    let on_search = {
        let client = client.clone();
        let query  = query.clone();
        Callback::from(move |_: MouseEvent| {
            let q = (*query).clone();
            run(&client, move |c| async move { c.search(&q).await });
        })
    };

    // création, ou mise à jour si un post est en cours d'édition
    let on_submit = {
        let client  = client.clone();
        let title   = title.clone();
        let content = content.clone();
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            let t = (*title).clone();
            let c = (*content).clone();
            match *editing {
                Some(id) => {
                    editing.set(None);
                    run(&client, move |cl| async move { cl.update(id, &t, &c).await });
                }
                None => run(&client, move |cl| async move { cl.create(&t, &c).await }),
            }
        })
    };

    let on_delete = {
        let client = client.clone();
        Callback::from(move |id: i64| {
            run(&client, move |c| async move { c.delete(id).await });
        })
    };

    // pré-remplit le formulaire avec le texte affiché de la carte
    let on_edit = {
        let editing = editing.clone();
        let title   = title.clone();
        let content = content.clone();
        Callback::from(move |card: PostCard| {
            title.set(card.title.to_plain());
            content.set(card.content.to_plain());
            editing.set(Some(card.id));
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        let title   = title.clone();
        let content = content.clone();
        Callback::from(move |_: MouseEvent| {
            title.set(String::new());
            content.set(String::new());
            editing.set(None);
        })
    };

    /* ---------------------- rendu ---------------------- */
    html! {
        <div class="container">
            <h1>{ "My Blog" }</h1>

            <div class="input-row">
                <input id="api-base-url" type="text" placeholder="API base URL"
                       value={(*endpoint).clone()} oninput={on_endpoint} />
                <input id="api-token" type="password" placeholder="Token (optionnel)"
                       oninput={on_token} />
                <button onclick={on_load}>{ "Load Posts" }</button>
            </div>

            <div class="input-row">
                <input id="post-title" type="text" placeholder="Post Title"
                       value={(*title).clone()} oninput={on_title} />
                <input id="post-content" type="text" placeholder="Post Content"
                       value={(*content).clone()} oninput={on_content} />
                <button onclick={on_submit}>
                    { if editing.is_some() { "Update Post" } else { "Add Post" } }
                </button>
                {
                    if let Some(id) = *editing {
                        html! { <button onclick={on_cancel_edit}>{ format!("Cancel edit #{id}") }</button> }
                    } else {
                        Html::default()
                    }
                }
            </div>

            <div class="input-row">
                <input id="post-search" type="text" placeholder="Search"
                       value={(*query).clone()} oninput={on_query} />
                <button onclick={on_search}>{ "Search" }</button>
            </div>

            <div id="post-container">
                { for cards.iter().map(|card| {
                    let id = card.id;
                    let del = {
                        let on_delete = on_delete.clone();
                        Callback::from(move |_: MouseEvent| on_delete.emit(id))
                    };
                    let edit = {
                        let on_edit = on_edit.clone();
                        let card    = card.clone();
                        Callback::from(move |_: MouseEvent| on_edit.emit(card.clone()))
                    };
                    html! {
                        <div class="post" key={id}>
                            // SafeText : déjà échappé, injecté tel quel
                            <h2>{ Html::from_html_unchecked(AttrValue::from(card.title.to_string())) }</h2>
                            <p>{ Html::from_html_unchecked(AttrValue::from(card.content.to_string())) }</p>
                            <button onclick={del}>{ "Delete" }</button>
                            <button onclick={edit}>{ "Edit" }</button>
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}
