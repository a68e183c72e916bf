mod config;
mod logger;
mod transport;

use std::env;
use std::rc::Rc;

use anyhow::{bail, Result};
use futures::executor::block_on;
use log::info;

use posts_core::auth::{self, CsrfNames};
use posts_core::cookies::StaticCookies;
use posts_core::models::{Credentials, PostCard};
use posts_core::store::MemoryStore;
use posts_core::view::{LogNotifier, PostsView};
use posts_core::{Platform, PostsClient};

use crate::config::PlaygroundConfig;
use crate::transport::BlockingTransport;

/// Sortie texte du « conteneur » de posts.
struct StdoutView;

impl PostsView for StdoutView {
    fn show_endpoint(&self, endpoint: &str) {
        println!("api-base-url = {endpoint}");
    }

    fn replace_posts(&self, cards: Vec<PostCard>) {
        println!("--- {} post(s) ---", cards.len());
        for card in cards {
            println!("[{}] {}\n    {}", card.id, card.title, card.content);
        }
    }
}

fn cookie_jar(cfg: &PlaygroundConfig, transport: &BlockingTransport) -> Result<StaticCookies> {
    let cookies = match (&cfg.cookies, &cfg.csrf_source_url) {
        (Some(raw), _) => {
            transport.set_cookies(raw.clone());
            Some(raw.clone())
        }
        (None, Some(url)) => Some(transport.prime_cookies(url)?),
        (None, None) => None,
    };
    Ok(StaticCookies(cookies))
}

/* ---------- POST /register (+ login éventuel) --------------------------- */
fn run_register(cfg: &PlaygroundConfig) -> Result<()> {
    let transport = BlockingTransport::new()?;
    let jar       = cookie_jar(cfg, &transport)?;
    let csrf      = CsrfNames { cookie: &cfg.client.csrf_cookie, header: &cfg.client.csrf_header };
    let creds     = Credentials { username: cfg.username.clone(), password: cfg.password.clone() };

    let data = block_on(auth::register(&transport, &jar, csrf, &cfg.register_url, &creds))?;
    println!("{data}");

    if let Some(login_url) = &cfg.login_url {
        let token = block_on(auth::login(&transport, &jar, csrf, login_url, &creds))?;
        println!("token: {token}");
    }
    Ok(())
}

/* ---------- page posts simulée : bootstrap depuis un store pré-rempli ---- */
fn run_posts(cfg: &PlaygroundConfig) -> Result<()> {
    let Some(base) = &cfg.posts_base_url else {
        bail!("POSTS_BASE_URL is required for the `posts` mode");
    };

    let transport = BlockingTransport::new()?;
    let jar       = cookie_jar(cfg, &transport)?;
    let store     = MemoryStore::with_entry(&cfg.client.storage_key, base);

    let client = PostsClient::new(
        cfg.client.clone(),
        Platform {
            transport: Rc::new(transport),
            cookies:   Rc::new(jar),
            store:     Rc::new(store),
            view:      Rc::new(StdoutView),
            notifier:  Rc::new(LogNotifier),
        },
    );

    let outcome = block_on(client.bootstrap())?;
    info!("bootstrap: {outcome:?}");
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init();

    let cfg  = PlaygroundConfig::from_env()?;
    let mode = env::args().nth(1).unwrap_or_else(|| "register".into());

    match mode.as_str() {
        "register" => run_register(&cfg),
        "posts" => run_posts(&cfg),
        other => bail!("unknown mode `{other}` (expected `register` or `posts`)"),
    }
}
