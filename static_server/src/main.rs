mod tls;

use std::{
    env,
    path::{Path, PathBuf},
};

use actix_files::{Files, NamedFile};
use actix_web::{
    dev::{fn_service, ServiceRequest, ServiceResponse},
    middleware::Logger,
    App, HttpServer,
};
use anyhow::{bail, Context, Result};
use log::info;

/* ---------- paramètres (env / .env) ------------------------------------- */
#[derive(Debug)]
struct Settings {
    port: u16,
    dist: PathBuf,
    tls:  Option<(PathBuf, PathBuf)>,
}

impl Settings {
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("STATIC_PORT") {
            Some(p) => p.parse().context("STATIC_PORT must be a number")?,
            None => 5001,
        };

        // dossier généré par `trunk build`
        let dist = lookup("STATIC_DIST")
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../frontend/dist"));

        let tls = match (lookup("TLS_CERT"), lookup("TLS_KEY")) {
            (Some(cert), Some(key)) => Some((cert.into(), key.into())),
            (None, None) => None,
            _ => bail!("TLS_CERT and TLS_KEY must be set together"),
        };

        Ok(Self { port, dist, tls })
    }
}

/* ---------- fichiers + fallback SPA (index.html) ------------------------- */
fn spa_files(dist: &Path) -> Files {
    let index = dist.join("index.html");

    Files::new("/", dist)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(&index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}

/* ---------- main -------------------------------------------------------- */
#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info,actix_web=info");
    }
    env_logger::init();

    let settings = Settings::from_lookup(|k| env::var(k).ok())?;
    info!("Serving static files from {}", settings.dist.display());

    let dist = settings.dist.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(spa_files(&dist))
    });

    let server = match &settings.tls {
        Some((cert, key)) => {
            let cfg = tls::rustls_config(cert, key)?;
            info!("HTTPS on port {}", settings.port);
            server.bind_rustls_0_23(("0.0.0.0", settings.port), cfg)?
        }
        None => {
            info!("HTTP on port {}", settings.port);
            server.bind(("0.0.0.0", settings.port))?
        }
    };

    server.run().await?;
    Ok(())
}
