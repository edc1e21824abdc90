use anyhow::Context as _;
use tracing::info;

use pokedex_bff::config::BffConfig;
use pokedex_bff::infra::catalog::HttpCatalogClient;
use pokedex_bff::infra::db;
use pokedex_bff::infra::google::GoogleIdentityProvider;
use pokedex_bff::infra::session::signing_key;
use pokedex_bff::router::build_router;
use pokedex_bff::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pokedex_core::tracing::init_tracing("info,sqlx=warn,tower_sessions=warn");

    let config = BffConfig::from_env()?;

    let db = db::connect(&config.database).await?;

    let catalog_http = reqwest::Client::builder()
        .user_agent(concat!("pokedex-bff/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build catalog http client")?;

    let state = AppState {
        db: db.clone(),
        catalog: HttpCatalogClient::new(catalog_http, config.pokeapi_base.clone()),
        google: GoogleIdentityProvider::new(&config.google)?,
        jwt_secret: config.jwt_secret.clone(),
        frontend_url: config.frontend_url.clone(),
        session_key: signing_key(&config.session_secret),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("bff listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shutting down, closing database pool");
    db.close().await.context("close database")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
