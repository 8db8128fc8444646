use anyhow::Context;
use dotenv::dotenv;
use std::env;
use todolist_api::{SharedData, api, app_env, build_router, db, logging, persistence};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    logging::setup_logging_and_tracing(
        logging::init_env_filter()?,
        logging::exporters_from_env()?,
    );

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("the {} environment variable must be set", app_env::DB_URL))?;
    let session_secret = env::var(app_env::SESSION_SECRET).with_context(|| {
        format!("the {} environment variable must be set", app_env::SESSION_SECRET)
    })?;
    let listen_addr =
        env::var(app_env::LISTEN_ADDR).unwrap_or_else(|_| app_env::DEFAULT_LISTEN_ADDR.to_owned());

    let pool = db::connect_sqlx(&db_url).await?;
    db::run_migrations(&pool).await?;

    let router = build_router(SharedData {
        ext_cxn: persistence::ExternalConnectivity::new(pool),
        cookie_key: api::session::cookie_key_from_secret(&session_secret)?,
    });

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("binding to {listen_addr}"))?;
    info!("Starting server on {listen_addr}.");
    axum::serve(listener, router)
        .await
        .context("serving HTTP requests")?;

    Ok(())
}
