use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snipurl::api::register_routes;
use snipurl::config::AppConfig;
use snipurl::services::{Redirector, Shortener};
use snipurl::store::StoreFactory;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    let store = StoreFactory::create(&config)
        .await
        .context("Failed to create record store")?;

    let shortener = Arc::new(Shortener::new(store.clone(), &config));
    let redirector = Arc::new(Redirector::new(store));

    let bind_address = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server at http://{}", bind_address);
    info!("Short links served under {}", config.base_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(shortener.clone()))
            .app_data(web::Data::new(redirector.clone()))
            .configure(register_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run()
    .await?;

    Ok(())
}
