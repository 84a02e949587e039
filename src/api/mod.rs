//! HTTP binding for the two service operations.
//!
//! Handlers stay thin: parse the request, call the service, map the error
//! kind to a status. Everything interesting lives in `services`.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::error;

use crate::errors::SnipError;
use crate::services::{Redirector, Shortener};

#[derive(Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: String,
}

pub struct ShortenApi {}

impl ShortenApi {
    pub async fn handle_shorten(
        body: web::Json<ShortenRequest>,
        shortener: web::Data<Arc<Shortener>>,
    ) -> impl Responder {
        match shortener.shorten(&body.url).await {
            Ok(short_url) => HttpResponse::Ok()
                .insert_header(("Content-Type", "text/plain; charset=utf-8"))
                .body(short_url),
            Err(e) => error_response(e),
        }
    }
}

pub struct RedirectApi {}

impl RedirectApi {
    pub async fn handle_redirect(
        path: web::Path<String>,
        redirector: web::Data<Arc<Redirector>>,
    ) -> impl Responder {
        let short_id = path.into_inner();

        match redirector.redirect(&short_id).await {
            Ok(outcome) => HttpResponse::PermanentRedirect()
                .insert_header(("Location", outcome.long_url))
                .finish(),
            Err(e) => error_response(e),
        }
    }
}

fn error_response(err: SnipError) -> HttpResponse {
    if err.status_code().is_server_error() {
        error!("{}", err);
    }

    HttpResponse::build(err.status_code())
        .insert_header(("Content-Type", "text/plain; charset=utf-8"))
        .body(err.message().to_string())
}

/// Route registration, kept here so main and the handler tests wire the
/// same table.
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/shorten", web::post().to(ShortenApi::handle_shorten))
        .route("/{id}", web::get().to(RedirectApi::handle_redirect));
}
