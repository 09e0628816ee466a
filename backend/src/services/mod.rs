//! HTTP services.
//!
//! Each area registers its own routes through a `configure_routes` function; this
//! module stitches them together with the health check and the embedded static
//! assets, which answer every path no other route claims.

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod pdfs;
pub mod sheets;

use actix_web::http::header::LOCATION;
use actix_web::web::{self, get, ServiceConfig};
use actix_web::HttpResponse;
use chrono::Local;

/// Registers every route of the application.
pub fn configure(cfg: &mut ServiceConfig) {
    auth::configure_routes(cfg);
    dashboard::configure_routes(cfg);
    pdfs::configure_routes(cfg);
    sheets::configure_routes(cfg);
    cfg.route("/health", get().to(|| async { "OK" }))
        .default_service(web::route().to(assets::serve_embedded));
}

/// `303 See Other`, so a browser follows a form POST with a GET.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Record timestamps, in local time as `dd-mm-YYYY HH:MM`.
pub(crate) fn timestamp() -> String {
    Local::now().format("%d-%m-%Y %H:%M").to_string()
}

/// A trimmed form value, or `None` when it is missing or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
