//! # Sheet Link Service Module
//!
//! Routes under `/sheets`, scoped to the session's team like the PDF routes.
//!
//! - `GET /sheets`: lists the team's sheet links.
//! - `POST /sheets`: form fields `name` and `url`, both required. Appends a record.
//!   The URL must be an absolute `http` or `https` link, since it ends up as a
//!   clickable anchor on the team's list.
//! - `GET /sheets/edit/{id}`: the edit form, `404` when the id is not the team's.
//! - `POST /sheets/edit/{id}`: form fields `name` and `url`; only supplied, non-blank
//!   fields are changed.
//! - `GET /sheets/delete/{id}`: removes the record; a missing id is a no-op.

mod create;
mod delete;
mod edit;
mod list;

use crate::error::{AppError, Result};
use actix_web::web::{get, post, scope, ServiceConfig};
use url::Url;

const API_PATH: &str = "/sheets";

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope(API_PATH)
            .route("", get().to(list::process))
            .route("", post().to(create::process))
            .route("/edit/{id}", get().to(edit::form))
            .route("/edit/{id}", post().to(edit::process))
            .route("/delete/{id}", get().to(delete::process)),
    );
}

/// Only `http` and `https` links with a host are accepted.
fn validate_url(raw: &str) -> Result<()> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(AppError::validation(
            "Sheet links must start with http:// or https://",
        )),
    }
}
