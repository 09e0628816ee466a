//! # PDF Service Module
//!
//! Routes under `/pdfs`, all of which need a logged-in session and only ever touch
//! records of the session's team.
//!
//! - `GET /pdfs`: lists the team's uploads.
//! - `POST /pdfs`: multipart upload with the file in the `pdf` field. The bytes go to
//!   the upload sink under a fresh storage key and a record is appended to the
//!   `pdfs` collection. Redirects back to `/pdfs`.
//! - `GET /pdfs/view/{filename}`: serves a stored file inline, but only when a record of
//!   the caller's team owns that storage key. Anything else is `404`.
//! - `GET /pdfs/delete/{id}`: removes the record and, best effort, its file.
//!   Deleting an id that is not there is a no-op. Redirects back to `/pdfs`.

mod delete;
mod list;
mod upload;
mod view;

use actix_web::web::{get, post, scope, ServiceConfig};

const API_PATH: &str = "/pdfs";

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        scope(API_PATH)
            .route("", get().to(list::process))
            .route("", post().to(upload::process))
            .route("/view/{filename}", get().to(view::process))
            .route("/delete/{id}", get().to(delete::process)),
    );
}
