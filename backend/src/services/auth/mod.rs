//! # Authentication Service Module
//!
//! - `GET /login`: the login form. An already logged-in browser is sent to `/`.
//! - `POST /login`: checks `username` and `password` against the user directory. On
//!   success a session is opened, its signed cookie set, and the browser redirected
//!   to `/`. On failure the form is shown again with an error and no cookie is set.
//! - `GET /logout`: drops the session, clears the cookie and redirects to `/login`.

mod login;
mod logout;

use actix_web::web::{get, post, resource, ServiceConfig};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/login")
            .route(get().to(login::form))
            .route(post().to(login::process)),
    )
    .service(resource("/logout").route(get().to(logout::process)));
}
