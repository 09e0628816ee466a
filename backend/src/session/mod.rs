//! # Session Context
//!
//! A logged-in browser carries a random session id in a cookie signed with the
//! configured secret. The id points into the server-side table in [`state`], which
//! knows the user and team and when the session expires.
//!
//! Handlers that need a logged-in user take a [`Session`] argument. When the cookie
//! is missing, tampered with, or points at an expired or unknown session, extraction
//! fails with `AppError::Unauthorized`, which answers with a redirect to `/login`.

pub mod state;

use crate::error::AppError;
use crate::state::AppState;
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header::LOCATION;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use common::model::user::Identity;
use futures_util::future::LocalBoxFuture;

pub const SESSION_COOKIE: &str = "teamdocs_session";

/// The authenticated identity of the current request.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub identity: Identity,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.identity.username
    }

    pub fn team(&self) -> &str {
        &self.identity.team
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let cookie = req.cookie(SESSION_COOKIE);
        Box::pin(async move {
            let state = state.ok_or(AppError::Unauthorized)?;
            let id = cookie
                .and_then(|c| verified_session_id(&state.cookie_key, c))
                .ok_or(AppError::Unauthorized)?;
            let identity = state
                .sessions
                .get(&id)
                .await
                .ok_or(AppError::Unauthorized)?;
            Ok(Session { id, identity })
        })
    }
}

fn verified_session_id(key: &Key, cookie: Cookie<'static>) -> Option<String> {
    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    jar.signed(key)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

/// A `303 See Other` to `location` that also hands the browser the signed cookie for
/// `session_id`.
pub fn redirect_with_session(state: &AppState, session_id: &str, location: &str) -> HttpResponse {
    let cookie = Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(CookieDuration::seconds(state.sessions.ttl().num_seconds()))
        .finish();
    let mut jar = CookieJar::new();
    jar.signed_mut(&state.cookie_key).add(cookie);

    let mut response = HttpResponse::SeeOther();
    response.insert_header((LOCATION, location));
    for signed in jar.delta() {
        response.cookie(signed.clone());
    }
    response.finish()
}

/// A cookie that makes the browser forget its session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
