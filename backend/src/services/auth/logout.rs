use crate::session::{removal_cookie, Session};
use crate::state::AppState;
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use log::info;

/// Logs out unconditionally: with or without a live session the cookie is cleared.
pub async fn process(state: web::Data<AppState>, session: Option<Session>) -> HttpResponse {
    if let Some(session) = session {
        state.sessions.remove(&session.id).await;
        info!("{} logged out", session.username());
    }
    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/login"))
        .cookie(removal_cookie())
        .finish()
}
