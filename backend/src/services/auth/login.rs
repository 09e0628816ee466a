use crate::error::Result;
use crate::services::{non_blank, see_other};
use crate::session::{redirect_with_session, Session};
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::requests::LoginForm;
use log::info;
use minijinja::context;

pub async fn form(state: web::Data<AppState>, session: Option<Session>) -> Result<HttpResponse> {
    if session.is_some() {
        return Ok(see_other("/"));
    }
    state.views.page("login.html", context! {})
}

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let LoginForm { username, password } = payload.into_inner();
    let (Some(username), Some(password)) = (non_blank(username), password.filter(|p| !p.is_empty()))
    else {
        return state.views.page_with_status(
            StatusCode::BAD_REQUEST,
            "login.html",
            context! { error => "Username and password are required" },
        );
    };

    let users = state.users.clone();
    let candidate = username.clone();
    let identity = web::block(move || users.authenticate(&candidate, &password)).await??;

    match identity {
        Some(identity) => {
            info!("{} logged in (team {})", identity.username, identity.team);
            let session_id = state.sessions.create(identity).await;
            Ok(redirect_with_session(&state, &session_id, "/"))
        }
        None => {
            info!("failed login for {}", username);
            state.views.page_with_status(
                StatusCode::UNAUTHORIZED,
                "login.html",
                context! { error => "Invalid credentials", username_value => username },
            )
        }
    }
}
