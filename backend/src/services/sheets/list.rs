use crate::error::Result;
use crate::session::Session;
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::model::sheet::SheetRecord;
use minijinja::context;

pub async fn process(state: web::Data<AppState>, session: Session) -> Result<HttpResponse> {
    render(&state, &session, StatusCode::OK, None).await
}

pub(super) async fn render(
    state: &AppState,
    session: &Session,
    status: StatusCode,
    error: Option<&str>,
) -> Result<HttpResponse> {
    let store = state.store.clone();
    let team = session.team().to_string();
    let sheets = web::block(move || store.scoped(&team).list::<SheetRecord>()).await??;

    state.views.page_with_status(
        status,
        "sheets.html",
        context! {
            team => session.team(),
            username => session.username(),
            sheets,
            error,
        },
    )
}
