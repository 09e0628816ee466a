use crate::error::Result;
use crate::session::Session;
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::model::pdf::PdfRecord;
use minijinja::context;

pub async fn process(state: web::Data<AppState>, session: Session) -> Result<HttpResponse> {
    render(&state, &session, StatusCode::OK, None).await
}

/// Renders the team's PDF list, optionally with an error above the upload form.
pub(super) async fn render(
    state: &AppState,
    session: &Session,
    status: StatusCode,
    error: Option<&str>,
) -> Result<HttpResponse> {
    let store = state.store.clone();
    let team = session.team().to_string();
    let pdfs = web::block(move || store.scoped(&team).list::<PdfRecord>()).await??;

    state.views.page_with_status(
        status,
        "pdfs.html",
        context! {
            team => session.team(),
            username => session.username(),
            pdfs,
            error,
        },
    )
}
