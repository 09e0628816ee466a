use super::validate_url;
use crate::error::Result;
use crate::services::{non_blank, see_other};
use crate::session::Session;
use crate::state::AppState;
use crate::store::SheetPatch;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::model::sheet::SheetRecord;
use common::requests::SheetEditForm;
use log::info;
use minijinja::context;

pub async fn form(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    render(&state, &session, id.into_inner(), StatusCode::OK, None).await
}

pub async fn process(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<String>,
    payload: web::Form<SheetEditForm>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let SheetEditForm { name, url } = payload.into_inner();
    let patch = SheetPatch {
        name: non_blank(name),
        url: non_blank(url),
    };

    let rejection = if patch.is_empty() {
        Some("Provide a new name or URL".to_string())
    } else {
        patch
            .url
            .as_deref()
            .and_then(|url| validate_url(url).err())
            .map(|e| e.to_string())
    };
    if let Some(message) = rejection {
        return render(&state, &session, id, StatusCode::BAD_REQUEST, Some(&message)).await;
    }

    let store = state.store.clone();
    let team = session.team().to_string();
    let updated =
        web::block(move || store.scoped(&team).replace_fields::<SheetRecord, _>(&id, patch))
            .await??;

    info!("{} updated sheet {}", session.username(), updated.id);
    Ok(see_other("/sheets"))
}

/// The edit form for one of the team's sheets. Another team's id is `404`.
async fn render(
    state: &AppState,
    session: &Session,
    id: String,
    status: StatusCode,
    error: Option<&str>,
) -> Result<HttpResponse> {
    let store = state.store.clone();
    let team = session.team().to_string();
    let sheet = web::block(move || store.scoped(&team).find::<SheetRecord>(&id)).await??;

    state.views.page_with_status(
        status,
        "edit_sheet.html",
        context! {
            title => "Edit Sheet",
            team => session.team(),
            username => session.username(),
            sheet,
            error,
        },
    )
}
