use super::list;
use crate::error::Result;
use crate::services::{non_blank, see_other, timestamp};
use crate::session::Session;
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::model::sheet::SheetRecord;
use common::requests::SheetForm;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    session: Session,
    payload: web::Form<SheetForm>,
) -> Result<HttpResponse> {
    let SheetForm { name, url } = payload.into_inner();
    let (Some(name), Some(url)) = (non_blank(name), non_blank(url)) else {
        return list::render(
            &state,
            &session,
            StatusCode::BAD_REQUEST,
            Some("Both a name and a URL are required"),
        )
        .await;
    };
    if let Err(e) = super::validate_url(&url) {
        return list::render(&state, &session, StatusCode::BAD_REQUEST, Some(&e.to_string())).await;
    }

    let store = state.store.clone();
    let team = session.team().to_string();
    let record = web::block(move || {
        store.scoped(&team).append(SheetRecord {
            id: String::new(),
            name,
            url,
            created_at: timestamp(),
            team: team.clone(),
        })
    })
    .await??;

    info!("{} added sheet {} ({})", session.username(), record.name, record.id);
    Ok(see_other("/sheets"))
}
