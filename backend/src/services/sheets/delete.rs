use crate::error::Result;
use crate::services::see_other;
use crate::session::Session;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::sheet::SheetRecord;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let store = state.store.clone();
    let team = session.team().to_string();
    let removed = web::block(move || store.scoped(&team).delete::<SheetRecord>(&id)).await??;

    if let Some(sheet) = removed {
        info!("{} deleted sheet {} ({})", session.username(), sheet.name, sheet.id);
    }
    Ok(see_other("/sheets"))
}
