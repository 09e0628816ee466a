use crate::error::Result;
use crate::services::see_other;
use crate::session::Session;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::pdf::PdfRecord;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    session: Session,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    let store = state.store.clone();
    let uploads = state.uploads.clone();
    let team = session.team().to_string();

    let removed = web::block(move || -> Result<Option<PdfRecord>> {
        let removed = store.scoped(&team).delete::<PdfRecord>(&id)?;
        if let Some(pdf) = &removed {
            uploads.delete(&pdf.filename);
        }
        Ok(removed)
    })
    .await??;

    if let Some(pdf) = removed {
        info!("{} deleted {} ({})", session.username(), pdf.original_name, pdf.id);
    }
    Ok(see_other("/pdfs"))
}
