use crate::error::{AppError, Result};
use crate::session::Session;
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::model::pdf::PdfRecord;
use mime_guess::from_path;

/// Sends the stored file inline so the browser opens it in place. The original
/// filename is offered for saving.
pub async fn process(
    state: web::Data<AppState>,
    session: Session,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    let key = filename.into_inner();
    let store = state.store.clone();
    let uploads = state.uploads.clone();
    let team = session.team().to_string();

    let (record, bytes) = web::block(move || -> Result<_> {
        let record = store
            .scoped(&team)
            .find_where(|p: &PdfRecord| p.filename == key)?
            .ok_or_else(|| AppError::not_found(format!("file {}", key)))?;
        let bytes = uploads.retrieve(&record.filename)?;
        Ok((record, bytes))
    })
    .await??;

    let mime = from_path(&record.original_name).first_or(mime_guess::mime::APPLICATION_PDF);
    Ok(HttpResponse::Ok()
        .content_type(mime.as_ref())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Inline,
            parameters: vec![DispositionParam::Filename(record.original_name)],
        })
        .body(bytes))
}
