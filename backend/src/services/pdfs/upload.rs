use super::list;
use crate::error::{AppError, Result};
use crate::services::{see_other, timestamp};
use crate::session::Session;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use common::model::pdf::PdfRecord;
use futures_util::StreamExt;
use log::info;

/// Name of the multipart field carrying the file.
const FILE_FIELD: &str = "pdf";

pub async fn process(
    state: web::Data<AppState>,
    session: Session,
    payload: Multipart,
) -> Result<HttpResponse> {
    let (original_name, bytes) = match read_upload(payload).await {
        Ok(upload) => upload,
        Err(AppError::Validation(message)) => {
            return list::render(&state, &session, StatusCode::BAD_REQUEST, Some(&message)).await
        }
        Err(e) => return Err(e),
    };

    let store = state.store.clone();
    let uploads = state.uploads.clone();
    let team = session.team().to_string();
    let record = web::block(move || -> Result<PdfRecord> {
        let key = uploads.store(&original_name, &bytes)?;
        let record = PdfRecord {
            id: String::new(),
            original_name,
            filename: key.clone(),
            uploaded_at: timestamp(),
            team: team.clone(),
        };
        store.scoped(&team).append(record).inspect_err(|_| {
            // Without a record nothing could ever reach or remove the file.
            uploads.delete(&key);
        })
    })
    .await??;

    info!(
        "{} uploaded {} as {}",
        session.username(),
        record.original_name,
        record.filename
    );
    Ok(see_other("/pdfs"))
}

/// Pulls the `pdf` field out of the multipart stream. Other fields are skipped.
async fn read_upload(mut payload: Multipart) -> Result<(String, Vec<u8>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(AppError::multipart)?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if field_name.as_deref() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            bytes.extend_from_slice(&chunk.map_err(AppError::multipart)?);
        }
        upload = Some((filename, bytes));
    }

    match upload {
        Some((filename, bytes)) if !filename.trim().is_empty() => Ok((filename, bytes)),
        _ => Err(AppError::validation("Choose a PDF file to upload")),
    }
}
