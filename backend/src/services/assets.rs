use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Serves a file compiled in from `backend/static/`, or `404 Not Found`.
pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let file_path = req.path().trim_start_matches('/');

    match STATIC_DIR.get_file(file_path) {
        Some(file) if !file_path.is_empty() => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        _ => HttpResponse::NotFound().body("Not Found"),
    }
}
