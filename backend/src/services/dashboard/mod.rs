//! `GET /`: the team dashboard, showing how many PDFs and sheets the team has.

use crate::error::Result;
use crate::session::Session;
use crate::state::AppState;
use actix_web::web::{get, ServiceConfig};
use actix_web::{web, HttpResponse};
use common::model::pdf::PdfRecord;
use common::model::sheet::SheetRecord;
use minijinja::context;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/", get().to(process));
}

async fn process(state: web::Data<AppState>, session: Session) -> Result<HttpResponse> {
    let store = state.store.clone();
    let team = session.team().to_string();
    let (pdf_count, sheet_count) = web::block(move || -> Result<(usize, usize)> {
        let scoped = store.scoped(&team);
        Ok((
            scoped.list::<PdfRecord>()?.len(),
            scoped.list::<SheetRecord>()?.len(),
        ))
    })
    .await??;

    state.views.page(
        "dashboard.html",
        context! {
            title => "Dashboard",
            team => session.team(),
            username => session.username(),
            pdf_count,
            sheet_count,
        },
    )
}
