//! HTML views.
//!
//! Templates live as standalone files under `backend/templates/` and are compiled
//! into the binary, the same way the static assets under `backend/static/` are. They
//! are minijinja templates; every page extends `base.html`. Autoescaping is on for
//! `.html` files, so record fields can be passed in as they are.

use crate::error::Result;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use include_dir::{include_dir, Dir};
use minijinja::Environment;
use serde::Serialize;

static TEMPLATES_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for file in TEMPLATES_DIR.files() {
            let (Some(name), Some(source)) = (file.path().to_str(), file.contents_utf8()) else {
                continue;
            };
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        Ok(self.env.get_template(name)?.render(ctx)?)
    }

    /// Renders `name` into a `200 OK` HTML response.
    pub fn page<S: Serialize>(&self, name: &str, ctx: S) -> Result<HttpResponse> {
        self.page_with_status(StatusCode::OK, name, ctx)
    }

    pub fn page_with_status<S: Serialize>(
        &self,
        status: StatusCode,
        name: &str,
        ctx: S,
    ) -> Result<HttpResponse> {
        let body = self.render(name, ctx)?;
        Ok(HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body))
    }
}
