use crate::config::Config;
use crate::error::Result;
use crate::session::state::SessionsState;
use crate::store::RecordStore;
use crate::uploads::UploadSink;
use crate::users::UserDirectory;
use crate::views::Views;
use actix_web::cookie::Key;
use chrono::Duration;
use std::sync::Arc;

/// Everything a request handler needs, built once at startup and shared with every
/// worker as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub users: Arc<UserDirectory>,
    pub uploads: Arc<UploadSink>,
    pub sessions: SessionsState,
    pub views: Arc<Views>,
    pub cookie_key: Key,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            store: Arc::new(RecordStore::open(&config.data_file)?),
            users: Arc::new(UserDirectory::open(&config.users_file)?),
            uploads: Arc::new(UploadSink::open(&config.upload_dir)?),
            sessions: SessionsState::new(Duration::hours(config.session_ttl_hours)),
            views: Arc::new(Views::new()?),
            cookie_key: config.signing_key(),
            secure_cookies: config.secure_cookies,
        })
    }
}
