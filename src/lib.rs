pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod sample;
pub mod store;
pub mod validator;

use std::sync::Arc;

use crate::{config::Config, store::RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: Arc<dyn RecordStore>,
}
