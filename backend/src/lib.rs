pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod listing;
pub mod models;
pub mod review;
pub mod schema;
pub mod serializers;
pub mod store;

use config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}
