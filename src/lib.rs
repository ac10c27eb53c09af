//! Pen catalog: CRUD REST API over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use migration::ensure_catalog_tables;
pub use routes::{build_app, catalog_routes, common_routes};
pub use state::AppState;
