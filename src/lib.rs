pub mod config;
pub mod db;
pub mod error;
pub mod library;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use library::Library;
