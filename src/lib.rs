pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod matching;
pub mod models;
pub mod services;

pub use crate::app::{build_router, AppState};
pub use crate::config::Config;
