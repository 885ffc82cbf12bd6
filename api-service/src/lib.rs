pub mod config;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod serverless;
pub mod startup;

pub use startup::{build_router, AppState, Application};
