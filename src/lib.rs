pub mod analytics;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod sessions;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::{JsonStore, resolve_data_dir};
