pub mod app;
pub mod calendar;
pub mod cursor;
pub mod date_key;
pub mod diary;
pub mod editor;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use diary::Diary;
pub use state::AppState;
pub use storage::{load_entries, resolve_data_path};
