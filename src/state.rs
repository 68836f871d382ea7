use crate::diary::Diary;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared context handed to every handler. The mutex serializes requests, so
/// each one runs to completion before the next touches the diary.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub diary: Arc<Mutex<Diary>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, diary: Diary) -> Self {
        Self {
            data_path,
            diary: Arc::new(Mutex::new(diary)),
        }
    }
}
