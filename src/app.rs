use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/day/previous", post(handlers::previous_day))
        .route("/day/next", post(handlers::next_day))
        .route("/day/today", post(handlers::today))
        .route("/calendar/toggle", post(handlers::toggle_calendar))
        .route("/calendar/previous", post(handlers::previous_month))
        .route("/calendar/next", post(handlers::next_month))
        .route("/calendar/select/:day", post(handlers::select_day))
        .route("/entry/save", post(handlers::save_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/field", post(handlers::set_field))
        .route("/api/save", post(handlers::save))
        .route("/api/navigate", post(handlers::navigate))
        .route("/api/calendar", post(handlers::calendar))
        .with_state(state)
}
