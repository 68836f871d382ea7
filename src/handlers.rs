use crate::date_key::DateKey;
use crate::diary::{Diary, DiaryView};
use crate::errors::AppError;
use crate::models::{CalendarRequest, EntryField, EntryForm, FieldRequest, IndexQuery, NavigateRequest};
use crate::state::AppState;
use crate::storage::persist_entries;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use std::path::Path as FsPath;
use tracing::{error, info};

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let diary = state.diary.lock().await;
    Html(render_index(&diary.view(), query.saved.is_some()))
}

pub async fn previous_day(State(state): State<AppState>) -> Redirect {
    state.diary.lock().await.previous_day();
    Redirect::to("/")
}

pub async fn next_day(State(state): State<AppState>) -> Redirect {
    state.diary.lock().await.next_day();
    Redirect::to("/")
}

pub async fn today(State(state): State<AppState>) -> Redirect {
    state.diary.lock().await.go_to_today();
    Redirect::to("/")
}

pub async fn toggle_calendar(State(state): State<AppState>) -> Redirect {
    state.diary.lock().await.toggle_calendar();
    Redirect::to("/")
}

pub async fn previous_month(State(state): State<AppState>) -> Redirect {
    state.diary.lock().await.previous_month();
    Redirect::to("/")
}

pub async fn next_month(State(state): State<AppState>) -> Redirect {
    state.diary.lock().await.next_month();
    Redirect::to("/")
}

pub async fn select_day(
    State(state): State<AppState>,
    Path(day): Path<u32>,
) -> Result<Redirect, AppError> {
    state.diary.lock().await.select_day(day)?;
    Ok(Redirect::to("/"))
}

pub async fn save_form(State(state): State<AppState>, Form(form): Form<EntryForm>) -> Redirect {
    let mut diary = state.diary.lock().await;
    diary.set_field(EntryField::Acts, form.acts);
    diary.set_field(EntryField::Question, form.question);
    diary.set_field(EntryField::Summary, form.summary);
    save_current(&state.data_path, &mut diary).await;
    Redirect::to("/?saved=1")
}

pub async fn get_state(State(state): State<AppState>) -> Json<DiaryView> {
    Json(state.diary.lock().await.view())
}

pub async fn set_field(
    State(state): State<AppState>,
    Json(payload): Json<FieldRequest>,
) -> Json<DiaryView> {
    let mut diary = state.diary.lock().await;
    diary.set_field(payload.field, payload.value);
    Json(diary.view())
}

pub async fn save(State(state): State<AppState>) -> Json<DiaryView> {
    let mut diary = state.diary.lock().await;
    save_current(&state.data_path, &mut diary).await;
    Json(diary.view())
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<DiaryView>, AppError> {
    let mut diary = state.diary.lock().await;
    let action = match (payload.action.as_deref(), payload.date.is_some()) {
        (Some(action), _) => action.trim(),
        (None, true) => "jump",
        (None, false) => "",
    };
    match action {
        "previous" => diary.previous_day(),
        "next" => diary.next_day(),
        "today" => diary.go_to_today(),
        "jump" => {
            let date = payload
                .date
                .as_deref()
                .and_then(DateKey::parse)
                .and_then(|key| key.to_date())
                .ok_or_else(|| AppError::bad_request("jump needs a date formatted YYYY-MM-DD"))?;
            diary.jump_to(date);
        }
        _ => {
            return Err(AppError::bad_request(
                "send an action ('previous', 'next', 'today') or a date",
            ));
        }
    }
    Ok(Json(diary.view()))
}

pub async fn calendar(
    State(state): State<AppState>,
    Json(payload): Json<CalendarRequest>,
) -> Result<Json<DiaryView>, AppError> {
    let mut diary = state.diary.lock().await;
    let selected = payload.select.or(payload.day);
    let action = match (payload.action.as_deref(), selected.is_some()) {
        (Some(action), _) => action.trim(),
        (None, true) => "select",
        (None, false) => "",
    };
    match action {
        "toggle" => diary.toggle_calendar(),
        "previous" => diary.previous_month(),
        "next" => diary.next_month(),
        "select" => {
            let day = selected.ok_or_else(|| AppError::bad_request("select needs a day"))?;
            diary.select_day(day)?;
        }
        _ => {
            return Err(AppError::bad_request(
                "send an action ('toggle', 'previous', 'next') or a day to select",
            ));
        }
    }
    Ok(Json(diary.view()))
}

/// Saves the editor and writes the whole store out. A failed write keeps the
/// in-memory save and surfaces a warning on the page instead of failing the
/// request.
async fn save_current(data_path: &FsPath, diary: &mut Diary) {
    let date = DateKey::from_date(diary.current_date());
    let store = diary.save().clone();

    match persist_entries(data_path, &store).await {
        Ok(()) => {
            info!(%date, entries = store.len(), "saved diary entry");
            diary.set_save_warning(None);
        }
        Err(err) => {
            error!("failed to persist diary entries: {err}");
            diary.set_save_warning(Some(format!("Entry kept in memory only: {err}")));
        }
    }
}
