use crate::calendar::{build_grid, CalendarGrid, CalendarMonth};
use crate::cursor::DateCursor;
use crate::date_key::DateKey;
use crate::editor::EntryEditor;
use crate::models::{EntryField, EntryRecord};
use crate::store::EntryStore;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;

pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiaryError {
    #[error("{month} has no day {day}")]
    DayOutOfRange { day: u32, month: String },
}

/// Snapshot of everything one render of the page consumes.
#[derive(Debug, Clone, Serialize)]
pub struct DiaryView {
    pub date: DateKey,
    pub display_date: String,
    pub entry: EntryRecord,
    pub entry_saved: bool,
    pub show_calendar: bool,
    pub calendar_title: String,
    pub calendar: Option<CalendarGrid>,
    pub save_warning: Option<String>,
}

/// Root controller: owns the store, the cursor, the picker month and the editor.
///
/// Every change of the current date goes through [`Diary::move_cursor`], which
/// reloads the editor, so unsaved edits never survive navigation.
pub struct Diary {
    store: EntryStore,
    cursor: DateCursor,
    calendar_month: CalendarMonth,
    show_calendar: bool,
    editor: EntryEditor,
    save_warning: Option<String>,
    clock: Clock,
}

impl Diary {
    pub fn new(store: EntryStore) -> Self {
        Self::with_clock(store, local_today)
    }

    pub fn with_clock(store: EntryStore, clock: Clock) -> Self {
        let today = clock();
        let mut editor = EntryEditor::default();
        editor.reload(&store, today);
        Self {
            store,
            cursor: DateCursor::new(today),
            calendar_month: CalendarMonth::containing(today),
            show_calendar: false,
            editor,
            save_warning: None,
            clock,
        }
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn current_date(&self) -> NaiveDate {
        self.cursor.current()
    }

    pub fn calendar_month(&self) -> CalendarMonth {
        self.calendar_month
    }

    pub fn is_calendar_open(&self) -> bool {
        self.show_calendar
    }

    pub fn editor(&self) -> &EntryEditor {
        &self.editor
    }

    pub fn previous_day(&mut self) {
        self.move_cursor(DateCursor::previous_day);
    }

    pub fn next_day(&mut self) {
        self.move_cursor(DateCursor::next_day);
    }

    pub fn go_to_today(&mut self) {
        let today = (self.clock)();
        self.move_cursor(|cursor| cursor.today(today));
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.move_cursor(|cursor| cursor.jump_to(date));
    }

    pub fn toggle_calendar(&mut self) {
        self.show_calendar = !self.show_calendar;
    }

    pub fn previous_month(&mut self) {
        self.calendar_month = self.calendar_month.previous();
    }

    pub fn next_month(&mut self) {
        self.calendar_month = self.calendar_month.next();
    }

    /// Picks `day` of the displayed month and closes the picker.
    pub fn select_day(&mut self, day: u32) -> Result<NaiveDate, DiaryError> {
        let date = self
            .calendar_month
            .day(day)
            .ok_or_else(|| DiaryError::DayOutOfRange {
                day,
                month: self.calendar_month.title(),
            })?;
        self.show_calendar = false;
        self.jump_to(date);
        Ok(date)
    }

    pub fn set_field(&mut self, field: EntryField, value: impl Into<String>) {
        self.editor.set_field(field, value);
    }

    /// Commits the editor into the store at the current date and returns the
    /// store to persist.
    pub fn save(&mut self) -> &EntryStore {
        let date = self.cursor.current();
        self.store = self.editor.save(&self.store, date);
        self.editor.reload(&self.store, date);
        &self.store
    }

    pub fn has_saved_entry(&self) -> bool {
        self.store.contains(&DateKey::from_date(self.cursor.current()))
    }

    pub fn set_save_warning(&mut self, warning: Option<String>) {
        self.save_warning = warning;
    }

    pub fn view(&self) -> DiaryView {
        let date = self.cursor.current();
        let calendar = self
            .show_calendar
            .then(|| build_grid(self.calendar_month, date, &self.store, (self.clock)()));

        DiaryView {
            date: DateKey::from_date(date),
            display_date: date.format("%A, %B %-d, %Y").to_string(),
            entry: self.editor.record().clone(),
            entry_saved: self.has_saved_entry(),
            show_calendar: self.show_calendar,
            calendar_title: self.calendar_month.title(),
            calendar,
            save_warning: self.save_warning.clone(),
        }
    }

    fn move_cursor(&mut self, step: impl FnOnce(&mut DateCursor)) {
        step(&mut self.cursor);
        self.editor.reload(&self.store, self.cursor.current());
    }
}
