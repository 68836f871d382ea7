use crate::date_key::DateKey;
use crate::store::EntryStore;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Year and month shown by the picker. Held as the first day of the month so
/// every value is a valid calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarMonth {
    first: NaiveDate,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn day_count(&self) -> u32 {
        // December of the last representable year has no successor month.
        self.first
            .checked_add_months(Months::new(1))
            .map_or(31, |next| (next - self.first).num_days() as u32)
    }

    /// Weekday index of day 1, counting from Sunday = 0.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// The date for `day` in this month, if the month has such a day.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        if (1..=self.day_count()).contains(&day) {
            self.first.with_day(day)
        } else {
            None
        }
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayHighlight {
    Selected,
    Today,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMarker {
    Standard,
    OnSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub key: DateKey,
    pub has_entry: bool,
    pub is_selected: bool,
    pub is_today: bool,
    pub highlight: DayHighlight,
    pub entry_marker: Option<EntryMarker>,
}

impl DayCell {
    fn new(
        day: u32,
        date: NaiveDate,
        current: NaiveDate,
        today: NaiveDate,
        store: &EntryStore,
    ) -> Self {
        let key = DateKey::from_date(date);
        let has_entry = store.contains(&key);
        let is_selected = date == current;
        let is_today = date == today;

        // Selection suppresses the today highlight but never the entry dot.
        let highlight = if is_selected {
            DayHighlight::Selected
        } else if is_today {
            DayHighlight::Today
        } else {
            DayHighlight::Plain
        };
        let entry_marker = has_entry.then_some(if is_selected {
            EntryMarker::OnSelection
        } else {
            EntryMarker::Standard
        });

        Self {
            day,
            key,
            has_entry,
            is_selected,
            is_today,
            highlight,
            entry_marker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, CalendarCell::Blank))
            .count()
    }
}

/// Lays out `month` on a 7-column grid, Sunday first, flagging each day against
/// the current date, the real date and the store.
pub fn build_grid(
    month: CalendarMonth,
    current: NaiveDate,
    store: &EntryStore,
    today: NaiveDate,
) -> CalendarGrid {
    let blanks = month.leading_blanks();
    let day_count = month.day_count();

    let mut cells = Vec::with_capacity((blanks + day_count) as usize);
    cells.extend((0..blanks).map(|_| CalendarCell::Blank));
    for day in 1..=day_count {
        if let Some(date) = month.day(day) {
            cells.push(CalendarCell::Day(DayCell::new(day, date, current, today, store)));
        }
    }

    CalendarGrid {
        year: month.year(),
        month: month.month(),
        title: month.title(),
        weekdays: WEEKDAY_LABELS,
        cells,
    }
}
