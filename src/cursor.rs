use chrono::NaiveDate;

/// The day the editor is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCursor {
    current: NaiveDate,
}

impl DateCursor {
    pub fn new(date: NaiveDate) -> Self {
        Self { current: date }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    // At chrono's representable bounds the cursor stays where it is.
    pub fn previous_day(&mut self) {
        self.current = self.current.pred_opt().unwrap_or(self.current);
    }

    pub fn next_day(&mut self) {
        self.current = self.current.succ_opt().unwrap_or(self.current);
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.current = today;
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.current = date;
    }
}
