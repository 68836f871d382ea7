use serde::{Deserialize, Serialize};

/// The three free-text reflections kept for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EntryRecord {
    pub acts: String,
    pub question: String,
    pub summary: String,
}

impl EntryRecord {
    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Acts => &self.acts,
            EntryField::Question => &self.question,
            EntryField::Summary => &self.summary,
        }
    }

    pub fn set(&mut self, field: EntryField, value: String) {
        match field {
            EntryField::Acts => self.acts = value,
            EntryField::Question => self.question = value,
            EntryField::Summary => self.summary = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryField {
    Acts,
    Question,
    Summary,
}

impl EntryField {
    pub const ALL: [EntryField; 3] = [EntryField::Acts, EntryField::Question, EntryField::Summary];

    pub fn name(self) -> &'static str {
        match self {
            EntryField::Acts => "acts",
            EntryField::Question => "question",
            EntryField::Summary => "summary",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            EntryField::Acts => "10 Minutes: Daily Acts",
            EntryField::Question => "10 Minutes: Ask a Question",
            EntryField::Summary => "10 Minutes: Summary",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            EntryField::Acts => {
                "What did you do today? Record your activities, accomplishments, and moments..."
            }
            EntryField::Question => {
                "What question arose today? What are you curious about? What do you want to explore or understand better?"
            }
            EntryField::Summary => {
                "Reflect on your day. What were the key takeaways? How do you feel? What did you learn?"
            }
        }
    }
}

/// Body of the page's save form: every field is submitted together.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub acts: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    pub field: EntryField,
    pub value: String,
}

/// Either `{"action": "previous" | "next" | "today"}` or a bare `{"date": "YYYY-MM-DD"}`.
/// `{"action": "jump", "date": ...}` is accepted as well.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Either `{"action": "toggle" | "previous" | "next"}` or a bare `{"select": day}`.
/// `{"action": "select", "day": ...}` is accepted as well.
#[derive(Debug, Deserialize)]
pub struct CalendarRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub select: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
}

/// Any `saved` value turns on the post-save flash.
#[derive(Debug, Deserialize, Default)]
pub struct IndexQuery {
    #[serde(default)]
    pub saved: Option<String>,
}
