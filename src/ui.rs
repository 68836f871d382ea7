use crate::calendar::{CalendarCell, CalendarGrid, DayCell, DayHighlight, EntryMarker};
use crate::diary::DiaryView;
use crate::models::EntryField;
use std::fmt::Write;

pub fn render_index(view: &DiaryView, just_saved: bool) -> String {
    let calendar = view.calendar.as_ref().map(render_calendar).unwrap_or_default();
    let saved_marker = if view.entry_saved {
        r#"<p class="saved">✓ Entry saved for this date</p>"#
    } else {
        ""
    };
    let flash = if just_saved {
        r#"<span class="flash" data-type="ok">Saved</span>"#
    } else {
        ""
    };
    let warning = view
        .save_warning
        .as_deref()
        .map(|message| format!(r#"<p class="status" data-type="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();

    // User text goes in last so braces it contains are never treated as slots.
    INDEX_HTML
        .replace("{{DISPLAY_DATE}}", &escape_html(&view.display_date))
        .replace("{{DATE_KEY}}", view.date.as_str())
        .replace("{{CALENDAR}}", &calendar)
        .replace("{{SAVED}}", saved_marker)
        .replace("{{FLASH}}", flash)
        .replace("{{WARNING}}", &warning)
        .replace("{{FIELDS}}", &render_fields(view))
}

fn render_fields(view: &DiaryView) -> String {
    let mut html = String::new();
    for field in EntryField::ALL {
        let _ = write!(
            html,
            r#"<section class="field field-{name}">
          <h3>{heading}</h3>
          <textarea name="{name}" placeholder="{placeholder}">{value}</textarea>
        </section>
        "#,
            name = field.name(),
            heading = field.heading(),
            placeholder = escape_html(field.placeholder()),
            value = escape_html(view.entry.field(field)),
        );
    }
    html
}

fn render_calendar(grid: &CalendarGrid) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="picker">
        <div class="picker-header">
          <form method="post" action="/calendar/previous"><button class="chevron" type="submit" aria-label="Previous month">&lsaquo;</button></form>
          <h3>{title}</h3>
          <form method="post" action="/calendar/next"><button class="chevron" type="submit" aria-label="Next month">&rsaquo;</button></form>
        </div>
        <div class="grid weekdays">"#,
        title = escape_html(&grid.title),
    );
    for label in grid.weekdays {
        let _ = write!(html, "<span>{label}</span>");
    }
    html.push_str(r#"</div><form class="grid days" method="post">"#);
    for cell in &grid.cells {
        match cell {
            CalendarCell::Blank => html.push_str(r#"<span class="blank"></span>"#),
            CalendarCell::Day(day) => render_day(&mut html, day),
        }
    }
    html.push_str(
        r#"</form>
        <div class="legend"><span><i class="dot"></i>Has entry</span><span><i class="dot selected"></i>Selected</span></div>
      </div>"#,
    );
    html
}

fn render_day(html: &mut String, day: &DayCell) {
    let class = match day.highlight {
        DayHighlight::Selected => "day selected",
        DayHighlight::Today => "day today",
        DayHighlight::Plain => "day",
    };
    let marker = match day.entry_marker {
        Some(EntryMarker::OnSelection) => r#"<i class="dot on-selection"></i>"#,
        Some(EntryMarker::Standard) => r#"<i class="dot"></i>"#,
        None => "",
    };
    let _ = write!(
        html,
        r#"<button class="{class}" type="submit" formaction="/calendar/select/{day}" title="{key}">{day}{marker}</button>"#,
        day = day.day,
        key = day.key,
    );
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Diary</title>
  <style>
    :root {
      --bg-1: #fffbeb;
      --bg-2: #fff7ed;
      --ink: #1f2937;
      --amber: #f59e0b;
      --amber-soft: #fef3c7;
      --blue: #3b82f6;
      --green: #22c55e;
      --purple: #a855f7;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(120, 53, 15, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      overflow: hidden;
    }

    header {
      padding: 24px;
      border-bottom: 2px solid var(--amber-soft);
      display: grid;
      gap: 16px;
    }

    .top {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      color: #78350f;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .actions {
      display: flex;
      gap: 8px;
      position: relative;
    }

    form {
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: var(--amber);
    }

    .btn-calendar {
      background: var(--blue);
    }

    .day-nav {
      display: flex;
      align-items: center;
      justify-content: space-between;
      background: var(--bg-1);
      border-radius: 12px;
      padding: 12px;
    }

    .day-nav h2 {
      margin: 0;
      font-size: 1.2rem;
      color: #92400e;
    }

    .chevron {
      background: transparent;
      color: #b45309;
      font-size: 1.5rem;
      padding: 4px 12px;
    }

    .picker {
      position: absolute;
      top: 100%;
      right: 0;
      margin-top: 8px;
      width: 320px;
      background: white;
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 16px;
      z-index: 10;
    }

    .picker-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .picker-header h3 {
      margin: 0;
      font-size: 1rem;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      margin-top: 8px;
    }

    .weekdays span {
      text-align: center;
      font-size: 0.75rem;
      font-weight: 600;
      color: #4b5563;
    }

    .day {
      position: relative;
      height: 40px;
      padding: 0;
      color: var(--ink);
      background: transparent;
      font-weight: 400;
    }

    .day.selected {
      background: var(--amber);
      color: white;
      font-weight: 700;
    }

    .day.today {
      background: var(--amber-soft);
      font-weight: 600;
    }

    .dot {
      display: inline-block;
      width: 6px;
      height: 6px;
      border-radius: 50%;
      background: var(--green);
    }

    .day .dot {
      position: absolute;
      bottom: 4px;
      left: calc(50% - 3px);
    }

    .dot.on-selection {
      background: white;
    }

    .dot.selected {
      background: var(--amber);
    }

    .legend {
      display: flex;
      gap: 16px;
      margin-top: 12px;
      padding-top: 12px;
      border-top: 1px solid #e5e7eb;
      font-size: 0.75rem;
      color: #4b5563;
    }

    .legend span {
      display: inline-flex;
      align-items: center;
      gap: 4px;
    }

    .entry {
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    .field h3 {
      margin: 0 0 12px;
      padding-left: 12px;
      border-left: 6px solid var(--blue);
    }

    .field-question h3 {
      border-color: var(--green);
    }

    .field-summary h3 {
      border-color: var(--purple);
    }

    textarea {
      width: 100%;
      height: 128px;
      padding: 16px;
      border: 2px solid #dbeafe;
      border-radius: 10px;
      font: inherit;
      resize: none;
    }

    .save-row {
      display: flex;
      justify-content: flex-end;
      align-items: center;
      gap: 12px;
    }

    .saved {
      margin: 0;
      text-align: center;
      color: #16a34a;
      font-size: 0.9rem;
    }

    .flash {
      color: #2d7a4b;
      animation: fade 1200ms ease forwards;
    }

    .status[data-type="error"] {
      margin: 0;
      color: #c63b2b;
      font-size: 0.9rem;
    }

    @keyframes fade {
      0%, 70% {
        opacity: 1;
      }
      100% {
        opacity: 0;
      }
    }

    @media (max-width: 600px) {
      .top {
        flex-direction: column;
        align-items: flex-start;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div class="top">
        <h1>Daily Diary</h1>
        <div class="actions">
          <form method="post" action="/calendar/toggle"><button class="btn-calendar" type="submit">Calendar</button></form>
          <form method="post" action="/day/today"><button type="submit">Today</button></form>
          {{CALENDAR}}
        </div>
      </div>
      <div class="day-nav">
        <form method="post" action="/day/previous"><button class="chevron" type="submit" aria-label="Previous day">&lsaquo;</button></form>
        <h2 id="date" data-key="{{DATE_KEY}}">{{DISPLAY_DATE}}</h2>
        <form method="post" action="/day/next"><button class="chevron" type="submit" aria-label="Next day">&rsaquo;</button></form>
      </div>
    </header>

    <form class="entry" method="post" action="/entry/save">
      {{FIELDS}}
      <div class="save-row">
        {{FLASH}}
        <button type="submit">Save Entry</button>
      </div>
      {{SAVED}}
      {{WARNING}}
    </form>
  </main>
</body>
</html>
"#;
