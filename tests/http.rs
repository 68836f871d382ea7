use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize, PartialEq, Default)]
struct Entry {
    acts: String,
    question: String,
    summary: String,
}

#[derive(Debug, Deserialize)]
struct DayCell {
    day: u32,
    has_entry: bool,
    is_selected: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Cell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Deserialize)]
struct Grid {
    year: i32,
    month: u32,
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct DiaryView {
    date: String,
    display_date: String,
    entry: Entry,
    entry_saved: bool,
    show_calendar: bool,
    calendar: Option<Grid>,
    save_warning: Option<String>,
}

struct TestServer {
    base_url: String,
    data_path: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("daily_diary_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: String) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_daily_diary"))
        .env("PORT", port.to_string())
        .env("DIARY_DATA_PATH", &data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_path,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(unique_data_path()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_json(client: &Client, server: &TestServer, path: &str, body: Value) -> DiaryView {
    let response = client
        .post(format!("{}{path}", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success(), "{path} failed: {}", response.status());
    response.json().await.unwrap()
}

async fn jump(client: &Client, server: &TestServer, date: &str) -> DiaryView {
    post_json(client, server, "/api/navigate", json!({ "action": "jump", "date": date })).await
}

async fn set_field(client: &Client, server: &TestServer, field: &str, value: &str) -> DiaryView {
    post_json(client, server, "/api/field", json!({ "field": field, "value": value })).await
}

async fn save(client: &Client, server: &TestServer) -> DiaryView {
    post_json(client, server, "/api/save", json!({})).await
}

async fn state(client: &Client, server: &TestServer) -> DiaryView {
    client
        .get(format!("{}/api/state", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_saved_entry_survives_restart() {
    let _guard = TEST_LOCK.lock().await;
    let client = Client::new();
    let data_path = unique_data_path();

    {
        let server = spawn_server(data_path.clone()).await;
        jump(&client, &server, "2024-03-15").await;
        set_field(&client, &server, "acts", "ran 5k").await;
        let view = save(&client, &server).await;
        assert!(view.entry_saved);
        assert!(view.save_warning.is_none());

        let raw = std::fs::read_to_string(&server.data_path).unwrap();
        let persisted: BTreeMap<String, Entry> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(
            persisted["2024-03-15"],
            Entry {
                acts: "ran 5k".into(),
                ..Entry::default()
            }
        );
    }

    let server = spawn_server(data_path).await;
    let view = jump(&client, &server, "2024-03-15").await;
    assert_eq!(view.entry.acts, "ran 5k");
    assert!(view.entry_saved);
}

#[tokio::test]
async fn http_next_day_without_entry_clears_editor() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    jump(&client, &server, "2024-03-15").await;
    set_field(&client, &server, "summary", "good day").await;
    save(&client, &server).await;

    let view = post_json(&client, &server, "/api/navigate", json!({ "action": "next" })).await;
    assert_eq!(view.date, "2024-03-16");
    assert_eq!(view.display_date, "Saturday, March 16, 2024");
    assert_eq!(view.entry, Entry::default());
    assert!(!view.entry_saved);

    let view = post_json(&client, &server, "/api/navigate", json!({ "action": "previous" })).await;
    assert_eq!(view.entry.summary, "good day");
}

#[tokio::test]
async fn http_unsaved_edits_are_discarded() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    jump(&client, &server, "2023-12-31").await;
    set_field(&client, &server, "question", "why?").await;
    let view = post_json(&client, &server, "/api/navigate", json!({ "action": "next" })).await;
    assert_eq!(view.date, "2024-01-01");

    let view = post_json(&client, &server, "/api/navigate", json!({ "action": "previous" })).await;
    assert_eq!(view.date, "2023-12-31");
    assert_eq!(view.entry, Entry::default());
    assert!(!view.entry_saved);
}

#[tokio::test]
async fn http_calendar_select_closes_picker() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mut view = state(&client, &server).await;
    if view.show_calendar {
        view = post_json(&client, &server, "/api/calendar", json!({ "action": "toggle" })).await;
    }
    assert!(view.calendar.is_none());

    let view = post_json(&client, &server, "/api/calendar", json!({ "action": "toggle" })).await;
    let grid = view.calendar.expect("calendar open");
    let blanks = grid
        .cells
        .iter()
        .take_while(|cell| matches!(cell, Cell::Blank))
        .count();
    assert!(blanks < 7);
    assert!(grid.cells.len() - blanks >= 28);

    let view = post_json(&client, &server, "/api/calendar", json!({ "action": "select", "day": 1 })).await;
    assert!(!view.show_calendar);
    assert!(view.date.ends_with("-01"));
    assert!(view.date.starts_with(&format!("{}-{:02}", grid.year, grid.month)));
}

#[tokio::test]
async fn http_calendar_marks_saved_and_selected_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    // Page the picker back to the month the cursor is jumped into.
    let mut view = jump(&client, &server, "2024-03-15").await;
    set_field(&client, &server, "acts", "ran 5k").await;
    save(&client, &server).await;
    if !view.show_calendar {
        view = post_json(&client, &server, "/api/calendar", json!({ "action": "toggle" })).await;
    }
    let mut grid = view.calendar.expect("calendar open");
    for _ in 0..1200 {
        if (grid.year, grid.month) <= (2024, 3) {
            break;
        }
        grid = post_json(&client, &server, "/api/calendar", json!({ "action": "previous" }))
            .await
            .calendar
            .expect("calendar open");
    }
    assert_eq!((grid.year, grid.month), (2024, 3));

    let day = grid
        .cells
        .iter()
        .find_map(|cell| match cell {
            Cell::Day(day) if day.day == 15 => Some(day),
            _ => None,
        })
        .expect("day 15");
    assert!(day.has_entry);
    assert!(day.is_selected);
}

#[tokio::test]
async fn http_rejects_bad_requests() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/navigate", server.base_url))
        .json(&json!({ "action": "sideways" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/navigate", server.base_url))
        .json(&json!({ "action": "jump", "date": "2024-02-30" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/calendar/select/32", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_form_save_redirects_with_confirmation() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    jump(&client, &server, "2024-07-04").await;
    let response = client
        .post(format!("{}/entry/save", server.base_url))
        .form(&[("acts", "fireworks"), ("question", "how?"), ("summary", "loud")])
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Thursday, July 4, 2024"));
    assert!(html.contains(">fireworks</textarea>"));
    assert!(html.contains("✓ Entry saved for this date"));
    assert!(html.contains(r#"class="flash""#));

    let response = client
        .post(format!("{}/day/next", server.base_url))
        .send()
        .await
        .unwrap();
    let html = response.text().await.unwrap();
    assert!(html.contains("Friday, July 5, 2024"));
    assert!(!html.contains("✓ Entry saved for this date"));
}

#[tokio::test]
async fn http_bare_date_and_select_shapes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let view = post_json(&client, &server, "/api/navigate", json!({ "date": "2024-03-15" })).await;
    assert_eq!(view.date, "2024-03-15");

    let mut view = state(&client, &server).await;
    if !view.show_calendar {
        view = post_json(&client, &server, "/api/calendar", json!({ "action": "toggle" })).await;
    }
    let grid = view.calendar.expect("calendar open");

    let view = post_json(&client, &server, "/api/calendar", json!({ "select": 3 })).await;
    assert!(!view.show_calendar);
    assert_eq!(view.date, format!("{}-{:02}-03", grid.year, grid.month));

    let response = client
        .post(format!("{}/api/calendar", server.base_url))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_index_accepts_any_saved_value() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/?saved=yes", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"class="flash""#));
}
