// tests/sheets_tests.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use note_colors::{
    config::{Config, SheetsConfig, StoreKind},
    error::AppError,
    routes,
    state::AppState,
    store::{RowStore, SheetsClient},
};
use serde_json::{Value, json};

/// Requests received by the fake spreadsheet API.
#[derive(Clone, Default)]
struct Recorded {
    calls: Arc<Mutex<Vec<(String, HashMap<String, String>, Value)>>>,
    values: Arc<Mutex<Vec<Vec<String>>>>,
}

impl Recorded {
    fn push(&self, path: String, query: HashMap<String, String>, body: Value) {
        self.calls.lock().unwrap().push((path, query, body));
    }
}

async fn read_values(State(rec): State<Recorded>) -> Json<Value> {
    let values = rec.values.lock().unwrap().clone();
    Json(json!({ "range": "Sheet1!A1:H100", "values": values }))
}

async fn write_values(
    State(rec): State<Recorded>,
    Path(range): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.push(format!("values/{}", range), query, body);
    Json(json!({ "updates": {} }))
}

async fn batch_update(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.push("doc:batchUpdate".to_string(), HashMap::new(), body);
    Json(json!({ "replies": [] }))
}

/// Spawns a fake spreadsheet API and returns its base URL.
async fn spawn_fake_sheets(rec: Recorded) -> String {
    let app = Router::new()
        .route(
            "/v1/integ/doc/values/{range}",
            get(read_values).post(write_values).put(write_values),
        )
        .route("/v1/integ/doc:batchUpdate", post(batch_update))
        .with_state(rec);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}/v1", port)
}

/// Spawns an upstream that answers every request with 500.
async fn spawn_broken_sheets() -> String {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}/v1", port)
}

fn sheets_config(base: &str) -> SheetsConfig {
    SheetsConfig {
        base_url: base.parse().unwrap(),
        integration_id: "integ".to_string(),
        spreadsheet_id: "doc".to_string(),
        sheet_name: "Sheet1".to_string(),
        sheet_id: 42,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn fetch_returns_all_values_including_header() {
    let rec = Recorded::default();
    *rec.values.lock().unwrap() = vec![
        strings(&["C", "D", "E", "F", "G", "A", "B", "Timestamp"]),
        strings(&["red", "orange", "yellow", "green", "blue", "indigo", "violet", "t"]),
    ];
    let client = SheetsClient::new(sheets_config(&spawn_fake_sheets(rec).await));

    let values = client.fetch_all_rows().await.unwrap();
    assert_eq!(values.len(), 2);
    assert_eq!(values[1][6], "violet");
}

#[tokio::test]
async fn append_sends_one_row_with_insert_options() {
    let rec = Recorded::default();
    let client = SheetsClient::new(sheets_config(&spawn_fake_sheets(rec.clone()).await));

    let cells = strings(&["red", "orange", "yellow", "green", "blue", "indigo", "violet", "t"]);
    client.append_row(cells.clone()).await.unwrap();

    let calls = rec.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (path, query, body) = &calls[0];
    assert_eq!(path, "values/Sheet1:append");
    assert_eq!(query["valueInputOption"], "USER_ENTERED");
    assert_eq!(query["insertDataOption"], "INSERT_ROWS");
    assert_eq!(body["values"], json!([cells]));
}

#[tokio::test]
async fn update_targets_a1_row_and_delete_sends_dimension_range() {
    let rec = Recorded::default();
    let client = SheetsClient::new(sheets_config(&spawn_fake_sheets(rec.clone()).await));

    client.update_row(3, strings(&["x"; 8])).await.unwrap();
    client.delete_row(3).await.unwrap();

    let calls = rec.calls.lock().unwrap();
    assert_eq!(calls[0].0, "values/Sheet1!A4");

    assert_eq!(calls[1].0, "doc:batchUpdate");
    let range = &calls[1].2["requests"][0]["deleteDimension"]["range"];
    assert_eq!(range["sheetId"], 42);
    assert_eq!(range["dimension"], "ROWS");
    assert_eq!(range["startIndex"], 3);
    assert_eq!(range["endIndex"], 4);
}

#[tokio::test]
async fn server_errors_become_transport_errors() {
    let client = SheetsClient::new(sheets_config(&spawn_broken_sheets().await));

    assert!(matches!(
        client.fetch_all_rows().await,
        Err(AppError::Transport(_))
    ));
    assert!(matches!(
        client.append_row(strings(&["red"; 8])).await,
        Err(AppError::Transport(_))
    ));
}

#[tokio::test]
async fn submit_reports_bad_gateway_when_store_is_down() {
    let mut config = Config::for_tests();
    config.store = StoreKind::Sheets;
    config.sheets = sheets_config(&spawn_broken_sheets().await);

    let app = routes::create_router(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let response = client
        .post(&format!("{}/api/quiz/submit", address))
        .header("x-session-id", "retry-session")
        .json(&json!({ "answers": {
            "C": "red", "D": "orange", "E": "yellow", "F": "green",
            "G": "blue", "A": "indigo", "B": "violet"
        }}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 502);

    // The session slot is free again, so a manual retry is not blocked
    let retry = client
        .post(&format!("{}/api/quiz/submit", address))
        .header("x-session-id", "retry-session")
        .json(&json!({ "answers": {
            "C": "red", "D": "orange", "E": "yellow", "F": "green",
            "G": "blue", "A": "indigo", "B": "violet"
        }}))
        .send()
        .await
        .unwrap();
    assert_eq!(retry.status().as_u16(), 502);
}
