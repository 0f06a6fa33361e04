//! End-to-end fetch against an in-process stand-in for the Sheets API.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::json;
use snack_config::SheetsConfig;
use snack_core::TimeBucket;
use snack_sheets::{RecordSource, SheetsClient, SheetsError, StaticToken};

const KEY: &str = "sheet-key";
const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn metadata(Path(key): Path<String>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match key.as_str() {
        KEY => Json(json!({
            "sheets": [
                {"properties": {"title": "Old Rules", "index": 1}},
                {"properties": {"title": "Sophia's Rules"}}
            ]
        }))
        .into_response(),
        "empty-book" => Json(json!({})).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": "Requested entity was not found."}})),
        )
            .into_response(),
    }
}

async fn values(Path((key, range)): Path<(String, String)>, headers: HeaderMap) -> Response {
    if !authorized(&headers) || key != KEY || range != "'Sophia''s Rules'" {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!({
        "range": "'Sophia''s Rules'!A1:G3",
        "majorDimension": "ROWS",
        "values": [
            ["Item", "Morning", "Afternoon", "Evening", "Night", "Acceptable Months", "Other Restrictions"],
            ["Tea Biscuit", "TRUE", "FALSE", "FALSE", "FALSE", "", "With tea"],
            ["Mince Pie", "FALSE", "TRUE", "TRUE", "FALSE", "December"]
        ]
    }))
    .into_response()
}

async fn serve() -> String {
    let app = Router::new()
        .route("/v4/spreadsheets/{key}", get(metadata))
        .route("/v4/spreadsheets/{key}/values/{range}", get(values));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(api_base: String, key: &str, token: &str) -> SheetsClient {
    let config = SheetsConfig {
        api_base,
        spreadsheet_key: key.into(),
        ..Default::default()
    };
    SheetsClient::with_token_source(
        reqwest::Client::new(),
        &config,
        Arc::new(StaticToken(token.into())),
    )
}

#[tokio::test]
async fn fetches_first_worksheet_as_records() {
    let base = serve().await;
    let records = client(base, KEY, TOKEN).fetch_all().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].item().unwrap(), "Tea Biscuit");
    assert_eq!(records[0].other_restrictions().unwrap(), "With tea");
    assert!(records[1].flag(TimeBucket::Evening).unwrap());
    assert_eq!(records[1].other_restrictions().unwrap(), "");
}

#[tokio::test]
async fn unknown_spreadsheet_is_an_api_error() {
    let base = serve().await;
    let err = client(base, "missing", TOKEN).fetch_all().await.unwrap_err();
    assert!(matches!(err, SheetsError::Api { status: 404, .. }), "{err}");
}

#[tokio::test]
async fn spreadsheet_without_worksheets() {
    let base = serve().await;
    let err = client(base, "empty-book", TOKEN).fetch_all().await.unwrap_err();
    assert!(matches!(err, SheetsError::NoWorksheets { .. }), "{err}");
}

#[tokio::test]
async fn rejected_token_propagates() {
    let base = serve().await;
    let err = client(base, KEY, "wrong").fetch_all().await.unwrap_err();
    assert!(matches!(err, SheetsError::Api { status: 401, .. }), "{err}");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let err = client("http://127.0.0.1:9".into(), KEY, TOKEN)
        .fetch_all()
        .await
        .unwrap_err();
    assert!(matches!(err, SheetsError::Http(_)), "{err}");
}
