//! End-to-end API tests against PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p fundctl-server -- --ignored

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;
use uuid::Uuid;

use fundctl_server::db::{migrations, FundRepo, InvestmentRepo, InvestorRepo};
use fundctl_server::{build_app, create_pool, App, AppState, ServerConfig};

async fn app() -> App {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    build_app(AppState::new(pool), &ServerConfig::default())
}

async fn call(app: &App, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}

async fn create_fund(app: &App) -> Value {
    let (status, fund) = call(
        app,
        "POST",
        "/funds",
        Some(json!({
            "name": format!("Test Fund {}", Uuid::new_v4()),
            "vintage_year": 2025,
            "target_size_usd": 1000000,
            "status": "Fundraising"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    fund
}

async fn create_investor(app: &App, email: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/investors",
        Some(json!({
            "name": "Alice Smith",
            "investor_type": "Individual",
            "email": email
        })),
    )
    .await
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_fund_returns_fresh_id() {
    let app = app().await;
    let first = create_fund(&app).await;
    let second = create_fund(&app).await;

    assert!(first["id"].as_str().is_some());
    assert_ne!(first["id"], second["id"]);
    assert_eq!(first["vintage_year"], 2025);
    assert_eq!(first["status"], "Fundraising");
    assert_eq!(first["target_size_usd"], "1000000");

    let (status, list) = call(&app, "GET", "/funds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["id"] == first["id"]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_fund_is_404() {
    let app = app().await;
    let (status, _) = call(&app, "GET", &format!("/funds/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        "PUT",
        "/funds",
        Some(json!({ "id": Uuid::new_v4(), "status": "Closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn partial_fund_update_keeps_other_fields() {
    let app = app().await;
    let fund = create_fund(&app).await;

    let (status, updated) = call(
        &app,
        "PUT",
        "/funds",
        Some(json!({ "id": fund["id"], "status": "Investing" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Investing");
    assert_eq!(updated["name"], fund["name"]);
    assert_eq!(updated["vintage_year"], fund["vintage_year"]);
    assert_eq!(updated["target_size_usd"], fund["target_size_usd"]);
    assert_eq!(updated["created_at"], fund["created_at"]);

    let id = fund["id"].as_str().unwrap();
    let (_, fetched) = call(&app, "GET", &format!("/funds/{id}"), None).await;
    assert_eq!(fetched["status"], "Investing");
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_email_is_rejected() {
    let app = app().await;
    let email = unique_email("dup");

    let (status, first) = create_investor(&app, &email).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create_investor(&app, &email).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let id = first["id"].as_str().unwrap();
    let (status, fetched) = call(&app, "GET", &format!("/investors/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], email.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn investor_update_replaces_record() {
    let app = app().await;
    let (_, investor) = create_investor(&app, &unique_email("replace")).await;
    let new_email = unique_email("replaced");

    let (status, updated) = call(
        &app,
        "PUT",
        "/investors",
        Some(json!({
            "id": investor["id"],
            "name": "Alice Holdings",
            "investor_type": "Family Office",
            "email": new_email
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["investor_type"], "Family Office");
    assert_eq!(updated["email"], new_email.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn investor_update_to_taken_email_is_400() {
    let app = app().await;
    let taken = unique_email("taken");
    let (_, owner) = create_investor(&app, &taken).await;
    let original = unique_email("mover");
    let (_, mover) = create_investor(&app, &original).await;

    let (status, body) = call(
        &app,
        "PUT",
        "/investors",
        Some(json!({
            "id": mover["id"],
            "name": "Alice Smith",
            "investor_type": "Individual",
            "email": taken
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("already exists"));
    assert!(message.contains(taken.as_str()));

    // Neither record changed.
    let mover_id = mover["id"].as_str().unwrap();
    let (_, fetched) = call(&app, "GET", &format!("/investors/{mover_id}"), None).await;
    assert_eq!(fetched["email"], original.as_str());
    let owner_id = owner["id"].as_str().unwrap();
    let (_, fetched) = call(&app, "GET", &format!("/investors/{owner_id}"), None).await;
    assert_eq!(fetched["email"], taken.as_str());
}

#[tokio::test]
#[ignore = "requires database"]
async fn investor_update_of_unknown_id_is_404() {
    let app = app().await;
    let id = Uuid::new_v4();

    let (status, body) = call(
        &app,
        "PUT",
        "/investors",
        Some(json!({
            "id": id,
            "name": "Nobody",
            "investor_type": "Institution",
            "email": unique_email("nobody")
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("No investor found with id '{id}'"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn amounts_round_trip_exactly() {
    let app = app().await;
    let (status, fund) = call(
        &app,
        "POST",
        "/funds/",
        Some(
            serde_json::from_str(
                r#"{"name": "Precise Fund", "vintage_year": 2020,
                    "target_size_usd": 1234567890123.123456789, "status": "Closed"}"#,
            )
            .unwrap(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fund["target_size_usd"], "1234567890123.123456789");

    let id = fund["id"].as_str().unwrap();
    let (_, fetched) = call(&app, "GET", &format!("/funds/{id}/"), None).await;
    assert_eq!(fetched["target_size_usd"], "1234567890123.123456789");
}

#[tokio::test]
#[ignore = "requires database"]
async fn dangling_references_are_400_and_not_persisted() {
    let app = app().await;
    let fund = create_fund(&app).await;
    let fund_id = fund["id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        &format!("/funds/{fund_id}/investments"),
        Some(json!({
            "investor_id": Uuid::new_v4(),
            "amount_usd": 1000,
            "investment_date": "2024-01-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Foreign key constraint failed");

    let (_, investor) = create_investor(&app, &unique_email("fk")).await;
    let (status, _) = call(
        &app,
        "POST",
        "/investments",
        Some(json!({
            "investor_id": investor["id"],
            "fund_id": Uuid::new_v4(),
            "amount_usd": 1000,
            "investment_date": "2024-01-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = call(&app, "GET", &format!("/funds/{fund_id}/investments"), None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn nested_create_takes_fund_from_path() {
    let app = app().await;
    let fund = create_fund(&app).await;
    let fund_id = fund["id"].as_str().unwrap();
    let (_, investor) = create_investor(&app, &unique_email("nested")).await;

    let mut ids = Vec::new();
    for amount in [50000, 75000] {
        let (status, investment) = call(
            &app,
            "POST",
            &format!("/funds/{fund_id}/investments"),
            Some(json!({
                "investor_id": investor["id"],
                "amount_usd": amount,
                "investment_date": "2024-01-15"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(investment["fund_id"], fund_id);
        assert_eq!(investment["investment_date"], "2024-01-15");
        ids.push(investment["id"].clone());
    }

    let (status, list) = call(&app, "GET", &format!("/funds/{fund_id}/investments"), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    for id in &ids {
        assert!(list.iter().any(|i| &i["id"] == id));
    }

    let first = ids[0].as_str().unwrap();
    let (status, single) = call(&app, "GET", &format!("/investments/{first}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(single["amount_usd"], "50000");
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_a_fund_cascades_to_investments() {
    let app = app().await;
    let fund = create_fund(&app).await;
    let fund_id = fund["id"].as_str().unwrap();
    let (_, investor) = create_investor(&app, &unique_email("cascade")).await;

    let (_, investment) = call(
        &app,
        "POST",
        "/investments",
        Some(json!({
            "investor_id": investor["id"],
            "fund_id": fund_id,
            "amount_usd": 2500.75,
            "investment_date": "2024-03-01"
        })),
    )
    .await;
    let investment_id = investment["id"].as_str().unwrap().to_owned();

    let (status, _) = call(&app, "DELETE", &format!("/funds/{fund_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "GET", &format!("/investments/{investment_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &format!("/funds/{fund_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let investor_id = investor["id"].as_str().unwrap();
    let (status, _) = call(&app, "DELETE", &format!("/investors/{investor_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn end_to_end_fund_investor_investment() {
    let app = app().await;
    let fund = create_fund(&app).await;
    let fund_id = fund["id"].as_str().unwrap();

    let (status, investor) = create_investor(&app, &unique_email("a")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, investment) = call(
        &app,
        "POST",
        &format!("/funds/{fund_id}/investments"),
        Some(json!({
            "investor_id": investor["id"],
            "amount_usd": 50000,
            "investment_date": "2024-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = call(&app, "GET", &format!("/funds/{fund_id}/investments"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list
        .as_array()
        .unwrap()
        .iter()
        .any(|i| i["id"] == investment["id"]));

    let (status, _) = call(
        &app,
        "DELETE",
        &format!("/investments/{}", investment["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

/// Shared buffer the fmt subscriber writes into.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn repository_reads_emit_debug_events() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(captured.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let missing = Uuid::new_v4();
    FundRepo::new(&pool).list().await.expect("list funds");
    let _ = FundRepo::new(&pool).get(missing).await;
    InvestorRepo::new(&pool).list().await.expect("list investors");
    let _ = InvestorRepo::new(&pool).get(missing).await;
    InvestmentRepo::new(&pool)
        .list_for_fund(missing)
        .await
        .expect("list investments");
    let _ = InvestmentRepo::new(&pool).get(missing).await;

    let logs = captured.text();
    for event in [
        "listed funds",
        "fetching fund",
        "listed investors",
        "fetching investor",
        "listed investments",
        "fetching investment",
    ] {
        assert!(logs.contains(event), "missing {event:?} in:\n{logs}");
    }
}
