use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .farm_name("Test Farm")
        .build()
        .await
        .unwrap();
    server::app(engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn index_and_health() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["farm_name"], "Test Farm");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn crop_cycle_feeds_crop_performance() {
    let app = app().await;

    let (status, crop) = send(&app, "POST", "/api/crops", Some(json!({ "name": "Wheat" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, cycle) = send(
        &app,
        "POST",
        "/api/crops/cycles",
        Some(json!({
            "crop_id": id_of(&crop),
            "area_hectares": 10.0,
            "planting_date": "2025-03-01",
            "expenses": 300,
            "revenue": 900.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cycle["status"], "planned");

    let uri = format!("/api/crops/cycles/{}", id_of(&cycle));
    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "status": "harvested", "yield_amount": 500.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "harvested");

    let (status, harvested) = send(&app, "GET", "/api/crops/cycles?status=harvested", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(harvested.as_array().unwrap().len(), 1);

    let (_, performance) = send(&app, "GET", "/api/analytics/crop-performance", None).await;
    assert_eq!(performance[0]["crop_name"], "Wheat");
    assert_eq!(performance[0]["avg_yield_per_area"], 50.0);

    let (_, summary) = send(&app, "GET", "/api/analytics/crop-summary", None).await;
    assert_eq!(summary["total_profit"], 600.5);

    let crop_uri = format!("/api/crops/{}", id_of(&crop));
    let (status, _) = send(&app, "DELETE", &crop_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn linked_expenses_move_budget_actuals() {
    let app = app().await;

    let (status, budget) = send(
        &app,
        "POST",
        "/api/financial/budgets",
        Some(json!({
            "name": "Feed",
            "category": "livestock",
            "fiscal_year": 2025,
            "planned_amount": 400
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(budget["actual_amount"], 0.0);

    let (status, expense) = send(
        &app,
        "POST",
        "/api/financial/transactions",
        Some(json!({
            "date": "2025-04-02",
            "kind": "expense",
            "category": "feed",
            "amount": 500,
            "description": "Hay bales",
            "budget_id": id_of(&budget)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let budget_uri = format!("/api/financial/budgets/{}", id_of(&budget));
    let (_, view) = send(&app, "GET", &budget_uri, None).await;
    assert_eq!(view["actual_amount"], 500.0);
    assert_eq!(view["variance"], 100.0);
    assert_eq!(view["variance_percentage"], 25.0);

    let (_, listed) = send(&app, "GET", "/api/financial/transactions?type=expense", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let uri = format!("/api/financial/transactions/{}", id_of(&expense));
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, view) = send(&app, "GET", &budget_uri, None).await;
    assert_eq!(view["actual_amount"], 0.0);

    let (_, summary) = send(
        &app,
        "GET",
        "/api/analytics/budget-summary?fiscal_year=2025",
        None,
    )
    .await;
    assert_eq!(summary["total_planned"], 400.0);
}

#[tokio::test]
async fn financial_summary_over_a_range() {
    let app = app().await;

    for (kind, amount, date) in [
        ("income", 2000, "2025-05-01"),
        ("expense", 500, "2025-05-03"),
        ("expense", 50, "2024-12-31"),
    ] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/financial/transactions",
            Some(json!({
                "date": date,
                "kind": kind,
                "category": "general",
                "amount": amount,
                "description": "entry"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = send(
        &app,
        "GET",
        "/api/analytics/financial-summary?start_date=2025-01-01&end_date=2025-12-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["net_profit"], 1500.0);
    assert_eq!(summary["profit_margin"], 75.0);
}

#[tokio::test]
async fn oversized_amounts_are_rejected_and_totals_stay_exact() {
    let app = app().await;

    for amount in [json!("50000000000000000"), json!("50000000000000000")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/financial/transactions",
            Some(json!({
                "date": "2025-05-01",
                "kind": "income",
                "category": "sales",
                "amount": amount,
                "description": "land sale"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/financial/transactions",
            Some(json!({
                "date": "2025-05-01",
                "kind": "income",
                "category": "sales",
                "amount": 100000000000_i64,
                "description": "land sale"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = send(&app, "GET", "/api/analytics/financial-summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_income"], 200000000000.0);
    assert_eq!(summary["record_count"], 2);
}

#[tokio::test]
async fn labor_statistics_for_a_month() {
    let app = app().await;

    let mut workers = Vec::new();
    for (first, rate) in [("Ana", 15), ("Joe", 30)] {
        let (status, worker) = send(
            &app,
            "POST",
            "/api/labor/workers",
            Some(json!({ "first_name": first, "last_name": "Field", "hourly_rate": rate })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        workers.push(id_of(&worker));
    }

    for (worker_id, hours) in workers.iter().zip([8.0, 2.0]) {
        let (status, _) = send(
            &app,
            "POST",
            "/api/labor/work-logs",
            Some(json!({
                "worker_id": worker_id,
                "work_date": "2025-01-10",
                "hours_worked": hours,
                "activity_type": "harvesting"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, stats) = send(
        &app,
        "GET",
        "/api/analytics/labor-statistics?start_date=2025-01-01&end_date=2025-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_hours"], 10.0);
    assert_eq!(stats["total_cost"], 180.0);
    assert_eq!(stats["avg_hourly_rate"], 18.0);
    assert_eq!(stats["active_workers"], 2);
    assert_eq!(stats["activity_breakdown"]["harvesting"]["hours"], 10.0);

    let uri = format!("/api/labor/workers/{}/work-logs", workers[0]);
    let (_, logs) = send(&app, "GET", &uri, None).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "GET",
        "/api/analytics/labor-statistics?start_date=2025-02-01&end_date=2025-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn livestock_errors_map_to_statuses() {
    let app = app().await;

    let animal = json!({ "tag_number": "C-001", "species": "cattle" });
    let (status, cow) = send(&app, "POST", "/api/livestock", Some(animal.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/api/livestock", Some(animal)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/livestock/health-records",
        Some(json!({
            "livestock_id": id_of(&cow),
            "record_date": "2025-06-01",
            "record_type": "vaccination",
            "description": "Annual shots",
            "cost": -5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/api/livestock?status=lost", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let missing = format!("/api/livestock/{}", uuid_nil());
    let (status, body) = send(&app, "GET", &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not exists"));

    let (_, summary) = send(&app, "GET", "/api/analytics/livestock-summary", None).await;
    assert_eq!(summary["total_animals"], 1);
}

#[tokio::test]
async fn reports_by_kind() {
    let app = app().await;

    let (status, report) = send(&app, "GET", "/api/analytics/report", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["kind"], "comprehensive");
    assert_eq!(report["farm_name"], "Test Farm");
    assert!(report.get("labor_summary").is_some());

    let (status, report) = send(&app, "GET", "/api/analytics/report?kind=financial", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(report.get("crop_summary").is_none());

    let (status, body) = send(&app, "GET", "/api/analytics/report?kind=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown report type: bogus");

    let (status, dashboard) = send(&app, "GET", "/api/analytics/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["financial_summary"]["net_profit"], 0.0);
}

fn uuid_nil() -> &'static str {
    "00000000-0000-0000-0000-000000000000"
}
