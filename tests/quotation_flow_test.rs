//! End-to-end tests for the quotation document lifecycle:
//! create, read, replace, delete, revision listing and the
//! company side-effects of drafting a quotation.

mod common;

use axum::{body, http::Method, response::Response};
use common::TestApp;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        Value::Number(n) => n.to_string().parse().expect("decimal number"),
        other => panic!("not a decimal value: {other:?}"),
    }
}

/// Two lines totaling 1000, packaging 50, SGST 9% + CGST 9%, advance 200.
fn standard_payload(quot_no: &str, lead_id: i64) -> Value {
    json!({
        "quot_no": quot_no,
        "lead_id": lead_id,
        "date": "2025-08-01",
        "company_name": "Acme Interiors",
        "subject": "Office fit-out",
        "surcharges": { "packaging": "50" },
        "tax_percents": { "sgst": "9", "cgst": "9" },
        "advance": "200",
        "lines": [
            { "quantity": 3, "unit_price": "200" },
            { "quantity": 4, "unit_price": "100" }
        ]
    })
}

#[tokio::test]
async fn create_computes_totals_server_side() {
    let app = TestApp::new().await;

    // Client-sent totals must be ignored and recomputed.
    let mut payload = standard_payload("QT-2025-0001", 1);
    payload["lines"][0]["computed_total"] = json!("999999");

    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(payload))
        .await;
    assert_eq!(response.status(), 201);

    let body = response_json(response).await;
    let data = &body["data"];
    assert_eq!(decimal(&data["lines"][0]["computed_total"]), dec!(600));
    assert_eq!(decimal(&data["lines"][1]["computed_total"]), dec!(400));
    assert_eq!(decimal(&data["totals"]["subtotal"]), dec!(1000));
    assert_eq!(decimal(&data["totals"]["sgst_amount"]), dec!(90));
    assert_eq!(decimal(&data["totals"]["cgst_amount"]), dec!(90));
    assert_eq!(decimal(&data["totals"]["grand_total"]), dec!(1230));
    assert_eq!(decimal(&data["totals"]["balance"]), dec!(1030));
}

#[tokio::test]
async fn percentage_discount_beats_flat_amount() {
    let app = TestApp::new().await;

    let payload = json!({
        "quot_no": "QT-2025-0002",
        "lead_id": 2,
        "date": "2025-08-01",
        "lines": [{
            "quantity": 2,
            "unit_price": "100",
            "discount_amount": "20",
            "discount_percent": "10"
        }]
    });
    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(payload))
        .await;
    assert_eq!(response.status(), 201);

    let body = response_json(response).await;
    assert_eq!(decimal(&body["data"]["lines"][0]["computed_total"]), dec!(180));
}

#[tokio::test]
async fn duplicate_quotation_number_is_rejected() {
    let app = TestApp::new().await;

    let first = app
        .request(
            Method::POST,
            "/api/v1/quotations",
            Some(standard_payload("QT-2025-0003", 3)),
        )
        .await;
    assert_eq!(first.status(), 201);

    let second = app
        .request(
            Method::POST,
            "/api/v1/quotations",
            Some(standard_payload("QT-2025-0003", 3)),
        )
        .await;
    assert_eq!(second.status(), 422);
}

#[tokio::test]
async fn get_returns_full_document() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-2025-0004", 4)),
    )
    .await;

    let response = app
        .request(Method::GET, "/api/v1/quotations/QT-2025-0004", None)
        .await;
    assert_eq!(response.status(), 200);

    let body = response_json(response).await;
    let data = &body["data"];
    assert_eq!(data["quot_no"], "QT-2025-0004");
    assert_eq!(data["status"], "draft");
    assert_eq!(data["company_name"], "Acme Interiors");
    assert_eq!(data["lines"].as_array().map(Vec::len), Some(2));
    assert_eq!(decimal(&data["totals"]["grand_total"]), dec!(1230));
}

#[tokio::test]
async fn get_unknown_number_is_404() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/quotations/QT-NOPE", None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn replace_leaves_no_residual_lines_and_keeps_quot_id() {
    let app = TestApp::new().await;
    let created = app
        .request(
            Method::POST,
            "/api/v1/quotations",
            Some(standard_payload("QT-2025-0005", 5)),
        )
        .await;
    let created_body = response_json(created).await;
    let quot_id = created_body["data"]["quot_id"].as_i64().expect("quot_id");

    let replacement = json!({
        "quot_no": "QT-2025-0005",
        "lead_id": 5,
        "date": "2025-08-02",
        "lines": [{ "quantity": 1, "unit_price": "42" }]
    });
    let replaced = app
        .request(
            Method::PUT,
            "/api/v1/quotations/QT-2025-0005",
            Some(replacement),
        )
        .await;
    assert_eq!(replaced.status(), 200);
    let replaced_body = response_json(replaced).await;
    assert_eq!(replaced_body["data"]["quot_id"].as_i64(), Some(quot_id));

    let fetched = app
        .request(Method::GET, "/api/v1/quotations/QT-2025-0005", None)
        .await;
    let body = response_json(fetched).await;
    assert_eq!(body["data"]["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(decimal(&body["data"]["totals"]["subtotal"]), dec!(42));
}

#[tokio::test]
async fn replace_of_unknown_number_creates_the_document() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::PUT,
            "/api/v1/quotations/QT-2025-0006",
            Some(standard_payload("ignored-in-body", 6)),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    // path wins over the body's quotation number
    assert_eq!(body["data"]["quot_no"], "QT-2025-0006");

    let fetched = app
        .request(Method::GET, "/api/v1/quotations/QT-2025-0006", None)
        .await;
    assert_eq!(fetched.status(), 200);
}

#[tokio::test]
async fn last_replace_wins() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-2025-0007", 7)),
    )
    .await;

    let mut first = standard_payload("QT-2025-0007", 7);
    first["remark"] = json!("first editor");
    let mut second = standard_payload("QT-2025-0007", 7);
    second["remark"] = json!("second editor");

    app.request(Method::PUT, "/api/v1/quotations/QT-2025-0007", Some(first))
        .await;
    app.request(Method::PUT, "/api/v1/quotations/QT-2025-0007", Some(second))
        .await;

    let body = response_json(
        app.request(Method::GET, "/api/v1/quotations/QT-2025-0007", None)
            .await,
    )
    .await;
    assert_eq!(body["data"]["remark"], "second editor");
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-2025-0008", 8)),
    )
    .await;

    let deleted = app
        .request(Method::DELETE, "/api/v1/quotations/QT-2025-0008", None)
        .await;
    assert_eq!(deleted.status(), 200);

    let fetched = app
        .request(Method::GET, "/api/v1/quotations/QT-2025-0008", None)
        .await;
    assert_eq!(fetched.status(), 404);
}

#[tokio::test]
async fn delete_of_unknown_number_is_404() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::DELETE, "/api/v1/quotations/QT-NEVER", None)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn header_only_draft_round_trips() {
    let app = TestApp::new().await;
    let payload = json!({
        "quot_no": "QT-2025-0009",
        "lead_id": 9,
        "date": "2025-08-01",
        "subject": "Pending scope",
        "lines": []
    });
    let created = app
        .request(Method::POST, "/api/v1/quotations", Some(payload))
        .await;
    assert_eq!(created.status(), 201);

    let body = response_json(
        app.request(Method::GET, "/api/v1/quotations/QT-2025-0009", None)
            .await,
    )
    .await;
    let data = &body["data"];
    assert_eq!(data["subject"], "Pending scope");
    assert_eq!(data["lines"].as_array().map(Vec::len), Some(0));
    assert_eq!(decimal(&data["totals"]["subtotal"]), dec!(0));
}

#[tokio::test]
async fn finalized_quotation_can_revert_to_draft() {
    let app = TestApp::new().await;
    let mut payload = standard_payload("QT-2025-0010", 10);
    payload["status"] = json!("final");
    app.request(Method::POST, "/api/v1/quotations", Some(payload))
        .await;

    let mut draft_again = standard_payload("QT-2025-0010", 10);
    draft_again["status"] = json!("draft");
    let replaced = app
        .request(
            Method::PUT,
            "/api/v1/quotations/QT-2025-0010",
            Some(draft_again),
        )
        .await;
    assert_eq!(replaced.status(), 200);

    let body = response_json(
        app.request(Method::GET, "/api/v1/quotations/QT-2025-0010", None)
            .await,
    )
    .await;
    assert_eq!(body["data"]["status"], "draft");
}

#[tokio::test]
async fn list_groups_revisions_per_lead() {
    let app = TestApp::new().await;
    // Lead 1 drafts twice under different numbers, lead 2 once.
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-A", 1)),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-B", 1)),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-C", 2)),
    )
    .await;

    let body = response_json(app.request(Method::GET, "/api/v1/quotations", None).await).await;
    let data = &body["data"];
    assert_eq!(data["total"].as_u64(), Some(2));
    let leads = data["leads"].as_array().expect("leads array");
    assert_eq!(leads.len(), 2);

    // newest lead first
    assert_eq!(leads[0]["lead_id"].as_i64(), Some(2));
    assert_eq!(leads[0]["current"]["quot_no"], "QT-C");
    assert!(leads[0]["history"].as_array().unwrap().is_empty());

    assert_eq!(leads[1]["lead_id"].as_i64(), Some(1));
    assert_eq!(leads[1]["current"]["quot_no"], "QT-B");
    let history = leads[1]["history"].as_array().expect("history array");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["quot_no"], "QT-A");
}

#[tokio::test]
async fn lead_less_quotations_are_not_listed_or_merged() {
    let app = TestApp::new().await;
    // Two unrelated documents with no lead must not be grouped into a
    // shared revision chain under lead 0.
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-Z1", 0)),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-Z2", 0)),
    )
    .await;

    let body = response_json(app.request(Method::GET, "/api/v1/quotations", None).await).await;
    assert_eq!(body["data"]["total"].as_u64(), Some(0));
    assert!(body["data"]["leads"].as_array().unwrap().is_empty());

    // still reachable by quotation number
    let fetched = app.request(Method::GET, "/api/v1/quotations/QT-Z1", None).await;
    assert_eq!(fetched.status(), 200);
}

#[tokio::test]
async fn search_filters_leads_but_returns_all_their_revisions() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-FIND-ME", 1)),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-NEWER", 1)),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-OTHER", 2)),
    )
    .await;

    let body = response_json(
        app.request(Method::GET, "/api/v1/quotations?search=FIND-ME", None)
            .await,
    )
    .await;
    let leads = body["data"]["leads"].as_array().expect("leads array");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["lead_id"].as_i64(), Some(1));
    // the matching lead comes back whole: current is the newer revision
    assert_eq!(leads[0]["current"]["quot_no"], "QT-NEWER");
}

#[tokio::test]
async fn company_is_created_from_draft_and_protected_while_referenced() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-2025-0011", 11)),
    )
    .await;

    let suggestions = response_json(
        app.request(
            Method::GET,
            "/api/v1/companies/autocomplete?term=Acme",
            None,
        )
        .await,
    )
    .await;
    let data = suggestions["data"].as_array().expect("suggestions");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["company_name"], "Acme Interiors");
    let company_id = data[0]["id"].as_i64().expect("company id");

    // referenced by the quotation: deletion is a conflict
    let conflict = app
        .request(
            Method::DELETE,
            &format!("/api/v1/companies/{company_id}"),
            None,
        )
        .await;
    assert_eq!(conflict.status(), 409);

    app.request(Method::DELETE, "/api/v1/quotations/QT-2025-0011", None)
        .await;
    let deleted = app
        .request(
            Method::DELETE,
            &format!("/api/v1/companies/{company_id}"),
            None,
        )
        .await;
    assert_eq!(deleted.status(), 200);
}

#[tokio::test]
async fn drafts_for_the_same_company_share_one_record() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-2025-0012", 12)),
    )
    .await;
    app.request(
        Method::POST,
        "/api/v1/quotations",
        Some(standard_payload("QT-2025-0013", 13)),
    )
    .await;

    let body = response_json(app.request(Method::GET, "/api/v1/companies", None).await).await;
    assert_eq!(body["data"]["total"].as_u64(), Some(1));
}

#[tokio::test]
async fn invalid_inputs_are_rejected() {
    let app = TestApp::new().await;

    let mut negative_price = standard_payload("QT-BAD-1", 90);
    negative_price["lines"][0]["unit_price"] = json!("-5");
    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(negative_price))
        .await;
    assert_eq!(response.status(), 422);

    let mut over_discount = standard_payload("QT-BAD-2", 91);
    over_discount["lines"][0]["discount_percent"] = json!("150");
    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(over_discount))
        .await;
    assert_eq!(response.status(), 422);

    let mut zero_qty = standard_payload("QT-BAD-3", 92);
    zero_qty["lines"][0]["quantity"] = json!(0);
    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(zero_qty))
        .await;
    assert_eq!(response.status(), 422);

    let blank_number = json!({ "quot_no": "   ", "lead_id": 93, "lines": [] });
    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(blank_number))
        .await;
    assert_eq!(response.status(), 422);

    let mut missing_date = standard_payload("QT-BAD-4", 94);
    missing_date.as_object_mut().unwrap().remove("date");
    let response = app
        .request(Method::POST, "/api/v1/quotations", Some(missing_date))
        .await;
    assert_eq!(response.status(), 422);
}
