use super::*;
use crate::config::ServiceConfig;
use crate::request::MockHttpClient;
use crate::session::MemoryStore;
use serde_json::{Value, json};

const GET_DONOR: &str = "http://localhost:8000/donor/v1/getDonor";
const FIND_RECIPIENTS: &str = "http://localhost:9898/recipient/v1/findRecipients";
const MATCH: &str = "http://localhost:8000/match/getBest";
const CREATE_DONATION: &str = "http://localhost:8000/donation/v1/createDonation";

fn gateway() -> Gateway<MockHttpClient, MemoryStore> {
    Gateway::new(
        MockHttpClient::new(),
        MemoryStore::signed_in("5", "tok"),
        ServiceConfig::default(),
    )
}

fn donor_json() -> Value {
    json!({
        "id": 5,
        "name": "Corner Cafe",
        "address": "1 Main St",
        "location": { "latitude": 37.7, "longitude": -122.4 },
        "contact": { "email": "cafe@x.com", "phone": "555-0100" }
    })
}

fn recipient_json(id: Value, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "address": "2 Side St",
        "location": { "latitude": 37.8, "longitude": -122.3 },
        "capabilities": ["refrigeration"],
        "contact": { "email": "r@x.org", "phone": "555-0101" }
    })
}

fn form() -> DonationForm {
    DonationForm {
        name: "Vegetable soup".to_string(),
        quantity: "40".to_string(),
        donation_pickup_time: "2025-06-01T12:00".to_string(),
        ..Default::default()
    }
}

async fn found(gw: &Gateway<MockHttpClient, MemoryStore>) -> DonationWorkflow {
    gw.client().mock_response(GET_DONOR, 200, donor_json());
    gw.client().mock_response(
        FIND_RECIPIENTS,
        200,
        json!([recipient_json(json!(11), "Food Bank"), recipient_json(json!("12"), "Shelter")]),
    );

    let mut wf = DonationWorkflow::new();
    wf.submit(gw, &form()).await.unwrap();
    wf
}

#[tokio::test]
async fn submit_fetches_donor_then_candidates() {
    let gw = gateway();
    let wf = found(&gw).await;

    assert_eq!(wf.stage(), Stage::RecipientsFound);
    assert_eq!(wf.candidates().len(), 2);
    assert_eq!(wf.candidates()[0].special_capabilities, vec!["refrigeration"]);
    assert_eq!(gw.client().request_urls(), vec![GET_DONOR, FIND_RECIPIENTS]);

    let body = gw.client().last_request().json_body();
    assert_eq!(body["donor"]["name"], "Corner Cafe");
    assert_eq!(body["donation"]["quantity"], 40);
    let pickup = body["donation"]["donation_pickup_time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(pickup).is_ok());
}

#[tokio::test]
async fn candidates_with_null_accepted_type_fields_still_load() {
    let gw = gateway();
    gw.client().mock_response(GET_DONOR, 200, donor_json());
    let mut sparse = recipient_json(json!(13), "Pantry");
    sparse["accepted_types"] = json!([{ "type": "raw", "unit": null, "min_quantity": 0 }]);
    let mut unnamed = recipient_json(json!(14), "");
    unnamed["name"] = Value::Null;
    unnamed["accepted_types"] = json!([{ "type": null, "unit": "kg", "min_quantity": null }]);
    gw.client()
        .mock_response(FIND_RECIPIENTS, 200, json!([sparse, unnamed]));

    let mut wf = DonationWorkflow::new();
    wf.submit(&gw, &form()).await.unwrap();

    assert_eq!(wf.stage(), Stage::RecipientsFound);
    let candidates = wf.candidates();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].accepted_types[0].kind, "raw");
    assert_eq!(candidates[0].accepted_types[0].unit, "");
    assert_eq!(candidates[1].name, "");
    assert_eq!(candidates[1].accepted_types[0].kind, "");
    assert_eq!(candidates[1].accepted_types[0].min_quantity, 0);
}

#[tokio::test]
async fn missing_donor_id_fails_without_requests() {
    let gw = Gateway::new(
        MockHttpClient::new(),
        MemoryStore::new(),
        ServiceConfig::default(),
    );
    let mut wf = DonationWorkflow::new();

    let err = wf.submit(&gw, &form()).await.unwrap_err();

    assert_eq!(err.to_string(), "Donor ID not found in localStorage.");
    assert_eq!(wf.stage(), Stage::Idle);
    assert!(gw.client().requests.borrow().is_empty());
}

#[tokio::test]
async fn invalid_pickup_time_returns_to_idle() {
    let gw = gateway();
    gw.client().mock_response(GET_DONOR, 200, donor_json());
    let mut wf = DonationWorkflow::new();

    let err = wf
        .submit(
            &gw,
            &DonationForm {
                donation_pickup_time: "not a date".to_string(),
                ..form()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid pickup time format.");
    assert_eq!(wf.stage(), Stage::Idle);
    assert!(wf.donor().is_none());
    assert_eq!(gw.client().request_urls(), vec![GET_DONOR]);
}

#[tokio::test]
async fn recipient_search_error_is_surfaced_verbatim() {
    let gw = gateway();
    gw.client().mock_response(GET_DONOR, 200, donor_json());
    gw.client()
        .mock_text(FIND_RECIPIENTS, 500, "no recipients in range");
    let mut wf = DonationWorkflow::new();

    let err = wf.submit(&gw, &form()).await.unwrap_err();

    assert_eq!(err.to_string(), "Server Error 500: no recipients in range");
    assert_eq!(wf.stage(), Stage::Idle);
}

#[tokio::test]
async fn unauthorized_donor_fetch_signs_out() {
    let gw = gateway();
    gw.client().mock_text(GET_DONOR, 401, "");
    let mut wf = DonationWorkflow::new();

    let err = wf.submit(&gw, &form()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(gw.store().is_empty());
    assert_eq!(wf.stage(), Stage::Idle);
}

#[tokio::test]
async fn ai_match_requires_candidates() {
    let gw = gateway();
    let mut wf = DonationWorkflow::new();

    let err = wf.request_ai_match(&gw).await.unwrap_err();

    assert_eq!(err.to_string(), "No recipients found to match with AI");

    gw.client().mock_response(GET_DONOR, 200, donor_json());
    gw.client().mock_response(FIND_RECIPIENTS, 200, json!([]));
    wf.submit(&gw, &form()).await.unwrap();
    assert!(wf.request_ai_match(&gw).await.is_err());
    assert_eq!(wf.stage(), Stage::RecipientsFound);
}

#[tokio::test]
async fn ai_match_then_accept_creates_the_donation() {
    let gw = gateway();
    let mut wf = found(&gw).await;
    gw.client().mock_response(
        MATCH,
        200,
        json!({
            "recipient_id": "12",
            "recipient_name": "Shelter",
            "justification": "Closest with cold storage"
        }),
    );
    gw.client().mock_response(CREATE_DONATION, 201, json!({}));

    wf.request_ai_match(&gw).await.unwrap();
    assert_eq!(wf.stage(), Stage::AiMatched);
    assert_eq!(wf.recommended_recipient().unwrap().name, "Shelter");

    let match_body = gw.client().last_request().json_body();
    assert_eq!(match_body["eligible_recipients"][0]["id"], "11");
    assert_eq!(match_body["donor"]["id"], "5");

    wf.accept_recommendation(&gw).await.unwrap();

    assert_eq!(wf.stage(), Stage::DonationCreated);
    assert!(wf.candidates().is_empty());
    assert!(wf.recommendation().is_none());
    let body = gw.client().last_request().json_body();
    assert_eq!(body["recipient"]["name"], "Shelter");
    assert_eq!(body["recipient"]["id"], "12");
}

#[tokio::test]
async fn recommendation_outside_the_candidates_cannot_be_accepted() {
    let gw = gateway();
    let mut wf = found(&gw).await;
    gw.client().mock_response(
        MATCH,
        200,
        json!({ "recipient_id": 99, "recipient_name": "Elsewhere" }),
    );

    wf.request_ai_match(&gw).await.unwrap();
    assert!(wf.recommended_recipient().is_none());

    let err = wf.accept_recommendation(&gw).await.unwrap_err();

    assert_eq!(err.to_string(), "Recommended recipient not found");
    assert_eq!(wf.stage(), Stage::AiMatched);
    assert!(!gw.client().request_urls().contains(&CREATE_DONATION.to_string()));
}

#[tokio::test]
async fn accept_without_recommendation_is_refused() {
    let gw = gateway();
    let mut wf = found(&gw).await;

    let err = wf.accept_recommendation(&gw).await.unwrap_err();

    assert_eq!(err.to_string(), "No AI recommendation available");
}

#[tokio::test]
async fn ai_failure_keeps_the_candidates() {
    let gw = gateway();
    let mut wf = found(&gw).await;
    gw.client().mock_text(MATCH, 503, "model offline");

    assert!(wf.request_ai_match(&gw).await.is_err());

    assert_eq!(wf.stage(), Stage::RecipientsFound);
    assert_eq!(wf.candidates().len(), 2);
}

#[tokio::test]
async fn failed_creation_stays_in_the_prior_stage() {
    let gw = gateway();
    let mut wf = found(&gw).await;
    gw.client()
        .mock_text(CREATE_DONATION, 500, "database unavailable");

    let err = wf
        .select_recipient(&gw, &RecordId::from(11))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Server Error 500: database unavailable");
    assert_eq!(wf.stage(), Stage::RecipientsFound);
    assert_eq!(wf.candidates().len(), 2);

    gw.client().mock_response(CREATE_DONATION, 200, json!({}));
    wf.select_recipient(&gw, &RecordId::from("11")).await.unwrap();
    assert_eq!(wf.stage(), Stage::DonationCreated);
}

#[tokio::test]
async fn resubmitting_resets_previous_state() {
    let gw = gateway();
    let mut wf = found(&gw).await;
    gw.client()
        .mock_response(MATCH, 200, json!({ "recipient_id": 11, "recipient_name": "Food Bank" }));
    wf.request_ai_match(&gw).await.unwrap();

    gw.client().mock_response(FIND_RECIPIENTS, 200, json!([]));
    wf.submit(&gw, &form()).await.unwrap();

    assert_eq!(wf.stage(), Stage::RecipientsFound);
    assert!(wf.recommendation().is_none());
    assert!(wf.candidates().is_empty());
}
