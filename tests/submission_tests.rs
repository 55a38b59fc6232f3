mod test_utils;

use actix_web::{http::StatusCode, test, App};
use interview_board::{entities::experience::ExperienceStatus, routes::configure_routes};
use serde_json::Value;
use test_utils::{test_state, valid_submission, InMemoryExperienceRepo};

#[actix_rt::test]
async fn valid_submission_is_created_as_pending() {
    let repo = InMemoryExperienceRepo::new();
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let req = test::TestRequest::post()
        .uri("/submissions")
        .set_json(valid_submission())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("reviewed"));
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["company"], "Analytical Engines Ltd");
    assert_eq!(body["data"]["interview_dates"][1]["label"], "Onsite");
    assert!(body["data"].get("consent_given").is_none());

    let id = body["data"]["id"].as_str().unwrap().parse().unwrap();
    let stored = repo.get(id).unwrap();
    assert_eq!(stored.status, ExperienceStatus::Pending);
}

#[actix_rt::test]
async fn client_supplied_status_is_ignored() {
    let repo = InMemoryExperienceRepo::new();
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let mut payload = valid_submission();
    payload["status"] = "approved".into();

    let req = test::TestRequest::post().uri("/submissions").set_json(payload).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["status"], "pending");
}

#[actix_rt::test]
async fn missing_consent_is_rejected_without_storing() {
    let repo = InMemoryExperienceRepo::new();
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let mut payload = valid_submission();
    payload["consent_given"] = false.into();

    let req = test::TestRequest::post().uri("/submissions").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "consent_given");
    assert_eq!(repo.calls(), 0);
    assert_eq!(repo.len(), 0);
}

#[actix_rt::test]
async fn every_violation_is_listed() {
    let repo = InMemoryExperienceRepo::new();
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let payload = serde_json::json!({
        "student_name": "   ",
        "linkedin_url": "https://github.com/ada",
        "interview_questions": "too short",
        "consent_given": true
    });

    let req = test::TestRequest::post().uri("/submissions").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();

    for expected in ["advice_tips", "company", "interview_questions", "linkedin_url", "position", "student_name"] {
        assert!(fields.contains(&expected), "missing {expected} in {fields:?}");
    }
    assert!(!fields.contains(&"consent_given"));
}

#[actix_rt::test]
async fn negative_counts_are_violations() {
    let repo = InMemoryExperienceRepo::new();
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let mut payload = valid_submission();
    payload["technical_interviews"] = (-2).into();

    let req = test::TestRequest::post().uri("/submissions").set_json(payload).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["details"][0]["field"], "technical_interviews");
}

#[actix_rt::test]
async fn non_integer_counts_are_a_payload_error() {
    let repo = InMemoryExperienceRepo::new();
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let mut payload = valid_submission();
    payload["phone_screens"] = "two".into();

    let req = test::TestRequest::post().uri("/submissions").set_json(payload).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repo.len(), 0);
}

#[actix_rt::test]
async fn store_failure_returns_generic_error() {
    let repo = InMemoryExperienceRepo::new();
    repo.set_unavailable(true);
    let app = test::init_service(
        App::new().app_data(test_state(&repo)).configure(configure_routes)
    ).await;

    let req = test::TestRequest::post().uri("/submissions").set_json(valid_submission()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(!body["error"].as_str().unwrap().contains("connection refused"));
}
