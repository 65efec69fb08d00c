use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use edarat_dms::models::documents::ApprovalStatus;
use serde_json::{json, Value};

use crate::helpers::{as_user, document, store_with, test_app, ADMIN, FINANCE_MANAGER, IT_EMPLOYEE};

fn policy_store() -> actix_web::web::Data<edarat_dms::db::DocumentStore> {
    store_with(vec![document("d1", "Code of Conduct", "IT", ApprovalStatus::Approved, 1)])
}

#[actix_web::test]
async fn acknowledging_is_recorded_once_per_user() {
    let app = actix_test::init_service(test_app(policy_store())).await;

    for _ in 0..2 {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/documents/d1/acknowledge")
            .insert_header(as_user(IT_EMPLOYEE))
            .set_json(json!({"signature": "data:image/png;base64,AAAA"}))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["data"]["user_name"], "Omar Hassan");
        assert!(body["data"].get("signature").is_none());
    }

    let audit = actix_test::TestRequest::get()
        .uri("/api/v1/documents/d1/audit")
        .to_request();
    let trail: Value = actix_test::call_and_read_body_json(&app, audit).await;
    let actions: Vec<&str> = trail["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, vec!["acknowledged"]);
}

#[actix_web::test]
async fn acknowledging_needs_a_signature_and_a_known_document() {
    let app = actix_test::init_service(test_app(policy_store())).await;

    let unsigned = actix_test::TestRequest::post()
        .uri("/api/v1/documents/d1/acknowledge")
        .insert_header(as_user(IT_EMPLOYEE))
        .set_json(json!({"signature": " "}))
        .to_request();
    assert_eq!(actix_test::call_service(&app, unsigned).await.status(), StatusCode::BAD_REQUEST);

    let missing = actix_test::TestRequest::post()
        .uri("/api/v1/documents/ghost/acknowledge")
        .insert_header(as_user(IT_EMPLOYEE))
        .set_json(json!({"signature": "signed"}))
        .to_request();
    assert_eq!(actix_test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);

    let anonymous = actix_test::TestRequest::post()
        .uri("/api/v1/documents/d1/acknowledge")
        .set_json(json!({"signature": "signed"}))
        .to_request();
    assert_eq!(actix_test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn acceptance_status_splits_accepted_from_pending() {
    let app = actix_test::init_service(test_app(policy_store())).await;

    let accept = actix_test::TestRequest::post()
        .uri("/api/v1/documents/d1/acknowledge")
        .insert_header(as_user(FINANCE_MANAGER))
        .set_json(json!({"signature": "signed"}))
        .to_request();
    assert_eq!(actix_test::call_service(&app, accept).await.status(), StatusCode::OK);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents/d1/acknowledgements")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["data"]["title"], "Code of Conduct");
    assert_eq!(body["data"]["accepted"][0]["user_id"], FINANCE_MANAGER);
    let pending: Vec<&str> = body["data"]["pending"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(pending, vec![ADMIN, IT_EMPLOYEE]);
}

#[actix_web::test]
async fn reminders_reach_only_pending_users() {
    let app = actix_test::init_service(test_app(policy_store())).await;

    let accept = actix_test::TestRequest::post()
        .uri("/api/v1/documents/d1/acknowledge")
        .insert_header(as_user(IT_EMPLOYEE))
        .set_json(json!({"signature": "signed"}))
        .to_request();
    assert_eq!(actix_test::call_service(&app, accept).await.status(), StatusCode::OK);

    let remind = actix_test::TestRequest::post()
        .uri("/api/v1/documents/d1/acknowledgements/remind")
        .insert_header(as_user(ADMIN))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, remind).await;
    assert_eq!(
        body["data"],
        json!({"document_id": "d1", "recipients": ["admin@edaratgroup.com", "fin-mgr@edaratgroup.com"]})
    );

    let audit = actix_test::TestRequest::get()
        .uri("/api/v1/documents/d1/audit")
        .to_request();
    let trail: Value = actix_test::call_and_read_body_json(&app, audit).await;
    assert_eq!(trail["data"][1]["action"], "acknowledgement_reminded");
    assert_eq!(trail["data"][1]["actor"], "Ahmed Al-Rashid");
}
