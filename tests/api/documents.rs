use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use edarat_dms::models::documents::ApprovalStatus;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use serde_json::{json, Value};

use crate::helpers::{as_user, document, store_with, test_app, ADMIN, FINANCE_MANAGER, IT_EMPLOYEE};

fn mixed_documents() -> Vec<edarat_dms::models::documents::Document> {
    vec![
        document("d1", "Budget Plan 2024", "Finance", ApprovalStatus::Pending, 1),
        document("d2", "Network Policy", "IT", ApprovalStatus::Approved, 2),
        document("d3", "Expense Guidelines", "Finance", ApprovalStatus::Pending, 3),
        document("d4", "Audit Report", "Finance", ApprovalStatus::Approved, 4),
        document("d5", "Vendor Contract", "Legal", ApprovalStatus::Pending, 5),
    ]
}

fn titles(documents: &Value) -> Vec<&str> {
    documents
        .as_array()
        .map(|docs| docs.iter().filter_map(|d| d["title"].as_str()).collect())
        .unwrap_or_default()
}

#[actix_web::test]
async fn admins_see_documents_grouped_by_department() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents")
        .insert_header(as_user(ADMIN))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    let data = &body["data"];
    assert_eq!(data["layout"], "grouped");
    assert_eq!(data["total"], 5);
    let groups = data["groups"].as_array().expect("groups");
    let names: Vec<&str> = groups.iter().filter_map(|g| g["department"]["name"].as_str()).collect();
    assert_eq!(names, vec!["Finance", "IT", "Legal"]);
    assert_eq!(groups[0]["department"]["color"], "#F59E0B");
    assert_eq!(groups[0]["documents"][0]["can_delete"], true);
    assert!(body.get("pagination").is_none());
}

#[actix_web::test]
async fn employees_get_a_flat_page_without_approval_status() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents?sort_by=title&sort_order=asc&per_page=2&page=1")
        .insert_header(as_user(IT_EMPLOYEE))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    let data = &body["data"];
    assert_eq!(data["layout"], "flat");
    assert_eq!(data["total"], 5);
    assert_eq!(titles(&data["documents"]), vec!["Audit Report", "Budget Plan 2024"]);
    assert!(data["documents"][0].get("approval_status").is_none());
    assert_eq!(data["documents"][0]["can_approve"], false);
    assert_eq!(body["pagination"]["total_pages"], 3);
}

#[actix_web::test]
async fn bulk_mode_limits_managers_to_pending_documents() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents?bulk_mode=true")
        .insert_header(as_user(FINANCE_MANAGER))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["data"]["total"], 3);
    let statuses: Vec<&str> = body["data"]["documents"]
        .as_array()
        .expect("documents")
        .iter()
        .filter_map(|d| d["approval_status"].as_str())
        .collect();
    assert_eq!(statuses, vec!["pending"; 3]);
}

#[actix_web::test]
async fn facets_and_query_narrow_the_listing() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents?department=Finance&q=PLAN&date_range=Last%207%20days")
        .insert_header(as_user(FINANCE_MANAGER))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(titles(&body["data"]["documents"]), vec!["Budget Plan 2024"]);
}

#[actix_web::test]
async fn uploaded_documents_can_be_found_by_title() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;
    let description: String = Sentence(4..8).fake();

    let upload = actix_test::TestRequest::post()
        .uri("/api/v1/documents")
        .insert_header(as_user(FINANCE_MANAGER))
        .set_json(json!({
            "documents": [{
                "title": "Zephyr Migration Runbook",
                "description": description,
                "type": "Procedure",
                "department": "IT",
                "file_type": "PDF",
                "tags": ["ops, runbook", "ops"]
            }]
        }))
        .to_request();
    let response = actix_test::call_service(&app, upload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(response).await;
    assert_eq!(created["data"][0]["uploaded_by"], "Sarah Johnson");
    assert_eq!(created["data"][0]["tags"], json!(["ops", "runbook"]));
    assert_eq!(created["data"][0]["file_type"], "pdf");

    let search = actix_test::TestRequest::get()
        .uri("/api/v1/documents?q=zephyr%20migration")
        .insert_header(as_user(IT_EMPLOYEE))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, search).await;
    assert_eq!(titles(&body["data"]["documents"]), vec!["Zephyr Migration Runbook"]);
}

#[actix_web::test]
async fn uploads_with_a_blank_title_are_rejected() {
    let app = actix_test::init_service(test_app(store_with(Vec::new()))).await;

    let upload = actix_test::TestRequest::post()
        .uri("/api/v1/documents")
        .insert_header(as_user(ADMIN))
        .set_json(json!({"documents": [{"title": "   ", "department": "IT"}]}))
        .to_request();
    let response = actix_test::call_service(&app, upload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn duplicate_upload_ids_conflict() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let upload = actix_test::TestRequest::post()
        .uri("/api/v1/documents")
        .insert_header(as_user(ADMIN))
        .set_json(json!({"documents": [{"id": "d1", "title": "Again", "department": "IT"}]}))
        .to_request();
    let response = actix_test::call_service(&app, upload).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn requests_without_a_known_user_are_unauthorized() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let anonymous = actix_test::TestRequest::get().uri("/api/v1/documents").to_request();
    assert_eq!(actix_test::call_service(&app, anonymous).await.status(), StatusCode::UNAUTHORIZED);

    let stranger = actix_test::TestRequest::get()
        .uri("/api/v1/documents")
        .insert_header(as_user("u-ghost"))
        .to_request();
    let response = actix_test::call_service(&app, stranger).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn stats_follow_the_visible_set() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents/stats?department=Finance")
        .insert_header(as_user(FINANCE_MANAGER))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["pending"], 2);
    assert_eq!(body["data"]["approved"], 1);
    assert_eq!(body["data"]["departments"], 1);
    assert_eq!(body["data"]["my_department"], 3);
    assert_eq!(body["data"]["recent_uploads"], 3);
}

#[actix_web::test]
async fn suggestions_rank_documents_before_departments() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents/suggestions?q=fin")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    let kinds: Vec<&str> = body["data"]
        .as_array()
        .expect("suggestions")
        .iter()
        .filter_map(|s| s["kind"].as_str())
        .collect();
    assert_eq!(kinds.last(), Some(&"department"));
    assert_eq!(body["data"][kinds.len() - 1]["count"], 3);
}

#[actix_web::test]
async fn viewing_shows_detail_and_leaves_an_audit_entry() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let view = actix_test::TestRequest::get()
        .uri("/api/v1/documents/d2")
        .insert_header(as_user(ADMIN))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, view).await;
    assert_eq!(body["data"]["title"], "Network Policy");
    assert_eq!(body["data"]["show_history"], true);
    assert_eq!(body["data"]["can_view_content"], true);

    let trail = actix_test::TestRequest::get().uri("/api/v1/documents/d2/audit").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, trail).await;
    assert_eq!(body["data"][0]["action"], "viewed");
    assert_eq!(body["data"][0]["actor"], "Ahmed Al-Rashid");
}

#[actix_web::test]
async fn metadata_edits_merge_tags_and_check_collaborators() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let edit = actix_test::TestRequest::patch()
        .uri("/api/v1/documents/d1")
        .insert_header(as_user(FINANCE_MANAGER))
        .set_json(json!({
            "title": "Budget Plan 2025",
            "add_tags": "budget, internal, , budget",
            "add_collaborators": ["u-it-emp"],
            "security_level": "confidential"
        }))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, edit).await;
    assert_eq!(body["data"]["title"], "Budget Plan 2025");
    assert_eq!(body["data"]["tags"], json!(["internal", "budget"]));
    assert_eq!(body["data"]["collaborators"], json!(["u-it-emp"]));
    assert_eq!(body["data"]["security_level"], "confidential");

    let clear = actix_test::TestRequest::patch()
        .uri("/api/v1/documents/d1")
        .insert_header(as_user(FINANCE_MANAGER))
        .set_json(json!({"security_level": null}))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, clear).await;
    assert!(body["data"]["security_level"].is_null());

    let unknown = actix_test::TestRequest::patch()
        .uri("/api/v1/documents/d1")
        .insert_header(as_user(FINANCE_MANAGER))
        .set_json(json!({"add_collaborators": ["u-nobody"]}))
        .to_request();
    let response = actix_test::call_service(&app, unknown).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleting_removes_the_document_once() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let delete = || {
        actix_test::TestRequest::delete()
            .uri("/api/v1/documents/d4")
            .insert_header(as_user(ADMIN))
            .to_request()
    };
    assert_eq!(actix_test::call_service(&app, delete()).await.status(), StatusCode::OK);
    assert_eq!(actix_test::call_service(&app, delete()).await.status(), StatusCode::NOT_FOUND);

    let trail = actix_test::TestRequest::get().uri("/api/v1/documents/d4/audit").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, trail).await;
    assert_eq!(body["data"][0]["action"], "deleted");

    let missing = actix_test::TestRequest::get().uri("/api/v1/documents/nope/audit").to_request();
    assert_eq!(actix_test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn a_page_far_past_the_end_is_empty() {
    let app = actix_test::init_service(test_app(store_with(mixed_documents()))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/documents?page=18446744073709551615&per_page=10")
        .insert_header(as_user(IT_EMPLOYEE))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["documents"], json!([]));
}

#[actix_web::test]
async fn status_and_security_facets_filter_the_listing() {
    let mut labelled = mixed_documents();
    labelled[0].security_level = Some(edarat_dms::models::documents::SecurityLevel::Confidential);
    let app = actix_test::init_service(test_app(store_with(labelled))).await;

    let approved = actix_test::TestRequest::get()
        .uri("/api/v1/documents?status=approved&sort_by=title&sort_order=asc")
        .insert_header(as_user(FINANCE_MANAGER))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, approved).await;
    assert_eq!(titles(&body["data"]["documents"]), vec!["Audit Report", "Network Policy"]);

    let internal = actix_test::TestRequest::get()
        .uri("/api/v1/documents?security_level=internal&department=Finance")
        .insert_header(as_user(FINANCE_MANAGER))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, internal).await;
    assert_eq!(body["data"]["total"], 2);

    let confidential = actix_test::TestRequest::get()
        .uri("/api/v1/documents?security_level=confidential")
        .insert_header(as_user(FINANCE_MANAGER))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, confidential).await;
    assert_eq!(titles(&body["data"]["documents"]), vec!["Budget Plan 2024"]);
}
