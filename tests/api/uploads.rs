use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::Value;

use crate::helpers::{as_user, store_with, test_app, FINANCE_MANAGER, MAX_UPLOAD_BYTES};

const BOUNDARY: &str = "----edaratboundary";

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/documents/upload")
        .insert_header(as_user(FINANCE_MANAGER))
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn multipart_upload_keeps_metadata_and_measures_the_file() {
    let app = actix_test::init_service(test_app(store_with(Vec::new()))).await;

    let body = multipart_body(
        &[
            ("title", "Q3 Financial Report"),
            ("department", "Finance"),
            ("type", "Report"),
            ("tags", "finance, quarterly"),
            ("access_type", "public"),
            ("security_level", "Highly Confidential"),
            ("expiry_date", "2030-12-31"),
            ("notify_all_after_approval", "true"),
        ],
        Some(("q3-report.PDF", &[7u8; 300][..])),
    );
    let response = actix_test::call_service(&app, upload_request(body).to_request()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["title"], "Q3 Financial Report");
    assert_eq!(data["file_type"], "pdf");
    assert_eq!(data["file_size"], 300);
    assert_eq!(data["tags"], serde_json::json!(["finance", "quarterly"]));
    assert_eq!(data["access_type"], "public");
    assert_eq!(data["security_level"], "highly_confidential");
    assert_eq!(data["approval_status"], "pending");
    assert_eq!(data["expiry_date"], "2030-12-31T23:59:59Z");
}

#[actix_web::test]
async fn multipart_upload_needs_a_file() {
    let app = actix_test::init_service(test_app(store_with(Vec::new()))).await;

    let body = multipart_body(&[("title", "Orphan"), ("department", "Finance")], None);
    let response = actix_test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn oversized_files_are_refused() {
    let app = actix_test::init_service(test_app(store_with(Vec::new()))).await;

    let too_big = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let body = multipart_body(&[("department", "Finance")], Some(("dump.bin", too_big.as_slice())));
    let response = actix_test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["message"]
        .as_str()
        .map_or(false, |m| m.contains("exceeds maximum limit")));
}
