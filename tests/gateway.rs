//! Gateway tests against the local filesystem backend

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use blobgate::ObjectKey;
use common::*;

#[tokio::test]
async fn test_store_then_retrieve() {
    let app = local_app().await;

    let key = store_form(&app.router, "r=hello+world").await;
    assert!(ObjectKey::parse(&key).is_ok(), "bad key {key:?}");

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(body_text(response).await, "hello world");
}

#[tokio::test]
async fn test_store_accepts_put() {
    let app = local_app().await;

    let response = send(&app.router, form_request("PUT", "r=via+put")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    let key = text.strip_prefix("OK:").unwrap();

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(body_text(response).await, "via put");
}

#[tokio::test]
async fn test_store_multipart_binary_payload() {
    let app = local_app().await;
    let payload: Vec<u8> = (0u8..=255).collect();

    let mut body = Vec::new();
    body.extend_from_slice(b"--XBOUNDARYX\r\n");
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"other\"\r\n\r\nignored\r\n");
    body.extend_from_slice(b"--XBOUNDARYX\r\n");
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"r\"; filename=\"blob.bin\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(&payload);
    body.extend_from_slice(b"\r\n--XBOUNDARYX--\r\n");

    let request = Request::builder()
        .method("POST")
        .uri("/store")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARYX")
        .body(Body::from(body))
        .unwrap();
    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    let key = text.strip_prefix("OK:").unwrap();

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(body_bytes(response).await, payload);
}

#[tokio::test]
async fn test_store_form_keeps_raw_bytes() {
    let app = local_app().await;

    let key = store_form(&app.router, "r=%FF%FE%00A").await;

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, vec![0xFF, 0xFE, 0x00, 0x41]);
}

#[tokio::test]
async fn test_repeated_field_keeps_first_value() {
    let app = local_app().await;

    let key = store_form(&app.router, "r=first&r=second").await;

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "first");
}

#[tokio::test]
async fn test_missing_field_stores_empty_payload() {
    let app = local_app().await;

    let key = store_form(&app.router, "other=1").await;

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_each_store_gets_a_new_key() {
    let app = local_app().await;

    let first = store_form(&app.router, "r=same").await;
    let second = store_form(&app.router, "r=same").await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_unknown_key_is_not_found() {
    let app = local_app().await;
    let key = ObjectKey::generate();

    let response = send(&app.router, get_request(&format!("/get/{key}"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "FAIL");
}

#[tokio::test]
async fn test_malformed_keys_are_not_found() {
    let app = local_app().await;

    for uri in [
        "/get/",
        "/get/short",
        "/get/..%2F..%2Fsecret.txt",
        "/get/%2E%2E%2F%2E%2E%2F%2E%2E%2Fsecret.txt",
    ] {
        let response = send(&app.router, get_request(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_text(response).await, "FAIL", "{uri}");
    }
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let app = local_app().await;
    std::fs::remove_dir_all(app.data_dir()).unwrap();

    let response = send(&app.router, form_request("POST", "r=lost")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "FAIL");
}

#[tokio::test]
async fn test_store_requires_form_content_type() {
    let app = local_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/store")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("r=hello"))
        .unwrap();
    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_text(response).await, "FAIL");
}

#[tokio::test]
async fn test_payload_size_limit() {
    let app = app_with(&[("MAX_PAYLOAD_BYTES", "16")]).await;

    let form = format!("r={}", "x".repeat(100));
    let response = send(&app.router, form_request("POST", &form)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_serves_index() {
    let app = local_app().await;

    let response = send(&app.router, get_request("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(body_text(response).await, INDEX_HTML);
}

#[tokio::test]
async fn test_missing_index() {
    let app = local_app().await;
    std::fs::remove_file(app.temp.path().join("client/index.html")).unwrap();

    let response = send(&app.router, get_request("/")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Couldn't read user interface");
}

#[tokio::test]
async fn test_serves_resource() {
    let app = local_app().await;

    let response = send(&app.router, get_request("/c/css/site.css")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    assert_eq!(body_text(response).await, "body { margin: 0; }");
}

#[tokio::test]
async fn test_resource_traversal_is_forbidden() {
    let app = local_app().await;

    for uri in [
        "/c/../secret.txt",
        "/c/css/../../secret.txt",
        "/c/%2E%2E/secret.txt",
        "/c//etc/passwd",
    ] {
        let response = send(&app.router, get_request(uri)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        assert_ne!(body_text(response).await, "top secret", "{uri}");
    }
}

#[tokio::test]
async fn test_missing_resource() {
    let app = local_app().await;

    for uri in ["/c/missing.css", "/c/css", "/c/"] {
        let response = send(&app.router, get_request(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = local_app().await;

    let response = send(&app.router, get_request("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backend"], "local");
}
