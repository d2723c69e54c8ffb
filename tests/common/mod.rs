#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use blobgate::config::Cli;
use blobgate::{create_router, AppState, Backend, Config};
use tempfile::TempDir;
use tower::ServiceExt;

pub const INDEX_HTML: &str = "<html><body>gateway</body></html>";

/// Temporary workspace with a `data` directory, a `client` UI directory and
/// a file outside the UI root that must never be served.
pub struct TestApp {
    pub temp: TempDir,
    pub router: Router,
}

impl TestApp {
    pub fn data_dir(&self) -> std::path::PathBuf {
        self.temp.path().join("data")
    }
}

pub fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let ui = temp.path().join("client");
    std::fs::create_dir_all(ui.join("css")).unwrap();
    std::fs::write(ui.join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(ui.join("css/site.css"), "body { margin: 0; }").unwrap();
    std::fs::write(temp.path().join("secret.txt"), "top secret").unwrap();
    temp
}

pub fn config_for(root: &Path, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("DATA_DIR".into(), root.join("data").display().to_string());
    vars.insert("UI_DIR".into(), root.join("client").display().to_string());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|name| vars.get(name).cloned(), &Cli::default()).unwrap()
}

pub async fn app_with(extra: &[(&str, &str)]) -> TestApp {
    let temp = workspace();
    let config = config_for(temp.path(), extra);
    let backend = Backend::init(&config.storage).await.unwrap();
    let router = create_router(AppState::new(config, backend));
    TestApp { temp, router }
}

pub async fn local_app() -> TestApp {
    app_with(&[]).await
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub fn form_request(method: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/store")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Store a urlencoded form and return the issued key.
pub async fn store_form(router: &Router, form: &str) -> String {
    let response = send(router, form_request("POST", form)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    text.strip_prefix("OK:")
        .unwrap_or_else(|| panic!("unexpected store response {text:?}"))
        .to_string()
}
