//! Helpers for driving the router in handler tests.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};

use crate::config::AppConfig;
use crate::storage::csv::test_utils::TestEnvironment;
use crate::{create_router, initialize_backend};

const BOUNDARY: &str = "----registration-test-boundary";

/// One part of a multipart test body
pub struct FormPart<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    content: &'a [u8],
}

impl<'a> FormPart<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, file_name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content,
        }
    }
}

/// Router wired to a fresh temporary data directory.
/// The environment must outlive the router's use.
pub async fn test_app() -> (Router, TestEnvironment) {
    test_app_with_upload_limit(AppConfig::default().max_upload_bytes).await
}

/// Like [`test_app`], with a custom request body limit
pub async fn test_app_with_upload_limit(max_upload_bytes: usize) -> (Router, TestEnvironment) {
    let env = TestEnvironment::new().await.unwrap();
    let config = AppConfig {
        data_dir: env.base_directory().to_path_buf(),
        public_dir: env.base_directory().join("public"),
        max_upload_bytes,
        ..AppConfig::default()
    };

    let state = initialize_backend(&config).await.unwrap();
    let router = create_router(state, &config).unwrap();
    (router, env)
}

/// Build a `POST /api/register` request carrying `parts`
pub fn register_request(parts: &[FormPart<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Build a `GET` request for `uri`
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
