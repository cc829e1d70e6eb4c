#![allow(dead_code)]

use course_manager::auth::Authenticator;
use course_manager::{Config, Database};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::MockServer;

pub const TEST_PROJECT: &str = "test-project";
pub const TEST_CLIENT_EMAIL: &str = "course-admin@test-project.iam.gserviceaccount.com";
pub const TEST_KEY_ID: &str = "test-key-id";
pub const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_service_account_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("fixtures/test_service_account_pub.pem");

pub fn test_config(mock_server: &MockServer) -> Config {
    Config {
        project_id: Some(TEST_PROJECT.to_string()),
        base_url: format!("{}/v1", mock_server.uri()),
        ..Config::default()
    }
}

/// Database pointed at the mock server with the emulator's fixed token
pub fn emulator_database(mock_server: &MockServer) -> Database {
    Database::with_authenticator(&test_config(mock_server), reqwest::Client::new(), Authenticator::emulator())
        .expect("database for mock server")
}

pub fn collection_path() -> String {
    format!("/v1/projects/{}/databases/(default)/documents/courses", TEST_PROJECT)
}

pub fn commit_path() -> String {
    format!("/v1/projects/{}/databases/(default)/documents:commit", TEST_PROJECT)
}

pub fn document_path(id: &str) -> String {
    format!("{}/{}", collection_path(), id)
}

pub fn document_json(id: &str, code: &str, name: &str) -> Value {
    json!({
        "name": format!("projects/{}/databases/(default)/documents/courses/{}", TEST_PROJECT, id),
        "fields": {
            "code": {"stringValue": code},
            "name": {"stringValue": name},
            "description": {"stringValue": format!("This is the {} course with code {}.", name, code)},
            "category": {"stringValue": code},
            "createdAt": {"timestampValue": "2024-09-01T08:30:00.000001Z"}
        },
        "createTime": "2024-09-01T08:30:00.000001Z",
        "updateTime": "2024-09-01T08:30:00.000001Z"
    })
}

/// Key file whose `token_uri` points at `token_uri`
pub fn write_service_account_key(token_uri: &str) -> NamedTempFile {
    let key = json!({
        "type": "service_account",
        "project_id": TEST_PROJECT,
        "private_key_id": TEST_KEY_ID,
        "private_key": TEST_PRIVATE_KEY,
        "client_email": TEST_CLIENT_EMAIL,
        "client_id": "1234567890",
        "token_uri": token_uri
    });
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(key.to_string().as_bytes()).expect("write key file");
    file
}
