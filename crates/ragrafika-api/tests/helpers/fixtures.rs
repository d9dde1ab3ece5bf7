//! Request bodies and generation API responses used across tests.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

pub const ORIGINAL_BYTES: &[u8] = b"\xFF\xD8\xFForiginal-jpeg";
pub const STYLED_BYTES: &[u8] = b"\xFF\xD8\xFFstyled-jpeg";

pub const SUBMIT_PATH: &str = "/foundationModels/v1/imageGenerationAsync";

pub fn original_base64() -> String {
    STANDARD.encode(ORIGINAL_BYTES)
}

pub fn upload_body(category: Option<&str>) -> Value {
    let mut body = json!({
        "image": original_base64(),
        "title": "Morning",
        "description": "Studio session",
    });
    if let Some(category) = category {
        body["category"] = json!(category);
    }
    body
}

pub fn submitted(operation_id: &str) -> String {
    json!({ "id": operation_id, "done": false }).to_string()
}

pub fn in_progress(operation_id: &str) -> String {
    json!({ "id": operation_id, "done": false }).to_string()
}

pub fn completed(operation_id: &str) -> String {
    json!({
        "id": operation_id,
        "done": true,
        "response": { "image": STANDARD.encode(STYLED_BYTES) }
    })
    .to_string()
}

pub fn operations_path(operation_id: &str) -> String {
    format!("/operations/{}", operation_id)
}
