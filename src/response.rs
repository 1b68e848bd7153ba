/**
 * Success Response Envelope
 *
 * Every successful handler response is wrapped in the same JSON envelope so
 * clients can treat success and error bodies uniformly:
 *
 * ```json
 * {
 *   "statusCode": 200,
 *   "data": { ... },
 *   "message": "Login successful",
 *   "success": true
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Uniform success envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    /// HTTP status code, duplicated into the body
    pub status_code: u16,
    /// Handler payload
    pub data: T,
    /// Human-readable summary
    pub message: String,
    /// Always true for this type
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: true,
        }
    }

    /// Shorthand for a 200 OK envelope
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, data, message)
    }

    /// Shorthand for a 201 Created envelope
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, data, message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_envelope_serialization() {
        let envelope = ApiResponse::ok(serde_json::json!({"id": 1}), "Fetched");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["message"], "Fetched");
        assert_eq!(value["success"], true);
    }

    #[test]
    fn test_created_status() {
        let envelope = ApiResponse::created((), "Account created");
        assert_eq!(envelope.status_code, 201);
        assert!(envelope.success);
    }
}
