/**
 * Error Conversion
 *
 * This module converts `ApiError` values into HTTP responses so handlers can
 * return them directly with `?`.
 *
 * # Response Format
 *
 * Errors are rendered in the same envelope as successful responses:
 *
 * ```json
 * {
 *   "statusCode": 409,
 *   "data": null,
 *   "message": "Email already registered",
 *   "success": false
 * }
 * ```
 */

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures keep their details out of the response body
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", self);
        }

        let body = serde_json::json!({
            "statusCode": status.as_u16(),
            "data": serde_json::Value::Null,
            "message": self.public_message(),
            "success": false,
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}
