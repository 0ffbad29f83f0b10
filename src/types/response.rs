use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Success response envelope: `{success, data}`. Error bodies are built by
/// the error type's `IntoResponse` and carry a machine code as well.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Created response helper for POST endpoints
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

/// No content response helper for DELETE endpoints
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_only_data() {
        let value = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "data": 42}));
    }
}
