//! Response helpers: entities are returned directly with their read-profile
//! fields; deletes acknowledge with a `{code, message}` envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct DeleteAck {
    pub code: u16,
    pub message: String,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// Acknowledge a hard delete. The resource is gone, so the body only names it.
pub fn deleted(label: &str) -> (StatusCode, Json<DeleteAck>) {
    (
        StatusCode::OK,
        Json(DeleteAck {
            code: StatusCode::OK.as_u16(),
            message: format!("{} deleted", label),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_ack_shape() {
        let (status, Json(body)) = deleted("pen");
        assert_eq!(status, StatusCode::OK);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["code"], 200);
        assert_eq!(v["message"], "pen deleted");
    }
}
