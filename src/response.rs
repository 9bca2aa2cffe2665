//! Error body helpers shared by handlers, middleware, and the panic responder.

use serde::Serialize;

/// Message shown in place of server error detail in production mode.
pub const REDACTED_SERVER_ERROR: &str = "server error";

/// Client error body: `{"error": "<message>"}`.
#[derive(Serialize, Debug)]
pub struct ErrorMessage {
    pub error: String,
}

/// Server error body: `{"error": {"message": "<detail>"}}`.
#[derive(Serialize, Debug)]
pub struct ServerErrorBody {
    pub error: ServerErrorDetail,
}

#[derive(Serialize, Debug)]
pub struct ServerErrorDetail {
    pub message: String,
}

pub fn error_message(message: &str) -> ErrorMessage {
    ErrorMessage {
        error: message.to_string(),
    }
}

pub fn server_error_body(detail: &str) -> ServerErrorBody {
    ServerErrorBody {
        error: ServerErrorDetail {
            message: detail.to_string(),
        },
    }
}
