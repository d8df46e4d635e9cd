use serde::Serialize;

use crate::shared::errors::AppError;

pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// Transport-neutral reply for one `/api` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorznabResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl TorznabResponse {
    pub fn xml(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_XML,
            body,
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn from_error(error: &AppError) -> Self {
        let status = match error {
            AppError::Unauthorized(_) => 403,
            AppError::InvalidInput(_) | AppError::ValidationError(_) => 400,
            AppError::NotFound(_) => 404,
            _ => 500,
        };
        Self::text(status, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let response = TorznabResponse::from_error(&AppError::InvalidInput("limit".to_string()));
        assert_eq!(response.status, 400);
        assert!(!response.is_success());

        let response = TorznabResponse::from_error(&AppError::InternalError("x".to_string()));
        assert_eq!(response.status, 500);
        assert_eq!(response.content_type, CONTENT_TYPE_TEXT);
    }
}
