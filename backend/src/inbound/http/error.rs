//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while giving every failure the
//! same wire shape: a JSON object with a single `error` field. Internal
//! detail never reaches the client; it is logged here and replaced with a
//! generic message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned for any internal failure, whatever its cause.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Fixed JSON envelope for every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description.
    #[schema(example = "User not found")]
    pub error: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing message: internal detail stays in the logs.
fn client_message(err: &Error) -> String {
    if err.code() == ErrorCode::InternalError {
        INTERNAL_ERROR_MESSAGE.to_owned()
    } else {
        err.message().to_owned()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(
                detail = %self.message(),
                trace_id = ?TraceId::current(),
                "request failed with internal error"
            );
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: client_message(self),
        })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn body_json(response: HttpResponse) -> Value {
        let bytes = to_bytes(response.into_body())
            .await
            .expect("response body is in memory");
        serde_json::from_slice(&bytes).expect("body is JSON")
    }

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] code: ErrorCode, #[case] expected: StatusCode) {
        assert_eq!(status_for(code), expected);
        assert_eq!(Error::new(code, "message").status_code(), expected);
    }

    #[tokio::test]
    async fn not_found_keeps_its_message() {
        let response = Error::not_found("User not found").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "User not found" })
        );
    }

    #[tokio::test]
    async fn invalid_request_keeps_its_message() {
        let response = Error::invalid_request("user_id must be a positive integer").error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "user_id must be a positive integer" })
        );
    }

    #[tokio::test]
    async fn internal_detail_is_redacted() {
        let response = Error::internal("pool timed out talking to pg").error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal server error" })
        );
    }
}
