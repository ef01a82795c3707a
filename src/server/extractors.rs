//! Custom extractors for the HTTP server.

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        request::Parts,
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ErrorDetail, ErrorResponse};

fn is_msgpack(headers: &HeaderMap, name: axum::http::HeaderName) -> bool {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("msgpack"))
}

/// Encoding requested through the `Accept` header.
///
/// `MessagePack` when the header mentions msgpack, JSON otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    MsgPack,
}

#[async_trait]
impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if is_msgpack(&parts.headers, ACCEPT) {
            Ok(Self::MsgPack)
        } else {
            Ok(Self::Json)
        }
    }
}

/// Rejection type for `ApiBody`
#[derive(Debug)]
pub struct ApiBodyRejection {
    message: String,
}

impl IntoResponse for ApiBodyRejection {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.message, "Rejected request body");
        let body = ErrorResponse {
            error: ErrorDetail {
                code: "DESERIALIZATION_ERROR",
                message: self.message,
            },
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Extractor for JSON or `MessagePack` request bodies.
///
/// Bodies whose content type mentions msgpack (`application/msgpack`,
/// `application/x-msgpack`) are decoded as `MessagePack`; everything else,
/// including a missing content type, is decoded as JSON.
pub struct ApiBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let msgpack = is_msgpack(req.headers(), CONTENT_TYPE);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiBodyRejection {
                message: format!("Failed to read request body: {e}"),
            })?;

        if msgpack {
            rmp_serde::from_slice(&bytes)
                .map(ApiBody)
                .map_err(|e| ApiBodyRejection {
                    message: format!("Failed to deserialize MessagePack: {e}"),
                })
        } else {
            serde_json::from_slice(&bytes)
                .map(ApiBody)
                .map_err(|e| ApiBodyRejection {
                    message: format!("Failed to deserialize JSON: {e}"),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_msgpack_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_msgpack(&headers, ACCEPT));

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!is_msgpack(&headers, ACCEPT));

        headers.insert(ACCEPT, HeaderValue::from_static("application/x-msgpack"));
        assert!(is_msgpack(&headers, ACCEPT));
    }
}
