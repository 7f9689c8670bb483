//! Uniform success envelope.
//!
//! Every successful enrollment response has the shape
//! `{ "status": <http code>, "message": "success", "data": ..., "meta": ... }`
//! with `meta` omitted when the endpoint has none.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// Message attached to every successful response.
pub const SUCCESS_MESSAGE: &str = "success";

/// Success envelope wrapping a payload and optional metadata.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use enrollments::inbound::http::envelope::ResponseEnvelope;
///
/// let envelope = ResponseEnvelope::new(StatusCode::CREATED, "payload");
/// let value = serde_json::to_value(&envelope).expect("serialises");
/// assert_eq!(value["status"], 201);
/// assert!(value.get("meta").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope<T, M = ()> {
    status: u16,
    message: &'static str,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<M>,
}

impl<T> ResponseEnvelope<T> {
    /// Wrap `data` without metadata.
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: SUCCESS_MESSAGE,
            data,
            meta: None,
        }
    }

    /// Attach metadata to the envelope.
    pub fn with_meta<M>(self, meta: M) -> ResponseEnvelope<T, M> {
        ResponseEnvelope {
            status: self.status,
            message: self.message,
            data: self.data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize, M: Serialize> ResponseEnvelope<T, M> {
    /// Render the envelope as a JSON response carrying its status code.
    pub fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn metadata_is_serialised_when_present() {
        let envelope = ResponseEnvelope::new(StatusCode::OK, vec![1, 2]).with_meta(json!({
            "page": 1
        }));
        let value = serde_json::to_value(&envelope).expect("serialises");
        assert_eq!(
            value,
            json!({
                "status": 200,
                "message": "success",
                "data": [1, 2],
                "meta": { "page": 1 },
            })
        );
    }

    #[rstest]
    fn response_uses_envelope_status() {
        let response = ResponseEnvelope::new(StatusCode::CREATED, "x").into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
