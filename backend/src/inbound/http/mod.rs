//! HTTP inbound adapter exposing the enrollment REST endpoints.

pub mod enrollments;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

use actix_web::web;

use crate::domain::Error;

pub use error::ApiResult;

/// JSON extractor configuration reporting malformed bodies as domain errors.
///
/// Without it Actix answers with a plain-text 400; with it the failure uses
/// the same payload and trace header as every other error.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use enrollments::inbound::http::json_config;
///
/// let _app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid request format: {err}"))
            .with_details(serde_json::json!({ "code": "invalid_body" }))
            .into()
    })
}
