//! Response construction for the three outcomes a request can have.

use chrono::{DateTime, Months, Utc};
use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, EXPIRES, VARY};
use http::{HeaderValue, Response, StatusCode};

use super::Resolution;
use crate::error::UnfurlError;

pub const INVALID_CLIENT_BODY: &str = "invalid client";

/// IMF-fixdate one year after `now`.
pub fn expires_header(now: DateTime<Utc>) -> String {
    let later = now.checked_add_months(Months::new(12)).unwrap_or(now);
    later.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn plain(status: StatusCode, body: String) -> Response<String> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain;charset=UTF-8"),
    );
    response
}

pub fn unauthorized() -> Response<String> {
    plain(StatusCode::UNAUTHORIZED, INVALID_CLIENT_BODY.to_string())
}

pub fn server_error(err: &UnfurlError) -> Response<String> {
    plain(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// 200 with `{"icon": .., "theme": ..}`, long-lived client caching, and CORS
/// for `origin`.
pub fn ok(
    resolution: &Resolution,
    origin: &str,
    now: DateTime<Utc>,
) -> Result<Response<String>, UnfurlError> {
    let body = serde_json::to_string(resolution)?;
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .header(EXPIRES, expires_header(now))
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, origin)
        .header(VARY, "Origin")
        .body(body)?;
    Ok(response)
}
