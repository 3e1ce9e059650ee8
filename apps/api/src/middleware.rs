use aegis_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiResult;

/// Header carrying the subject asserted by the upstream gateway.
pub const SUBJECT_HEADER: &str = "x-aegis-subject";
/// Optional header carrying the caller's display name.
pub const DISPLAY_NAME_HEADER: &str = "x-aegis-display-name";

pub async fn require_subject(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn identity_from_headers(headers: &HeaderMap) -> AppResult<UserIdentity> {
    let subject = headers
        .get(SUBJECT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(NonEmptyString::new)
        .transpose()
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Unauthorized(format!("{SUBJECT_HEADER} header is required")))?;

    let display_name = headers
        .get(DISPLAY_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(subject.as_str())
        .to_owned();

    Ok(UserIdentity::new(subject.as_str(), display_name))
}
