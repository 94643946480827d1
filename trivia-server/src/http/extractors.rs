//! Custom Axum extractors
//!
//! Map axum's plain-text rejections onto the JSON error envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose rejections become envelope errors.
///
/// Missing or ill-typed fields are 422; unparseable bodies and a missing
/// JSON content type are 400.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(e)) => Err(ApiError::unprocessable(e.body_text())),
            Err(e) => Err(ApiError::BadRequest {
                reason: e.body_text(),
            }),
        }
    }
}

/// JSON body where every rejection is 422.
///
/// For handlers that treat any failure to read their input, including an
/// unparseable body or a missing content type, as unprocessable.
pub struct UnprocessableJson<T>(pub T);

impl<T, S> FromRequest<S> for UnprocessableJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(|e| ApiError::unprocessable(e.body_text()))
    }
}

/// Integer id from the path. Anything else doesn't name a resource, so it
/// is a 404 rather than a validation error.
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("route"))?;

        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| ApiError::not_found(format!("id '{}'", raw)))
    }
}
