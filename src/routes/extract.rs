//! Extractors that deserialize and validate request input.
//!
//! Every rejection is answered with the standard JSON error body instead of
//! axum's plain-text rejections.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::ApiError;

/// JSON body that has passed `Validate`.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// Query string that has passed `Validate`.
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// The `{id}` path segment of a tool route.
#[derive(Debug, Clone, Copy)]
pub struct ToolId(pub i32);

impl<S> FromRequestParts<S> for ToolId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        raw.parse()
            .map(ToolId)
            .map_err(|_| ApiError::BadRequest(format!("Invalid tool ID: {}", raw)))
    }
}

/// Collapse validator output into one message, fields in name order.
fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<(String, Vec<ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs.clone()))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |err| format!("{}: {}", field, describe(err))))
        .collect::<Vec<_>>()
        .join("; ");

    ApiError::Validation {
        message,
        param: fields.into_iter().next().map(|(field, _)| field),
    }
}

fn describe(err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    let min = err.params.get("min");
    let max = err.params.get("max");
    match (err.code.as_ref(), min, max) {
        ("length", Some(min), Some(max)) => {
            format!("length must be between {} and {} characters", min, max)
        }
        ("length", None, Some(max)) => format!("length must be at most {} characters", max),
        ("length", Some(min), None) => format!("length must be at least {} characters", min),
        ("range", Some(min), Some(max)) => format!("must be between {} and {}", min, max),
        ("range", Some(min), None) => format!("must be at least {}", min),
        ("range", None, Some(max)) => format!("must be at most {}", max),
        ("url", _, _) => "must be a valid URL".to_string(),
        (code, _, _) => format!("failed {} validation", code),
    }
}
