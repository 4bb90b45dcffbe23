//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body extractor that runs `validator` rules before the handler sees the payload.
///
/// Malformed JSON and failed rules both surface as `AppError::Validation` (422).
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use ward_admin::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct RenameRoom {
///     #[validate(length(min = 1, max = 32))]
///     room_number: String,
/// }
///
/// async fn rename_room(ValidatedJson(payload): ValidatedJson<RenameRoom>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Join field messages, sorted by field so responses are stable.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Capacity {
        #[validate(range(min = 1, message = "Total beds must be at least 1"))]
        total_beds: i32,
        #[validate(length(min = 1, message = "Room number is required"))]
        room_number: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let request = json_request(r#"{"total_beds": 2, "room_number": "101A"}"#);
        let ValidatedJson(value) = ValidatedJson::<Capacity>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(value.total_beds, 2);
    }

    #[tokio::test]
    async fn test_rule_failures_are_joined_by_field() {
        let request = json_request(r#"{"total_beds": 0, "room_number": ""}"#);
        let Err(AppError::Validation(message)) =
            ValidatedJson::<Capacity>::from_request(request, &()).await
        else {
            panic!("expected a validation error");
        };
        assert_eq!(
            message,
            "Room number is required, Total beds must be at least 1"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_validation_error() {
        let request = json_request("{not json");
        let result = ValidatedJson::<Capacity>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
