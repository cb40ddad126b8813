use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed its `validator` rules.
/// Malformed bodies and rule violations both surface as 400s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `axum::extract::Path`, rejecting with a JSON 400 instead of plain text.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query`, rejecting with a JSON 400 instead of plain text.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct StressBody {
        #[validate(range(min = 1, max = 5))]
        stress: i16,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_extracts() {
        let ValidatedJson(body) = ValidatedJson::<StressBody>::from_request(json_request(r#"{"stress":3}"#), &())
            .await
            .unwrap();
        assert_eq!(body.stress, 3);
    }

    #[tokio::test]
    async fn test_rule_violation_is_invalid_fields() {
        let err = ValidatedJson::<StressBody>::from_request(json_request(r#"{"stress":9}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidFields(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let err = ValidatedJson::<StressBody>::from_request(json_request(r#"{"stress":"high"}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
