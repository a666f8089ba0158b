use crate::prelude::*;

use axum::{
    async_trait,
    body::HttpBody,
    extract::FromRequest,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    BoxError, Form, Json,
};
use serde::Deserialize;

pub fn redirect_found(location: &str) -> Response {
    return (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response();
}

#[derive(Debug, thiserror::Error)]
pub enum GuessError {
    #[error("guess is missing")]
    Missing,

    #[error("guess {0:?} is not a number")]
    NotANumber(String),

    #[error("guess {0} is out of range")]
    OutOfRange(i64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GuessValue {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct GuessBody {
    guess: Option<GuessValue>,
}

impl GuessBody {
    fn into_guess(self) -> Result<i32, GuessError> {
        let value = match self.guess.ok_or(GuessError::Missing)? {
            GuessValue::Number(value) => value,
            GuessValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(GuessError::Missing);
                }

                text.parse()
                    .map_err(|_| GuessError::NotANumber(text.to_string()))?
            }
        };

        return i32::try_from(value).map_err(|_| GuessError::OutOfRange(value));
    }
}

/// The `guess` field of a JSON or urlencoded body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessInput(pub i32);

#[async_trait]
impl<S, B> FromRequest<S, B> for GuessInput
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = JsonError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let body: GuessBody = if is_json {
            let Json(body) = Json::<GuessBody>::from_request(req, state).await?;
            body
        } else {
            let Form(body) = Form::<GuessBody>::from_request(req, state).await?;
            body
        };

        return Ok(GuessInput(body.into_guess()?));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(body: &str) -> Result<i32, GuessError> {
        let body: GuessBody = serde_json::from_str(body).unwrap();
        return body.into_guess();
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_json(r#"{"guess": 42}"#).unwrap(), 42);
        assert_eq!(parse_json(r#"{"guess": " 7 "}"#).unwrap(), 7);
        assert_eq!(parse_json(r#"{"guess": -3}"#).unwrap(), -3);
    }

    #[test]
    fn rejects_missing_or_non_numeric() {
        assert!(matches!(parse_json(r#"{}"#), Err(GuessError::Missing)));
        assert!(matches!(parse_json(r#"{"guess": null}"#), Err(GuessError::Missing)));
        assert!(matches!(parse_json(r#"{"guess": ""}"#), Err(GuessError::Missing)));
        assert!(matches!(
            parse_json(r#"{"guess": "forty"}"#),
            Err(GuessError::NotANumber(_))
        ));
        assert!(matches!(
            parse_json(r#"{"guess": 99999999999}"#),
            Err(GuessError::OutOfRange(99999999999))
        ));
    }
}
