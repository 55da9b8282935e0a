//! HTTP Basic Auth extractor for write routes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::future::{Ready, ready};

use quill_core::ports::AuthError;
use quill_shared::ErrorResponse;

use crate::state::AppState;

/// An authenticated writer.
///
/// Add it as a handler argument to gate the route:
/// ```ignore
/// async fn delete(writer: Writer, ...) -> AppResult<HttpResponse> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    pub user: String,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError {
    pub error: AuthError,
    pub realm: String,
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.error {
            AuthError::MissingAuth => ErrorResponse::unauthorized()
                .with_detail("Credentials are required to change posts."),
            AuthError::MalformedHeader(msg) => ErrorResponse::unauthorized().with_detail(msg.clone()),
            _ => ErrorResponse::unauthorized().with_detail("Invalid username or password."),
        };

        actix_web::HttpResponse::Unauthorized()
            .insert_header((
                header::WWW_AUTHENTICATE,
                format!("Basic realm=\"{}\"", self.realm),
            ))
            .json(error)
    }
}

/// Split an `Authorization: Basic <base64(user:pass)>` value.
pub fn parse_basic(value: &str) -> Result<(String, String), AuthError> {
    let encoded = value
        .strip_prefix("Basic ")
        .ok_or_else(|| AuthError::MalformedHeader("Expected Basic credentials".to_string()))?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::MalformedHeader("Credentials are not valid base64".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::MalformedHeader("Credentials are not valid UTF-8".to_string()))?;

    let (user, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::MalformedHeader("Expected user:password".to_string()))?;
    Ok((user.to_string(), password.to_string()))
}

fn authenticate(req: &HttpRequest, state: &AppState) -> Result<Writer, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader("Invalid authorization header".to_string()))?;

    let (user, password) = parse_basic(value)?;
    if !state.auth.check(&user, &password) {
        tracing::warn!(user = %user, "Rejected write credentials");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(Writer { user })
}

impl FromRequest for Writer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(actix_web::error::ErrorInternalServerError(
                "Server configuration error",
            )));
        };

        ready(authenticate(req, state).map_err(|error| {
            actix_web::Error::from(AuthenticationError {
                error,
                realm: state.site.realm.clone(),
            })
        }))
    }
}
