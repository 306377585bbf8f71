//! Sign-in and sign-up against the remote API.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::dto::{AuthResponseDto, SignInRequestDto, SignUpRequestDto};
use super::{ApiEndpoint, body_preview};
use crate::domain::ports::AuthGateway;
use crate::domain::{AuthError, Registration, Session, SignInCredentials};

/// [`AuthGateway`] backed by `POST api/users/signin` and `api/users/signup`.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    endpoint: ApiEndpoint,
}

impl HttpAuthGateway {
    pub const fn new(endpoint: ApiEndpoint) -> Self {
        Self { endpoint }
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<(StatusCode, Vec<u8>), AuthError> {
        let url = self.endpoint.url(&["api", "users", action]);
        debug!(%url, "posting auth request");
        let response = self
            .endpoint
            .client()
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, bytes.to_vec()))
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError> {
        let (status, body) = self
            .post("signin", &SignInRequestDto::from(credentials))
            .await?;
        if !status.is_success() {
            return Err(map_sign_in_status(status, &body));
        }
        decode_session(&body)
    }

    async fn sign_up(&self, registration: &Registration) -> Result<Session, AuthError> {
        let (status, body) = self
            .post("signup", &SignUpRequestDto::from(registration))
            .await?;
        if !status.is_success() {
            return Err(map_sign_up_status(status, &body));
        }
        match decode_session(&body) {
            Ok(session) => Ok(session),
            Err(err) => {
                // Some deployments acknowledge sign-up without a session.
                debug!(error = %err, "sign-up response carried no session; signing in");
                let credentials = SignInCredentials::try_from_parts(
                    registration.email().as_ref(),
                    registration.password(),
                )
                .map_err(|err| AuthError::network(err.to_string()))?;
                self.sign_in(&credentials).await
            }
        }
    }
}

fn decode_session(body: &[u8]) -> Result<Session, AuthError> {
    let decoded: AuthResponseDto = serde_json::from_slice(body)
        .map_err(|err| AuthError::network(format!("invalid auth response: {err}")))?;
    decoded.into_session().map_err(AuthError::network)
}

fn map_transport_error(error: reqwest::Error) -> AuthError {
    warn!(error = %error, timeout = error.is_timeout(), "auth request failed");
    AuthError::network(error.to_string())
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

/// Client errors other than timeouts and rate limits mean the credentials
/// were refused.
fn map_sign_in_status(status: StatusCode, body: &[u8]) -> AuthError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            AuthError::network(status_message(status, body))
        }
        _ if status.is_client_error() => AuthError::InvalidCredentials,
        _ => AuthError::network(status_message(status, body)),
    }
}

fn map_sign_up_status(status: StatusCode, body: &[u8]) -> AuthError {
    if status == StatusCode::CONFLICT {
        AuthError::AlreadyRegistered
    } else {
        AuthError::network(status_message(status, body))
    }
}
