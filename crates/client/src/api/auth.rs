//! Username/password authentication.

use pocketshop_core::{AccessToken, Credentials};
use secrecy::ExposeSecret;
use tracing::instrument;
use url::Url;

use super::ApiError;
use super::client::rejection;
use super::types::{LoginOutcome, LoginRequest, LoginResponse};

/// Exchange credentials for a bearer token and the user's profile.
///
/// # Errors
///
/// - `ApiError::Http` if the request could not be sent or timed out
/// - `ApiError::Rejected` for a non-success status (bad credentials included)
/// - `ApiError::MissingToken` if a success response has no usable token
/// - `ApiError::Malformed` if a success response cannot be decoded
#[instrument(skip(client, credentials), fields(username = %credentials.username))]
pub(super) async fn login(
    client: &reqwest::Client,
    url: Url,
    credentials: &Credentials,
) -> Result<LoginOutcome, ApiError> {
    let response = client
        .post(url)
        .json(&LoginRequest {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(rejection(response).await);
    }

    let body = response.text().await?;
    let login: LoginResponse = serde_json::from_str(&body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse login response");
        ApiError::Malformed(e.to_string())
    })?;

    let (user, token) = login.into_token();
    let token = token.ok_or(ApiError::MissingToken)?;

    Ok(LoginOutcome {
        user,
        token: AccessToken::new(token),
    })
}
