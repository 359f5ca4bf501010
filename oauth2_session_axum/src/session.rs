use std::sync::Arc;

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{StatusCode, request::Parts};

use oauth2_session::{GithubOAuth2, Principal};

/// Rejection for requests without a valid session cookie.
///
/// Deliberately a bare 401: whether the token was missing, forged, or
/// expired stays in the server log.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

/// Authenticated principal, available as an axum extractor.
///
/// Reads the session cookie and verifies the signed token it carries. Use
/// `Option<AuthPrincipal>` on pages that also render for anonymous users.
///
/// # Example
///
/// ```no_run
/// use oauth2_session_axum::AuthPrincipal;
///
/// async fn protected(AuthPrincipal(principal): AuthPrincipal) -> String {
///     format!("Hello, {principal}!")
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    Arc<GithubOAuth2>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let flow = Arc::<GithubOAuth2>::from_ref(state);

        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("No cookie header present");
            AuthRejection
        })?;

        let token = cookies.get(flow.cookie_name()).ok_or_else(|| {
            tracing::debug!("No session cookie '{}' found", flow.cookie_name());
            AuthRejection
        })?;

        let principal = flow.verify_session(token).map_err(|err| {
            tracing::debug!(error = ?err, "Session token rejected");
            AuthRejection
        })?;

        Ok(AuthPrincipal(principal))
    }
}

impl<S> OptionalFromRequestParts<S> for AuthPrincipal
where
    Arc<GithubOAuth2>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthPrincipal as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
