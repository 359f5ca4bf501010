use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use oauth2_session::{AuthResponse, GithubOAuth2};

pub(super) fn router() -> Router<Arc<GithubOAuth2>> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
}

/// Peer address, best effort: the service usually sits behind a proxy that
/// sets the forwarding header.
fn remote_addr(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
}

/// Redirect to the provider's authorization page with a signed CSRF state.
/// Without a valid state there is no safe redirect target, so a minting
/// failure answers 500 instead.
async fn login(
    State(flow): State<Arc<GithubOAuth2>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    match flow.prepare_auth_request() {
        Ok(auth_url) => Redirect::temporary(&auth_url).into_response(),
        Err(err) => {
            tracing::error!(
                component = "auth",
                remote_addr = remote_addr(&headers),
                %method,
                %uri,
                error = ?err,
                "Internal authentication error"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Provider callback. Success carries the session `Set-Cookie` and lands
/// on the success URL; every failure lands on the failure URL with no
/// cookie and the cause only in the server log.
async fn callback(
    State(flow): State<Arc<GithubOAuth2>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<AuthResponse>,
) -> Response {
    match flow.handle_callback(&query).await {
        Ok(cookie_headers) => {
            (cookie_headers, Redirect::temporary(flow.success_url())).into_response()
        }
        Err(err) => {
            tracing::error!(
                component = "auth",
                remote_addr = remote_addr(&headers),
                %method,
                %uri,
                error = ?err,
                "OAuth2 callback failed"
            );
            Redirect::temporary(flow.failure_url()).into_response()
        }
    }
}

/// Expire the session cookie and land on the success URL.
async fn logout(
    State(flow): State<Arc<GithubOAuth2>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    match flow.prepare_logout_response() {
        Ok(cookie_headers) => {
            (cookie_headers, Redirect::temporary(flow.success_url())).into_response()
        }
        Err(err) => {
            tracing::error!(
                component = "auth",
                remote_addr = remote_addr(&headers),
                %method,
                %uri,
                error = ?err,
                "Unable to expire session cookie"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
