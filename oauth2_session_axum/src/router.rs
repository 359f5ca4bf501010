use std::sync::Arc;

use axum::Router;

use oauth2_session::GithubOAuth2;

/// Router serving the login, callback, and logout endpoints.
///
/// Mount it under the provider prefix, e.g.
/// `.nest("/oauth/github", oauth2_router(flow))`.
pub fn oauth2_router(flow: Arc<GithubOAuth2>) -> Router {
    super::oauth2::router().with_state(flow)
}
