use std::sync::Arc;

use axum::{Router, response::Html, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oauth2_session::{Authenticator, GithubOAuth2, OAuth2Config, SessionConfig};
use oauth2_session_axum::{AuthPrincipal, oauth2_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let secret = std::env::var("OAUTH2_SIGNING_SECRET")?;
    let flow = Arc::new(GithubOAuth2::new(
        OAuth2Config::github_from_env()?,
        SessionConfig::default(),
        Authenticator::new(secret),
    ));

    let app = Router::new()
        .route("/", get(index))
        .route("/protected", get(protected))
        .with_state(flow.clone())
        .nest("/oauth/github", oauth2_router(flow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(principal: Option<AuthPrincipal>) -> Html<String> {
    let body = match principal {
        Some(AuthPrincipal(principal)) => format!(
            r#"<p>Signed in as {principal}.</p>
               <p><a href="/protected">Protected page</a> |
                  <a href="/oauth/github/logout">Sign out</a></p>"#
        ),
        None => r#"<p><a href="/oauth/github/login">Sign in with GitHub</a></p>"#.to_string(),
    };
    Html(body)
}

async fn protected(AuthPrincipal(principal): AuthPrincipal) -> String {
    format!("Hello, {principal}!")
}
