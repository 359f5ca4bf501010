mod config;
mod core;
mod errors;
mod github;
mod state;
mod types;

pub use self::core::GithubOAuth2;
pub use config::OAuth2Config;
pub use errors::OAuth2Error;
pub use types::{AuthResponse, ProviderEmail};
