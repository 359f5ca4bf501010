mod config;
mod cookie;
mod errors;
mod token;
mod types;

pub use config::{DEFAULT_COOKIE_NAME, SessionConfig};
pub use errors::TokenError;
pub use token::Authenticator;
pub use types::Principal;

pub(crate) use cookie::{clear_session_cookie, set_session_cookie};
