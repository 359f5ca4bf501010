//! oauth2-session-axum - Axum handlers for the oauth2-session library
//!
//! Exposes the three protocol endpoints (`/login`, `/callback`, `/logout`)
//! as a nestable [`axum::Router`] plus an [`AuthPrincipal`] extractor that
//! downstream handlers use to consume the session cookie.

mod oauth2;
mod router;
mod session;

pub use router::oauth2_router;
pub use session::{AuthPrincipal, AuthRejection};
