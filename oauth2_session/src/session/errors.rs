use thiserror::Error;

/// Signed-token failures.
///
/// `Invalid` and `Expired` share one opaque `Display` message: the
/// forged/expired distinction must not reach a client, where it would act
/// as an oracle. Server-side logs record the `Debug` form, which keeps the
/// distinction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("authentication failed")]
    Invalid,

    #[error("authentication failed")]
    Expired,

    #[error("token signing failed: {0}")]
    Issuer(String),
}
