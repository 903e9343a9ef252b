use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::wizard::validation::is_valid_email;

pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The signed-in user, as asserted by the fronting auth proxy.
///
/// Resume documents live under the user's email, so a missing or malformed
/// header is rejected before any store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEmail(pub String);

impl UserEmail {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserEmail
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| is_valid_email(value) && !value.contains('/'))
            .ok_or(AppError::Unauthorized)?;
        Ok(UserEmail(email.to_ascii_lowercase()))
    }
}
