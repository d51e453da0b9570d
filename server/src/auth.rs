use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use error_stack::{Report, ResultExt};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use kernel::KernelError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

pub static AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Verifies HS256 access tokens signed with a shared secret.
pub struct TokenAuthority {
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenAuthority {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> error_stack::Result<Claims, KernelError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .change_context_lazy(|| KernelError::Unauthorized)
            .attach_printable_lazy(|| "Invalid token.")
    }
}

#[cfg(test)]
pub fn sign_token(secret: &str, user_id: Uuid, lifetime: time::Duration) -> String {
    let now = time::OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id,
        iat: now.unix_timestamp(),
        exp: (now + lifetime).unix_timestamp(),
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Claims of the caller, extracted from the `x-auth-token` header.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

#[async_trait]
impl<D> FromRequestParts<AppModule<D>> for Authenticated
where
    D: 'static + Sync + Send,
{
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        module: &AppModule<D>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Report::new(KernelError::Unauthorized)
                    .attach_printable("Access denied. No token provided.")
            })?;
        let claims = module.authority().verify(token)?;
        Ok(Self(claims))
    }
}
