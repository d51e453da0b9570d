use std::env::VarError;
use std::net::SocketAddr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;
use vodca::References;

const SERVER_BIND: &str = "SERVER_BIND";
const JWT_SECRET: &str = "JWT_SECRET";

#[derive(Debug, Clone, References)]
pub struct ServerConfig {
    bind: SocketAddr,
    jwt_secret: String,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let bind = optional(SERVER_BIND)?
            .map(|raw| raw.parse::<SocketAddr>())
            .transpose()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("`{SERVER_BIND}` must be a socket address"))?
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));
        let jwt_secret = optional(JWT_SECRET)?
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("`{JWT_SECRET}` must be set"))
            })?;
        Ok(Self { bind, jwt_secret })
    }
}

fn optional(key: &str) -> error_stack::Result<Option<String>, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(error) => Err(Report::new(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Failed to read env `{key}`"))),
    }
}
