use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    Validation,
    Unauthorized,
    NotFound,
    AlreadyProcessed,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid request"),
            KernelError::Unauthorized => write!(f, "Access denied"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::AlreadyProcessed => write!(f, "Already processed"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
