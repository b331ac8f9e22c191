use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    Validation,
    Conflict,
    NotFound,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::Conflict => write!(f, "Duplicate key"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
