use std::borrow::Cow;

use thiserror::Error;

/// A single failed check, attributed to the field it was declared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub code: &'static str,
    pub message: Cow<'static, str>,
}

/// A check failure before it is attributed to a field. Produced by the
/// functions in [`crate::validators`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    pub code: &'static str,
    pub message: Cow<'static, str>,
}

impl Invalid {
    pub fn new(code: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn at(self, field: &'static str) -> Violation {
        Violation {
            field,
            code: self.code,
            message: self.message,
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("validation failed with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationError::Invalid(violations) => violations,
        }
    }
}

/// Declarative per-field checks, attached by expansion.
pub trait Validate {
    fn check(&self, report: &mut Vec<Violation>);
}
