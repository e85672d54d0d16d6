pub mod db;
pub mod validation;
pub mod validators;

pub use validation::{Validate, ValidationError, Violation};

// Re-export proc macros
pub use activerow_macros::domain_model;
