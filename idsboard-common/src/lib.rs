mod config;
mod error;
pub mod records;
mod types;
pub mod validation;

pub use config::*;
pub use error::*;
pub use records::*;
pub use types::*;
pub use validation::{FieldViolation, ValidationError, ViolationKind};
