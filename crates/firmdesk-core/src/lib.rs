//! Firmdesk Core — domain models, repository traits, validation rules
//! and the row-level access policy shared across all crates.

pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod validation;

pub use error::{FirmError, FirmResult};
pub use policy::{RecordScope, Requester};
pub use validation::FieldErrors;
