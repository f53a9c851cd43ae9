//! Domain models for firmdesk.
//!
//! These are the core types shared across all crates.

pub mod category;
pub mod client;
pub mod courier;
pub mod feedback;
pub mod order;
pub mod password_reset;
pub mod payment;
pub mod product;
pub mod session;
pub mod status;
pub mod user;
