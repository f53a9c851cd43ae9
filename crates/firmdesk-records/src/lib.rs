//! Firmdesk Records — per-entity CRUD services.
//!
//! Each service sits between the HTTP boundary and a repository trait:
//! it validates input, applies the row-level access policy for the
//! explicit requester, and only then touches storage. Services are
//! generic over repository implementations so this crate has no
//! dependency on the database crate.

pub mod catalog;
pub mod client;
pub mod courier;
pub mod feedback;
pub mod order;
pub mod payment;
pub mod status;

pub use catalog::CatalogService;
pub use client::ClientService;
pub use courier::CourierService;
pub use feedback::FeedbackService;
pub use order::OrderService;
pub use payment::PaymentService;
pub use status::StatusService;
