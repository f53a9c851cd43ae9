//! Firmdesk Auth — registration, login/logout sessions and the
//! password-reset-by-email flow.

pub mod config;
pub mod error;
pub mod mailer;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use mailer::{Mailer, RecordingMailer, SmtpMailer};
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput};
