//! Authentication service: registration, sessions and password reset.

use chrono::{Duration, Utc};
use firmdesk_core::models::password_reset::CreatePasswordReset;
use firmdesk_core::models::session::{CreateSession, Session};
use firmdesk_core::models::user::{CreateUser, Role, User};
use firmdesk_core::repository::{PasswordResetRepository, SessionRepository, UserRepository};
use firmdesk_core::validation::{FieldErrors, check_email, check_name, check_password};
use firmdesk_core::{FirmError, FirmResult, Requester};
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::mailer::Mailer;
use crate::password::verify_password;
use crate::token::{generate_session_token, hash_token, reset_token_for_email};

/// Input for [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Input for [`AuthService::login`].
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// A freshly opened session.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// Raw opaque token; shown to the client once, stored hashed.
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
    pub user: User,
}

/// Orchestrates the account lifecycle over the user, session and
/// password-reset repositories.
pub struct AuthService<U, S, P, M> {
    users: U,
    sessions: S,
    resets: P,
    mailer: M,
    config: AuthConfig,
}

impl<U, S, P, M> AuthService<U, S, P, M>
where
    U: UserRepository,
    S: SessionRepository,
    P: PasswordResetRepository,
    M: Mailer,
{
    pub fn new(users: U, sessions: S, resets: P, mailer: M, config: AuthConfig) -> Self {
        Self {
            users,
            sessions,
            resets,
            mailer,
            config,
        }
    }

    /// Register a new account with the `user` role.
    ///
    /// Registration does not open a session; the caller logs in
    /// afterwards.
    pub async fn register(&self, input: RegisterInput) -> FirmResult<User> {
        let mut errors = FieldErrors::new();

        if input.username.trim().is_empty() {
            errors.push("username", "username must not be empty");
        }
        check_name(&mut errors, "surname", &input.surname);
        check_name(&mut errors, "name", &input.name);
        if !input.patronymic.is_empty() {
            check_name(&mut errors, "patronymic", &input.patronymic);
        }
        check_email(&mut errors, "email", &input.email);
        check_password(&mut errors, "password", &input.password);
        if input.password != input.password_confirm {
            errors.push("password_confirm", "passwords do not match");
        }
        errors.into_result()?;

        let mut errors = FieldErrors::new();
        match self.users.get_by_username(&input.username).await {
            Ok(_) => errors.push("username", "this username is already taken"),
            Err(FirmError::NotFound { .. }) => {}
            Err(err) => return Err(err),
        }
        match self.users.get_by_email(&input.email).await {
            Ok(_) => errors.push("email", "an account with this e-mail already exists"),
            Err(FirmError::NotFound { .. }) => {}
            Err(err) => return Err(err),
        }
        errors.into_result()?;

        let user = self
            .users
            .create(CreateUser {
                username: input.username,
                surname: input.surname,
                name: input.name,
                patronymic: input.patronymic,
                email: input.email,
                password: input.password,
                role: Role::User,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "account registered");
        Ok(user)
    }

    /// Open a session for valid credentials.
    pub async fn login(&self, input: LoginInput) -> FirmResult<LoginOutput> {
        let user = match self.users.get_by_username(&input.username).await {
            Ok(user) => user,
            Err(FirmError::NotFound { .. }) => {
                warn!(username = %input.username, "login for unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };

        let matches = verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !matches {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = generate_session_token();
        let expires_at =
            Utc::now() + Duration::seconds(self.config.session_lifetime_secs as i64);
        self.sessions
            .create(CreateSession {
                user_id: user.id,
                token_hash: hash_token(&token),
                expires_at,
            })
            .await?;

        info!(user_id = %user.id, "session opened");
        Ok(LoginOutput {
            token,
            expires_at,
            user,
        })
    }

    /// Resolve a raw session token to the requesting user.
    ///
    /// Expired sessions are invalidated on sight.
    pub async fn authenticate(&self, token: &str) -> FirmResult<Requester> {
        let session = self.lookup_session(token).await?;
        let user = self.users.get_by_id(session.user_id).await?;
        Ok(Requester {
            id: user.id,
            role: user.role,
        })
    }

    /// Close the session behind a raw token. Unknown tokens are
    /// ignored so logout stays idempotent.
    pub async fn logout(&self, token: &str) -> FirmResult<()> {
        let session = match self.sessions.get_by_token_hash(&hash_token(token)).await {
            Ok(session) => session,
            Err(FirmError::NotFound { .. }) => return Ok(()),
            Err(err) => return Err(err),
        };
        match self.sessions.invalidate(session.id).await {
            Ok(()) | Err(FirmError::NotFound { .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Start a password reset for `email`.
    ///
    /// The outcome is the same whether or not the address belongs to an
    /// account, so the endpoint does not leak which e-mails are
    /// registered.
    pub async fn request_password_reset(&self, email: &str) -> FirmResult<()> {
        let user = match self.users.get_by_email(email).await {
            Ok(user) => user,
            Err(FirmError::NotFound { .. }) => {
                info!("password reset requested for unknown e-mail");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let token = reset_token_for_email(&user.email, &self.config.reset_secret);
        let expires_at =
            Utc::now() + Duration::seconds(self.config.reset_token_lifetime_secs as i64);
        self.resets
            .create(CreatePasswordReset {
                user_id: user.id,
                token_hash: hash_token(&token),
                expires_at,
            })
            .await?;

        let link = format!("{}/{}", self.config.reset_link_base.trim_end_matches('/'), token);
        let body = format!(
            "Hello, {} {}!\n\nTo set a new password, follow the link:\n{}\n\n\
             The link is valid for a limited time. If you did not request \
             a reset, ignore this message.",
            user.name, user.surname, link
        );
        self.mailer.send(&user.email, "Password reset", &body)?;

        info!(user_id = %user.id, "password reset mail sent");
        Ok(())
    }

    /// Complete a password reset: consume the token and store the new
    /// password.
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        password_confirm: &str,
    ) -> FirmResult<()> {
        let mut errors = FieldErrors::new();
        check_password(&mut errors, "password", password);
        if password != password_confirm {
            errors.push("password_confirm", "passwords do not match");
        }
        errors.into_result()?;

        let reset = match self.resets.consume(&hash_token(token)).await {
            Ok(reset) => reset,
            Err(FirmError::NotFound { .. }) => return Err(AuthError::TokenInvalid.into()),
            Err(err) => return Err(err),
        };
        if reset.expires_at < Utc::now() {
            return Err(AuthError::TokenExpired.into());
        }

        self.users.set_password(reset.user_id, password).await?;
        info!(user_id = %reset.user_id, "password reset completed");
        Ok(())
    }

    async fn lookup_session(&self, token: &str) -> FirmResult<Session> {
        let token_hash = hash_token(token);
        let session = match self.sessions.get_by_token_hash(&token_hash).await {
            Ok(session) => session,
            Err(FirmError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };
        if session.expires_at < Utc::now() {
            if let Err(err) = self.sessions.invalidate(session.id).await {
                warn!(session_id = %session.id, error = %err, "failed to invalidate expired session");
            }
            return Err(AuthError::SessionExpired.into());
        }
        Ok(session)
    }
}
