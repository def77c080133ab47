//! Authentication service.
//!
//! Provides password signup and login on top of a [`UserRepository`].

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use campus_eats_core::Email;

use crate::db::{RepositoryError, UserRepository};
use crate::models::{NewUser, User};

/// Authentication service.
pub struct AuthService<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Register a new user with name, email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingName` if the name is blank.
    /// Returns `AuthError::MissingPassword` if the password is empty.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register_with_password(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        self.users
            .create(NewUser {
                name,
                email: &email,
                password_hash: &password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed or
    /// unknown, or the password does not match.
    pub async fn login_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// A password only has to be present.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::MissingPassword);
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryUserRepository;

    #[test]
    fn test_hash_is_argon2id_and_verifies() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password_requires_presence_only() {
        assert!(matches!(
            validate_password(""),
            Err(AuthError::MissingPassword)
        ));
        assert!(validate_password("pw").is_ok());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo);

        let user = auth
            .register_with_password("  Priya ", "priya@vit.ac.in", "dosa-lover")
            .await
            .unwrap();
        assert_eq!(user.name, "Priya");

        let logged_in = auth
            .login_with_password(" priya@vit.ac.in", "dosa-lover")
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejections() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo);

        assert!(matches!(
            auth.register_with_password("  ", "a@b.c", "long enough").await,
            Err(AuthError::MissingName)
        ));
        assert!(matches!(
            auth.register_with_password("A", "not-an-email", "long enough").await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.register_with_password("A", "a@b.c", "").await,
            Err(AuthError::MissingPassword)
        ));
        assert!(repo.is_empty().await);

        auth.register_with_password("A", "a@b.co", "pw").await.unwrap();
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo);

        auth.register_with_password("One", "same@srm.edu.in", "password-1")
            .await
            .unwrap();
        assert!(matches!(
            auth.register_with_password("Two", "same@srm.edu.in", "password-2")
                .await,
            Err(AuthError::UserAlreadyExists)
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = MemoryUserRepository::new();
        let auth = AuthService::new(&repo);
        auth.register_with_password("Ravi", "ravi@iitm.ac.in", "idli-sambar")
            .await
            .unwrap();

        for (email, password) in [
            ("ravi@iitm.ac.in", "wrong-password"),
            ("nobody@iitm.ac.in", "idli-sambar"),
            ("garbage", "idli-sambar"),
        ] {
            assert!(matches!(
                auth.login_with_password(email, password).await,
                Err(AuthError::InvalidCredentials)
            ));
        }
    }
}
