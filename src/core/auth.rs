//! # Identity Provider
//!
//! Sign-in and two-step registration behind a pluggable async trait. The only
//! implementation is [`MockIdentityProvider`], an in-memory account table with
//! an artificial delay in front of every call, standing in for a real backend.
//!
//! ```text
//! authenticate(email, password)      → UserProfile | AccountNotFound | WrongPassword
//! check_availability(email)          → ()          | AlreadyExists
//! verify(registration, code)         → UserProfile | WrongCode
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::i18n::Translations;
use crate::core::profile::UserProfile;

/// The one code the mock verification channel accepts.
pub const VERIFICATION_CODE: &str = "123456";
/// Length of a verification code; the code field accepts no more digits.
pub const VERIFICATION_CODE_LEN: usize = 6;

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(600);
pub const DEFAULT_VERIFY_DELAY: Duration = Duration::from_millis(800);

const DEFAULT_NEW_USER_NAME: &str = "New User";
const NEW_USER_BIO: &str = "Hi there! I am using Luminary.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No account is registered under the email.
    AccountNotFound,
    /// The account exists but the password differs.
    WrongPassword,
    /// Registration attempted with an email that already has an account.
    AlreadyExists,
    /// The verification code was not accepted.
    WrongCode,
}

impl AuthError {
    /// Localized inline message for the login form.
    pub fn message(self, t: &Translations) -> &'static str {
        match self {
            AuthError::AccountNotFound => t.account_not_found,
            AuthError::WrongPassword => t.wrong_password,
            AuthError::AlreadyExists => t.user_exists,
            AuthError::WrongCode => t.wrong_code,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::AccountNotFound => write!(f, "account not found"),
            AuthError::WrongPassword => write!(f, "wrong password"),
            AuthError::AlreadyExists => write!(f, "account already exists"),
            AuthError::WrongCode => write!(f, "wrong verification code"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Details collected by the registration form, carried into verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    /// Already normalized.
    pub email: String,
}

impl Registration {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: normalize_email(email),
        }
    }
}

/// Lowercase and trim, so lookups ignore case and stray whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Look up an account and check its password.
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile, AuthError>;

    /// First registration step: fail if the email is already taken.
    async fn check_availability(&self, email: &str) -> Result<(), AuthError>;

    /// Second registration step: confirm the one-time code and create the profile.
    async fn verify(&self, registration: &Registration, code: &str)
    -> Result<UserProfile, AuthError>;
}

struct Account {
    password: String,
    profile: UserProfile,
}

/// In-memory identity service seeded with a handful of demo accounts.
pub struct MockIdentityProvider {
    accounts: HashMap<String, Account>,
    login_delay: Duration,
    verify_delay: Duration,
}

impl MockIdentityProvider {
    pub fn new(login_delay: Duration, verify_delay: Duration) -> Self {
        let mut accounts = HashMap::new();
        for (email, password, id, name, handle, bio, avatar, phone) in [
            (
                "alex@example.com",
                "password",
                "user_alex",
                "Alex Johnson",
                "alexj",
                "Building the future.",
                "https://picsum.photos/id/65/100/100",
                "+1 234 567 89 00",
            ),
            (
                "durov@telegram.org",
                "123",
                "user_durov",
                "Pavel Durov",
                "durov",
                "Privacy first.",
                "https://picsum.photos/id/64/100/100",
                "+1 555 0199",
            ),
            (
                "korolsmerty2015@gmail.com",
                "password",
                "user_korol",
                "Korol Smerty",
                "korol_smerty",
                "King of the chat.",
                "https://api.dicebear.com/7.x/bottts/svg?seed=korol",
                "",
            ),
            (
                "example@email.com",
                "password",
                "user_example",
                "Example User",
                "example_user",
                "Just a demo user.",
                "https://api.dicebear.com/7.x/fun-emoji/svg?seed=example",
                "",
            ),
        ] {
            accounts.insert(
                email.to_string(),
                Account {
                    password: password.to_string(),
                    profile: UserProfile {
                        id: id.to_string(),
                        name: name.to_string(),
                        handle: handle.to_string(),
                        bio: bio.to_string(),
                        avatar: avatar.to_string(),
                        phone: phone.to_string(),
                        email: email.to_string(),
                    },
                },
            );
        }
        Self {
            accounts,
            login_delay,
            verify_delay,
        }
    }

    /// Same accounts, no artificial latency.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    fn lookup(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let account = self
            .accounts
            .get(&normalize_email(email))
            .ok_or(AuthError::AccountNotFound)?;
        if account.password != password {
            return Err(AuthError::WrongPassword);
        }
        Ok(account.profile.clone())
    }

    fn is_available(&self, email: &str) -> Result<(), AuthError> {
        if self.accounts.contains_key(&normalize_email(email)) {
            return Err(AuthError::AlreadyExists);
        }
        Ok(())
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY, DEFAULT_VERIFY_DELAY)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        tokio::time::sleep(self.login_delay).await;
        self.lookup(email, password)
    }

    async fn check_availability(&self, email: &str) -> Result<(), AuthError> {
        tokio::time::sleep(self.login_delay).await;
        self.is_available(email)
    }

    async fn verify(
        &self,
        registration: &Registration,
        code: &str,
    ) -> Result<UserProfile, AuthError> {
        tokio::time::sleep(self.verify_delay).await;
        if code != VERIFICATION_CODE {
            return Err(AuthError::WrongCode);
        }
        Ok(new_profile(registration))
    }
}

/// Build the profile for a freshly verified registration.
pub fn new_profile(registration: &Registration) -> UserProfile {
    let entropy = uuid::Uuid::new_v4();
    let id_suffix: String = entropy.simple().to_string().chars().take(7).collect();
    let handle_number = entropy.as_u128() % 10_000;

    let name = if registration.name.trim().is_empty() {
        DEFAULT_NEW_USER_NAME.to_string()
    } else {
        registration.name.clone()
    };

    UserProfile {
        id: format!("user_{}", id_suffix),
        avatar: format!(
            "https://api.dicebear.com/7.x/initials/svg?seed={}",
            registration.name
        ),
        name,
        handle: format!("user_{}", handle_number),
        bio: NEW_USER_BIO.to_string(),
        phone: String::new(),
        email: normalize_email(&registration.email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_ignores_email_case() {
        let provider = MockIdentityProvider::instant();
        let profile = provider
            .authenticate("DUROV@TELEGRAM.ORG", "123")
            .await
            .unwrap();
        assert_eq!(profile.id, "user_durov");
        assert_eq!(profile.handle, "durov");
    }

    #[tokio::test]
    async fn test_authenticate_trims_email() {
        let provider = MockIdentityProvider::instant();
        let profile = provider
            .authenticate("  example@email.com ", "password")
            .await
            .unwrap();
        assert_eq!(profile.name, "Example User");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let provider = MockIdentityProvider::instant();
        let result = provider.authenticate("alex@example.com", "wrong").await;
        assert_eq!(result, Err(AuthError::WrongPassword));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_account() {
        let provider = MockIdentityProvider::instant();
        let result = provider.authenticate("nobody@x.com", "x").await;
        assert_eq!(result, Err(AuthError::AccountNotFound));
    }

    #[tokio::test]
    async fn test_password_is_case_sensitive() {
        let provider = MockIdentityProvider::instant();
        let result = provider.authenticate("alex@example.com", "PASSWORD").await;
        assert_eq!(result, Err(AuthError::WrongPassword));
    }

    #[tokio::test]
    async fn test_availability_rejects_known_email() {
        let provider = MockIdentityProvider::instant();
        assert_eq!(
            provider.check_availability("Alex@Example.com").await,
            Err(AuthError::AlreadyExists)
        );
        assert_eq!(provider.check_availability("new@luminary.app").await, Ok(()));
    }

    #[tokio::test]
    async fn test_verify_accepts_only_fixed_code() {
        let provider = MockIdentityProvider::instant();
        let registration = Registration::new("Jane", " Jane@Mail.COM ");

        assert_eq!(
            provider.verify(&registration, "000000").await,
            Err(AuthError::WrongCode)
        );

        let profile = provider.verify(&registration, "123456").await.unwrap();
        assert_eq!(profile.email, "jane@mail.com");
        assert_eq!(profile.name, "Jane");
        assert_eq!(profile.bio, NEW_USER_BIO);
        assert!(profile.id.starts_with("user_"));
        assert_eq!(profile.id.len(), "user_".len() + 7);
        assert!(profile.handle.starts_with("user_"));
        assert!(profile.avatar.ends_with("seed=Jane"));
    }

    #[test]
    fn test_blank_name_gets_default() {
        let profile = new_profile(&Registration::new("   ", "a@b.c"));
        assert_eq!(profile.name, "New User");
    }

    #[test]
    fn test_handle_number_in_range() {
        for _ in 0..50 {
            let profile = new_profile(&Registration::new("X", "x@y.z"));
            let number: u32 = profile.handle["user_".len()..].parse().unwrap();
            assert!(number < 10_000);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_delay() {
        let provider = std::sync::Arc::new(MockIdentityProvider::default());
        let task = {
            let provider = provider.clone();
            tokio::spawn(async move { provider.authenticate("alex@example.com", "password").await })
        };
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(599)).await;
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        tokio::time::advance(Duration::from_millis(1)).await;
        let profile = task.await.unwrap().unwrap();
        assert_eq!(profile.id, "user_alex");
    }

    #[tokio::test(start_paused = true)]
    async fn test_verify_uses_longer_delay() {
        let provider = std::sync::Arc::new(MockIdentityProvider::default());
        let task = {
            let provider = provider.clone();
            tokio::spawn(async move {
                provider
                    .verify(&Registration::new("Jane", "jane@mail.com"), VERIFICATION_CODE)
                    .await
            })
        };
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(700)).await;
        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(task.await.unwrap().is_ok());
    }

    #[test]
    fn test_error_messages_are_localized() {
        use crate::core::i18n::{EN, RU};
        assert_eq!(AuthError::WrongPassword.message(&EN), "Wrong password");
        assert_eq!(AuthError::WrongCode.message(&RU), "Неверный код");
        assert_eq!(AuthError::AccountNotFound.to_string(), "account not found");
    }
}
