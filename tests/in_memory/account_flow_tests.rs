//! In-memory integration tests for account registration and login.

use std::sync::Arc;

use chrono::Duration;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use tasklane::account::{
    adapters::memory::InMemoryUserRepository,
    domain::EmailAddress,
    ports::UserRepository,
    services::{AccountError, AccountService, LoginRequest, RegisterRequest, TokenIssuer},
};

struct Harness {
    repository: Arc<InMemoryUserRepository>,
    service: AccountService<InMemoryUserRepository, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let repository = Arc::new(InMemoryUserRepository::new());
    let tokens = TokenIssuer::new("in-memory-secret", Duration::minutes(5))
        .expect("secret is non-empty");
    let service = AccountService::new(Arc::clone(&repository), Arc::new(DefaultClock), tokens);
    Harness {
        repository,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_is_stored_with_a_hashed_password(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let session = harness
        .service
        .register(RegisterRequest::new("Ada", "ada@example.com", "pw-1234"))
        .await?;

    let email = EmailAddress::new("ada@example.com")?;
    let stored = harness
        .repository
        .find_by_email(&email)
        .await?
        .ok_or_else(|| eyre::eyre!("user should be stored"))?;

    eyre::ensure!(stored.id() == session.user.id, "stored id matches profile");
    eyre::ensure!(stored.password().as_str() != "pw-1234", "password is hashed");
    eyre::ensure!(stored.password().verify("pw-1234"), "hash verifies");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tokens_from_login_and_registration_name_the_same_user(
    harness: Harness,
) -> Result<(), eyre::Report> {
    let registered = harness
        .service
        .register(RegisterRequest::new("Ada", "ada@example.com", "pw-1234"))
        .await?;
    let logged_in = harness
        .service
        .login(LoginRequest::new("ada@example.com", "pw-1234"))
        .await?;

    let first = harness.service.authenticate(&registered.token)?;
    let second = harness.service.authenticate(&logged_in.token)?;

    eyre::ensure!(first.id == second.id, "both tokens identify the same user");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_account_with_same_email_is_refused(harness: Harness) -> Result<(), eyre::Report> {
    harness
        .service
        .register(RegisterRequest::new("Ada", "ada@example.com", "pw"))
        .await?;

    let duplicate = harness
        .service
        .register(RegisterRequest::new("Ada Two", "ada@example.com", "pw"))
        .await;

    eyre::ensure!(
        matches!(duplicate, Err(AccountError::EmailTaken(_))),
        "duplicate email should be refused"
    );
    Ok(())
}
