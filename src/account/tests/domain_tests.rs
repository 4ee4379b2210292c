//! Unit tests for account value types and password hashing.

use crate::account::domain::{
    AccountDomainError, DisplayName, EmailAddress, HashedPassword, User,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("ada@example.com", "ada@example.com")]
#[case("  Ada@Example.COM ", "ada@example.com")]
fn email_is_trimmed_and_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("email should be valid");
    assert_eq!(email.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("ada")]
#[case("@example.com")]
#[case("ada@")]
#[case("ada@@example.com")]
#[case("a da@example.com")]
fn malformed_email_is_rejected(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(AccountDomainError::InvalidEmail(raw.to_owned()))
    );
}

#[rstest]
fn blank_display_name_is_rejected() {
    assert_eq!(DisplayName::new("   "), Err(AccountDomainError::EmptyName));
    assert_eq!(
        DisplayName::new(" Ada ").expect("valid name").as_str(),
        "Ada"
    );
}

#[rstest]
fn password_hash_verifies_only_the_original() {
    let hash = HashedPassword::hash("correct horse").expect("hashing should succeed");

    assert!(hash.verify("correct horse"));
    assert!(!hash.verify("wrong horse"));
    assert!(hash.as_str().starts_with("$argon2"));
}

#[rstest]
fn empty_password_is_not_hashed() {
    assert_eq!(
        HashedPassword::hash(""),
        Err(AccountDomainError::EmptyPassword)
    );
}

#[rstest]
fn malformed_stored_hash_never_verifies() {
    let hash = HashedPassword::from_stored("plaintext");
    assert!(!hash.verify("plaintext"));
}

#[rstest]
fn password_debug_output_is_redacted() {
    let hash = HashedPassword::hash("secret").expect("hashing should succeed");
    let rendered = format!("{hash:?}");
    assert!(!rendered.contains(hash.as_str()));
}

#[rstest]
fn profile_exposes_no_password() {
    let user = User::new(
        DisplayName::new("Ada").expect("valid name"),
        EmailAddress::new("ada@example.com").expect("valid email"),
        HashedPassword::from_stored("$argon2id$stub"),
        &DefaultClock,
    );

    let json = serde_json::to_value(user.profile()).expect("profile should serialize");

    assert_eq!(json["name"], "Ada");
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["id"], user.id().to_string());
    assert!(json.get("password").is_none());
}
