//! User repository tests against a live `PostgreSQL` database.

use crate::postgres::helpers::{TestDatabase, test_runtime, user};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasklane::account::domain::{EmailAddress, PersistedUserData, User, UserId};
use tasklane::account::ports::{UserRepository, UserRepositoryError};

#[rstest]
fn stored_user_is_found_by_id_and_email(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "user_roundtrip").expect("database");
    let rt = test_runtime();
    let repo = database.users();
    let ada = user(&"A".repeat(300), "Ada@Example.com");

    rt.block_on(repo.store(&ada)).expect("store");
    let by_id = rt
        .block_on(repo.find_by_id(ada.id()))
        .expect("lookup by id")
        .expect("user should exist");
    let lookup = EmailAddress::new("ada@example.com").expect("valid email");
    let by_email = rt
        .block_on(repo.find_by_email(&lookup))
        .expect("lookup by email")
        .expect("user should exist");

    assert_eq!(by_id, ada);
    assert_eq!(by_email, ada);
    assert!(by_id.password().as_str().starts_with("$argon2id$"));
}

#[rstest]
fn unknown_users_are_absent(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "user_absent").expect("database");
    let rt = test_runtime();
    let repo = database.users();
    let email = EmailAddress::new("nobody@example.com").expect("valid email");

    let by_id = rt.block_on(repo.find_by_id(UserId::new())).expect("lookup");
    let by_email = rt.block_on(repo.find_by_email(&email)).expect("lookup");

    assert!(by_id.is_none());
    assert!(by_email.is_none());
}

#[rstest]
fn second_account_with_the_same_email_is_a_duplicate_email(
    shared_test_cluster: &'static TestCluster,
) {
    let database = TestDatabase::create(shared_test_cluster, "user_dup_email").expect("database");
    let rt = test_runtime();
    let repo = database.users();
    rt.block_on(repo.store(&user("Ada", "ada@example.com")))
        .expect("first store");

    let result = rt.block_on(repo.store(&user("Impostor", "ADA@example.com")));

    assert!(
        matches!(
            &result,
            Err(UserRepositoryError::DuplicateEmail(email)) if email.as_str() == "ada@example.com"
        ),
        "expected duplicate email, got {result:?}"
    );
}

#[rstest]
fn reused_identifier_is_a_duplicate_user(shared_test_cluster: &'static TestCluster) {
    let database = TestDatabase::create(shared_test_cluster, "user_dup_id").expect("database");
    let rt = test_runtime();
    let repo = database.users();
    let original = user("Ada", "ada@example.com");
    rt.block_on(repo.store(&original)).expect("first store");
    let clone = User::from_persisted(PersistedUserData {
        id: original.id(),
        name: original.name().clone(),
        email: EmailAddress::new("other@example.com").expect("valid email"),
        password: original.password().clone(),
        created_at: original.created_at(),
    });

    let result = rt.block_on(repo.store(&clone));

    assert!(
        matches!(&result, Err(UserRepositoryError::DuplicateUser(id)) if *id == original.id()),
        "expected duplicate user, got {result:?}"
    );
}
