use super::*;
use crate::domain::UserId;
use rstest::rstest;

#[rstest]
#[case(UserPersistenceError::connection("refused"), "user repository connection failed: refused")]
#[case(UserPersistenceError::query("syntax"), "user repository query failed: syntax")]
#[case(UserPersistenceError::username_taken("alice"), "username already taken: alice")]
#[case(UserPersistenceError::email_taken("a@x.io"), "email already taken: a@x.io")]
#[case(UserPersistenceError::not_found(UserId::new(3)), "user 3 not found")]
fn persistence_errors_describe_themselves(
    #[case] error: UserPersistenceError,
    #[case] expected: &str,
) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
#[tokio::test]
async fn mock_repository_reports_configured_existence() {
    let mut repo = MockUserRepository::new();
    repo.expect_exists_by_id()
        .withf(|id| *id == UserId::new(1))
        .times(1)
        .return_const(Ok(true));

    let exists = repo.exists_by_id(UserId::new(1)).await.expect("mocked");
    assert!(exists);
}
