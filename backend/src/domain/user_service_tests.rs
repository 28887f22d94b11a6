//! Tests for the user service.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rstest::{fixture, rstest};
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, UserId, UserRecord};

#[fixture]
fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(5))
}

#[fixture]
fn cheap_cost() -> HashCost {
    HashCost::new(1).expect("minimum cost")
}

fn draft(password: &str) -> UserDraft {
    UserDraft {
        username: " ada ".to_owned(),
        email: "ada@example.com".to_owned(),
        password: Zeroizing::new(password.to_owned()),
        bio: "runs".to_owned(),
    }
}

fn stored(user: &NewUser, id: i64) -> User {
    let now = Utc::now();
    User::from(UserRecord {
        id: UserId::new(id),
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        bio: user.bio.clone(),
        created_at: now,
        updated_at: now,
    })
}

#[rstest]
#[tokio::test]
async fn create_user_hashes_password_before_persisting(deadline: Deadline, cheap_cost: HashCost) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .withf(|user, _| {
            user.username.as_ref() == "ada"
                && user.password_hash.as_bytes() != b"hunter22".as_slice()
                && user.password_hash.matches("hunter22") == Ok(true)
        })
        .returning(|user, _| Ok(stored(user, 1)));

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let user = service
        .create_user(draft("hunter22"), deadline)
        .await
        .expect("create succeeds");

    assert_eq!(user.id(), UserId::new(1));
    assert_eq!(user.password_hash().matches("wrong"), Ok(false));
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_empty_password(deadline: Deadline, cheap_cost: HashCost) {
    let mut repo = MockUserRepository::new();
    repo.expect_create().times(0);

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let error = service
        .create_user(draft(""), deadline)
        .await
        .expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn duplicate_username_maps_to_conflict(deadline: Deadline, cheap_cost: HashCost) {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .return_once(|_, _| Err(UserPersistenceError::conflict("users_username_key")));

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let error = service
        .create_user(draft("pw"), deadline)
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(UserPersistenceError::no_rows_affected(42_i64), ErrorCode::NotFound)]
#[case(UserPersistenceError::timeout("update user"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn update_errors_are_classified(
    deadline: Deadline,
    cheap_cost: HashCost,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .times(1)
        .return_once(move |_, _| Err(failure));

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let error = service
        .update_user(
            UserUpdateRequest {
                id: UserId::new(42),
                username: "ada".to_owned(),
                email: "ada@example.com".to_owned(),
                bio: String::new(),
            },
            deadline,
        )
        .await
        .expect_err("update fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_binds_requested_id(deadline: Deadline, cheap_cost: HashCost) {
    let hash = PasswordHash::set("pw", cheap_cost).expect("hash");
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .times(1)
        .withf(|update, _| update.id == UserId::new(5) && update.username.as_ref() == "grace")
        .returning(move |update, _| {
            let now = Utc::now();
            Ok(User::from(UserRecord {
                id: update.id,
                username: update.username.clone(),
                email: update.email.clone(),
                password_hash: hash.clone(),
                bio: update.bio.clone(),
                created_at: now,
                updated_at: now,
            }))
        });

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let user = service
        .update_user(
            UserUpdateRequest {
                id: UserId::new(5),
                username: "grace".to_owned(),
                email: "grace@example.com".to_owned(),
                bio: "compiles".to_owned(),
            },
            deadline,
        )
        .await
        .expect("update succeeds");

    assert_eq!(user.bio(), "compiles");
}

#[rstest]
#[tokio::test]
async fn blank_username_lookup_skips_storage(deadline: Deadline, cheap_cost: HashCost) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().times(0);

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let found = service
        .get_user_by_username("   ", deadline)
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn lookup_passes_trimmed_username(deadline: Deadline, cheap_cost: HashCost) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .withf(|username, _| username.as_ref() == "ada")
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = UserService::new(Arc::new(repo), cheap_cost);
    let found = service
        .get_user_by_username(" ada", deadline)
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}
