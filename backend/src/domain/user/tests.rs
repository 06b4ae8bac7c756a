//! Regression coverage for user identity values.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_serde() {
    let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    let json = serde_json::to_string(&id).expect("serialise");
    let back: UserId = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, id);
}

#[rstest]
fn for_email_is_stable_and_case_insensitive() {
    let first = UserId::for_email("Grace@Example.com");
    let second = UserId::for_email("grace@example.com");
    assert_eq!(first, second);
    assert_ne!(first, UserId::for_email("ada@example.com"));
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("ada@", UserValidationError::InvalidEmail)]
fn identity_rejects_malformed_email(#[case] email: &str, #[case] expected: UserValidationError) {
    assert_eq!(Identity::from_email(email).expect_err("invalid"), expected);
}

#[rstest]
fn identity_derives_nickname_and_id() {
    let identity = Identity::from_email("grace.hopper@example.com").expect("valid email");
    assert_eq!(identity.nickname(), "grace.hopper");
    assert_eq!(identity.user_id(), &UserId::for_email("grace.hopper@example.com"));
}
