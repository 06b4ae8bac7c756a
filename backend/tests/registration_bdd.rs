//! Behaviour tests for conference seat registration.
//!
//! These scenarios drive the conference service over the in-memory store and
//! check seat accounting plus the attendee's conference list.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[allow(dead_code)]
mod support;

use std::cell::RefCell;
use std::future::Future;

use conference_backend::domain::ports::{
    ConferenceCommand, ConferenceQuery, RegistrationCommand,
};
use conference_backend::domain::{ConferenceDraft, ConferenceKey, Error, ErrorCode, Identity};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

use support::MemoryBackends;

struct RegistrationWorld {
    runtime: Runtime,
    backends: MemoryBackends,
    conference: RefCell<Option<ConferenceKey>>,
    outcome: RefCell<Option<Result<bool, Error>>>,
}

impl RegistrationWorld {
    fn new() -> Self {
        Self {
            runtime: tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("test runtime"),
            backends: MemoryBackends::new(),
            conference: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn conference_key(&self) -> ConferenceKey {
        self.conference.borrow().expect("conference key")
    }

    fn record(&self, result: Result<bool, Error>) {
        *self.outcome.borrow_mut() = Some(result);
    }

    fn outcome(&self) -> Result<bool, Error> {
        self.outcome.borrow().clone().expect("registration outcome")
    }

    fn attending(&self, email: &str) -> bool {
        let key = self.conference_key();
        let conferences = self
            .block_on(self.backends.conferences.attending(&identity(email)))
            .expect("attending list");
        conferences.iter().any(|view| view.conference.key == key)
    }
}

fn identity(email: &str) -> Identity {
    Identity::from_email(email).expect("identity")
}

#[fixture]
fn world() -> RegistrationWorld {
    RegistrationWorld::new()
}

#[given("a conference with {seats} seats")]
fn a_conference_with_seats(world: &RegistrationWorld, seats: i32) {
    let view = world
        .block_on(world.backends.conferences.create(
            &identity("organiser@example.com"),
            ConferenceDraft {
                name: "RustConf".to_owned(),
                max_attendees: Some(seats),
                ..ConferenceDraft::default()
            },
        ))
        .expect("create conference");
    *world.conference.borrow_mut() = Some(view.conference.key);
}

#[given("no conference exists")]
fn no_conference_exists(world: &RegistrationWorld) {
    *world.conference.borrow_mut() = Some(ConferenceKey::generate());
}

#[when("{email} registers for the conference")]
fn registers_for_the_conference(world: &RegistrationWorld, email: String) {
    let key = world.conference_key();
    let result = world.block_on(world.backends.conferences.register(&identity(&email), &key));
    world.record(result);
}

#[when("{email} unregisters from the conference")]
fn unregisters_from_the_conference(world: &RegistrationWorld, email: String) {
    let key = world.conference_key();
    let result = world.block_on(
        world
            .backends
            .conferences
            .unregister(&identity(&email), &key),
    );
    world.record(result);
}

#[then("the request succeeds")]
fn the_request_succeeds(world: &RegistrationWorld) {
    assert!(world.outcome().expect("success"));
}

#[then("the request reports no change")]
fn the_request_reports_no_change(world: &RegistrationWorld) {
    assert!(!world.outcome().expect("success"));
}

#[then("the request is rejected with \"{message}\"")]
fn the_request_is_rejected_with(world: &RegistrationWorld, message: String) {
    let error = world.outcome().expect_err("rejection");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), message);
}

#[then("the request fails as not found")]
fn the_request_fails_as_not_found(world: &RegistrationWorld) {
    let error = world.outcome().expect_err("not found");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[then("the conference has {seats} seats available")]
fn the_conference_has_seats_available(world: &RegistrationWorld, seats: i32) {
    let key = world.conference_key();
    let view = world
        .block_on(world.backends.conferences.get(&key))
        .expect("conference");
    assert_eq!(view.conference.seats_available, seats);
}

#[then("{email} is attending the conference")]
fn is_attending_the_conference(world: &RegistrationWorld, email: String) {
    assert!(world.attending(&email));
}

#[then("{email} is not attending the conference")]
fn is_not_attending_the_conference(world: &RegistrationWorld, email: String) {
    assert!(!world.attending(&email));
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Registering claims a seat"
)]
fn registering_claims_a_seat(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Registering twice is rejected"
)]
fn registering_twice_is_rejected(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "A sold-out conference turns attendees away"
)]
fn a_sold_out_conference_turns_attendees_away(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Unregistering returns the seat"
)]
fn unregistering_returns_the_seat(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Unregistering without a seat changes nothing"
)]
fn unregistering_without_a_seat_changes_nothing(world: RegistrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/registration.feature",
    name = "Registering for an unknown conference"
)]
fn registering_for_an_unknown_conference(world: RegistrationWorld) {
    drop(world);
}
