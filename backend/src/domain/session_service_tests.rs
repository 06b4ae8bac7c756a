//! Tests for the session and wishlist service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockConferenceRepository, MockJobQueue, MockProfileRepository, MockSessionRepository,
    ProfileRepositoryError,
};
use crate::domain::{Conference, ConferenceDraft, ErrorCode, WishlistRejection};
use rstest::{fixture, rstest};

type TestService = SessionService<
    MockSessionRepository,
    MockConferenceRepository,
    MockProfileRepository,
    MockJobQueue,
>;

struct Mocks {
    sessions: MockSessionRepository,
    conferences: MockConferenceRepository,
    profiles: MockProfileRepository,
    jobs: MockJobQueue,
}

impl Mocks {
    fn into_service(self) -> TestService {
        SessionService::new(
            Arc::new(self.sessions),
            Arc::new(self.conferences),
            Arc::new(self.profiles),
            Arc::new(self.jobs),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        sessions: MockSessionRepository::new(),
        conferences: MockConferenceRepository::new(),
        profiles: MockProfileRepository::new(),
        jobs: MockJobQueue::new(),
    }
}

#[fixture]
fn organiser() -> Identity {
    Identity::from_email("ada@example.com").expect("identity")
}

fn owned_conference(identity: &Identity) -> Conference {
    ConferenceDraft {
        name: "RustConf".to_owned(),
        ..ConferenceDraft::default()
    }
    .into_conference(ConferenceKey::generate(), identity.user_id().clone())
}

fn draft(speaker: &str) -> SessionDraft {
    SessionDraft {
        name: "Pinning".to_owned(),
        speaker: Some(speaker.to_owned()),
        ..SessionDraft::default()
    }
}

fn existing_session(speaker: &str) -> Session {
    draft(speaker).into_session(SessionKey::generate(), ConferenceKey::generate())
}

#[rstest]
#[tokio::test]
async fn create_queues_featured_speaker_for_repeat_speakers(
    mut mocks: Mocks,
    organiser: Identity,
) {
    let conference = owned_conference(&organiser);
    let key = conference.key;
    mocks
        .conferences
        .expect_find_by_key()
        .returning(move |_| Ok(Some(conference.clone())));
    mocks.sessions.expect_insert().times(1).returning(|_| Ok(()));
    mocks
        .sessions
        .expect_find_by_speaker()
        .returning(|speaker| Ok(vec![existing_session(speaker), existing_session(speaker)]));
    mocks
        .jobs
        .expect_submit()
        .withf(|job| {
            matches!(job, BackgroundJob::SetFeaturedSpeaker { speaker } if speaker == "Grace")
        })
        .times(1)
        .returning(|_| Ok(()));

    let session = mocks
        .into_service()
        .create(&organiser, &key, draft("Grace"))
        .await
        .expect("session created");
    assert_eq!(session.conference_key, key);
    assert_eq!(session.duration, 60);
}

#[rstest]
#[tokio::test]
async fn first_session_does_not_feature_the_speaker(mut mocks: Mocks, organiser: Identity) {
    let conference = owned_conference(&organiser);
    let key = conference.key;
    mocks
        .conferences
        .expect_find_by_key()
        .returning(move |_| Ok(Some(conference.clone())));
    mocks.sessions.expect_insert().returning(|_| Ok(()));
    mocks
        .sessions
        .expect_find_by_speaker()
        .returning(|speaker| Ok(vec![existing_session(speaker)]));
    mocks.jobs.expect_submit().never();

    mocks
        .into_service()
        .create(&organiser, &key, draft("Grace"))
        .await
        .expect("session created");
}

#[rstest]
#[tokio::test]
async fn only_the_organiser_may_add_sessions(mut mocks: Mocks, organiser: Identity) {
    let conference = owned_conference(&organiser);
    let key = conference.key;
    mocks
        .conferences
        .expect_find_by_key()
        .returning(move |_| Ok(Some(conference.clone())));
    mocks.sessions.expect_insert().never();

    let stranger = Identity::from_email("mallory@example.com").expect("identity");
    let err = mocks
        .into_service()
        .create(&stranger, &key, draft("Grace"))
        .await
        .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn sessions_of_unknown_conference_are_not_found(mut mocks: Mocks) {
    mocks
        .conferences
        .expect_find_by_key()
        .returning(|_| Ok(None));
    mocks.sessions.expect_find_by_conference().never();

    let err = mocks
        .into_service()
        .by_conference(&ConferenceKey::generate(), SessionFilter::All)
        .await
        .expect_err("missing conference");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn wishlist_add_requires_existing_session(mut mocks: Mocks, organiser: Identity) {
    mocks.sessions.expect_find_by_key().returning(|_| Ok(None));
    mocks.profiles.expect_add_to_wishlist().never();

    let err = mocks
        .into_service()
        .add(&organiser, &SessionKey::generate())
        .await
        .expect_err("missing session");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn duplicate_wishlist_entry_is_a_conflict(mut mocks: Mocks, organiser: Identity) {
    mocks
        .sessions
        .expect_find_by_key()
        .returning(|_| Ok(Some(existing_session("Grace"))));
    mocks.profiles.expect_add_to_wishlist().returning(|_, _| {
        Err(ProfileRepositoryError::wishlist(
            WishlistRejection::AlreadyInWishlist,
        ))
    });

    let err = mocks
        .into_service()
        .add(&organiser, &SessionKey::generate())
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn wishlist_listing_reads_sessions_in_profile_order(mut mocks: Mocks, organiser: Identity) {
    let first = existing_session("Grace");
    let second = existing_session("Ada");
    let keys = vec![second.key, first.key];
    let stored = keys.clone();
    mocks.profiles.expect_insert_if_absent().returning(move |seed| {
        let mut profile = seed.clone();
        profile.session_keys_in_wishlist = stored.clone();
        Ok(profile)
    });
    let listed = vec![second.clone(), first.clone()];
    mocks
        .sessions
        .expect_find_by_keys()
        .withf(move |requested| requested == keys.as_slice())
        .returning(move |_| Ok(listed.clone()));

    let sessions = mocks
        .into_service()
        .sessions(&organiser)
        .await
        .expect("wishlist");
    assert_eq!(sessions, vec![second, first]);
}
