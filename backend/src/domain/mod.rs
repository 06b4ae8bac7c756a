//! Domain primitives, aggregates and services.
//!
//! Purpose: hold the conference rules independently of transport and
//! storage. Entities and pure functions live beside the services that
//! orchestrate them; [`ports`] defines the traits adapters implement.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Conference, Profile, Session and their draft/update types.
//! - normalize_filters / ConferenceSearch: conference search.
//! - apply_registration: the seat registration state machine.
//! - ConferenceService, ProfileService, SessionService,
//!   AnnouncementService, JobRunner: driving port implementations.

pub mod announcement_service;
pub mod announcements;
pub mod auth;
pub mod conference;
pub mod conference_filter;
pub mod conference_query;
pub mod conference_service;
pub mod error;
pub mod job_runner;
pub mod jobs;
pub mod keys;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod registration;
pub mod session;
pub mod session_service;
pub mod trace_id;
pub mod user;

pub use self::announcement_service::AnnouncementService;
pub use self::announcements::{
    FEATURED_SPEAKER_KEY, NEARLY_SOLD_OUT_SEATS, RECENT_ANNOUNCEMENTS_KEY, announcement_text,
    featured_speaker_text, is_nearly_sold_out,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::conference::{
    Conference, ConferenceDraft, ConferenceUpdate, DEFAULT_CITY, DEFAULT_TOPICS, month_of,
};
pub use self::conference_filter::{
    FilterClause, FilterError, FilterField, FilterOperator, FilterValue, NormalizedFilters,
    RawFilter, normalize_filters,
};
pub use self::conference_query::{ConferenceSearch, SortKey};
pub use self::conference_service::ConferenceService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::job_runner::{CONFIRMATION_SUBJECT, JobRunner};
pub use self::jobs::BackgroundJob;
pub use self::keys::{ConferenceKey, KeyKind, KeyParseError, SessionKey};
pub use self::profile::{
    ParseTeeShirtSizeError, Profile, ProfileUpdate, TeeShirtSize, WishlistRejection,
};
pub use self::profile_service::ProfileService;
pub use self::registration::{
    RegistrationChange, RegistrationRejection, RegistrationState, apply_registration,
};
pub use self::session::{
    DEFAULT_DURATION_MINUTES, Session, SessionDraft, SessionFilter, TO_BE_ANNOUNCED,
    session_order,
};
pub use self::session_service::SessionService;
pub use self::trace_id::TraceId;
pub use self::user::{Identity, UserId, UserValidationError};
