//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`AnnouncementCache`], [`JobQueue`],
//! [`ConfirmationMailer`]) are implemented by outbound adapters. Driving
//! ports (`*Command`, `*Query`, [`LoginService`], [`JobHandler`]) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::{define_port_error, define_repository_error};

mod announcement_cache;
mod announcement_query;
mod conference_command;
mod conference_query;
mod conference_repository;
mod confirmation_mailer;
mod job_handler;
mod job_queue;
mod login_service;
mod profile_command;
mod profile_query;
mod profile_repository;
mod registration_command;
mod registration_repository;
mod session_command;
mod session_query;
mod session_repository;
mod wishlist_command;
mod wishlist_query;

#[cfg(test)]
pub use announcement_cache::MockAnnouncementCache;
pub use announcement_cache::{AnnouncementCache, AnnouncementCacheError};
#[cfg(test)]
pub use announcement_query::MockAnnouncementQuery;
pub use announcement_query::AnnouncementQuery;
#[cfg(test)]
pub use conference_command::MockConferenceCommand;
pub use conference_command::ConferenceCommand;
#[cfg(test)]
pub use conference_query::MockConferenceQuery;
pub use conference_query::{ConferenceQuery, ConferenceView};
#[cfg(test)]
pub use conference_repository::MockConferenceRepository;
pub use conference_repository::{ConferenceRepository, ConferenceRepositoryError};
#[cfg(test)]
pub use confirmation_mailer::MockConfirmationMailer;
pub use confirmation_mailer::{ConfirmationMailer, MailerError};
#[cfg(test)]
pub use job_handler::MockJobHandler;
pub use job_handler::JobHandler;
#[cfg(test)]
pub use job_queue::MockJobQueue;
pub use job_queue::{JobDispatchError, JobQueue};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::RegistrationCommand;
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
#[cfg(test)]
pub use session_command::MockSessionCommand;
pub use session_command::SessionCommand;
#[cfg(test)]
pub use session_query::MockSessionQuery;
pub use session_query::SessionQuery;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
#[cfg(test)]
pub use wishlist_command::MockWishlistCommand;
pub use wishlist_command::WishlistCommand;
#[cfg(test)]
pub use wishlist_query::MockWishlistQuery;
pub use wishlist_query::WishlistQuery;
