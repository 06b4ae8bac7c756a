//! Conference management backend.
//!
//! Organisers create conferences and sessions; attendees register for seats
//! and keep a session wishlist. The crate follows a hexagonal layout:
//! [`domain`] owns the rules and ports, [`inbound`] adapts HTTP onto driving
//! ports and [`outbound`] implements the driven ports for memory, PostgreSQL,
//! Redis and the background job queue.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
