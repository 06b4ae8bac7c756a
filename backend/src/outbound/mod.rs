//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process repositories for development and tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **cache**: announcement cache in Redis or in process
//! - **queue**: in-process background job queue
//! - **mailer**: confirmation mail written to the log
//!
//! Adapters only translate between domain types and infrastructure; they
//! contain no business rules.

pub mod cache;
pub mod mailer;
pub mod memory;
pub mod persistence;
pub mod queue;
