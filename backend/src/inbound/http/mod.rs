//! HTTP inbound adapter exposing the conference REST API.

pub mod announcements;
pub mod conferences;
pub mod error;
pub mod forms;
pub mod health;
pub mod profiles;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod wishlist;

pub use error::ApiResult;
