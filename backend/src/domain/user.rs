//! User identity model.
//!
//! Authentication hands the domain an [`Identity`]: a stable [`UserId`] plus
//! the e-mail address and nickname used to seed a lazily created profile.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when constructing user identity values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Derive the identifier for an e-mail address.
    ///
    /// The mapping is deterministic so the same login always lands on the
    /// same profile.
    ///
    /// # Examples
    /// ```
    /// use conference_backend::domain::UserId;
    ///
    /// assert_eq!(
    ///     UserId::for_email("ada@example.com"),
    ///     UserId::for_email("ADA@example.com"),
    /// );
    /// ```
    pub fn for_email(email: &str) -> Self {
        let normalised = email.trim().to_lowercase();
        Self::from_uuid(Uuid::new_v5(&Uuid::NAMESPACE_URL, normalised.as_bytes()))
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Authenticated caller as seen by the domain.
///
/// ## Invariants
/// - `email` is trimmed and contains a non-empty local part and domain.
/// - `nickname` is the local part of `email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    email: String,
    nickname: String,
}

impl Identity {
    /// Build an identity for an e-mail address.
    ///
    /// # Examples
    /// ```
    /// use conference_backend::domain::Identity;
    ///
    /// let identity = Identity::from_email(" ada@example.com ").unwrap();
    /// assert_eq!(identity.email(), "ada@example.com");
    /// assert_eq!(identity.nickname(), "ada");
    /// ```
    pub fn from_email(email: &str) -> Result<Self, UserValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let Some((local, domain)) = email.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self {
            user_id: UserId::for_email(email),
            email: email.to_owned(),
            nickname: local.to_owned(),
        })
    }

    /// Rebuild an identity from previously validated parts.
    pub fn from_parts(
        user_id: UserId,
        email: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            nickname: nickname.into(),
        }
    }

    /// Stable identifier for the caller.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Primary e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Short name used as the default display name.
    pub fn nickname(&self) -> &str {
        self.nickname.as_str()
    }
}

#[cfg(test)]
mod tests;
