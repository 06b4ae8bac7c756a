//! Opaque websafe keys for conferences and sessions.
//!
//! A websafe key is the URL-safe base64 (no padding) encoding of
//! `"<Kind>:<uuid>"`. Decoding is strict: the payload must name the expected
//! kind and carry a lower-case hyphenated UUID, so every key has exactly one
//! textual form and string equality matches key equality.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity kinds that can be addressed by a websafe key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Conference,
    Session,
}

impl KeyKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Conference => "Conference",
            Self::Session => "Session",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a websafe key fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("key is not valid URL-safe base64")]
    Encoding,
    #[error("key does not reference a {expected}")]
    WrongKind { expected: KeyKind },
    #[error("key does not carry a valid identifier")]
    InvalidId,
}

fn encode(kind: KeyKind, id: &Uuid) -> String {
    URL_SAFE_NO_PAD.encode(format!("{kind}:{}", id.hyphenated()))
}

fn decode(kind: KeyKind, raw: &str) -> Result<Uuid, KeyParseError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(raw.trim())
        .map_err(|_| KeyParseError::Encoding)?;
    let text = String::from_utf8(bytes).map_err(|_| KeyParseError::Encoding)?;
    let Some((prefix, id)) = text.split_once(':') else {
        return Err(KeyParseError::WrongKind { expected: kind });
    };
    if prefix != kind.as_str() {
        return Err(KeyParseError::WrongKind { expected: kind });
    }
    let uuid = Uuid::parse_str(id).map_err(|_| KeyParseError::InvalidId)?;
    if uuid.hyphenated().to_string() != id {
        return Err(KeyParseError::InvalidId);
    }
    Ok(uuid)
}

macro_rules! define_websafe_key {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh key.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap a storage identifier.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Storage identifier behind the key.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Render the websafe form.
            pub fn to_websafe(&self) -> String {
                encode($kind, &self.0)
            }
        }

        impl FromStr for $name {
            type Err = KeyParseError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                decode($kind, raw).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_websafe())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_websafe()
            }
        }

        impl TryFrom<String> for $name {
            type Error = KeyParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_websafe_key! {
    /// Key addressing a [`Conference`](crate::domain::Conference).
    ///
    /// # Examples
    /// ```
    /// use conference_backend::domain::ConferenceKey;
    ///
    /// let key = ConferenceKey::generate();
    /// let parsed: ConferenceKey = key.to_websafe().parse().unwrap();
    /// assert_eq!(parsed, key);
    /// ```
    ConferenceKey => KeyKind::Conference
}

define_websafe_key! {
    /// Key addressing a [`Session`](crate::domain::Session).
    SessionKey => KeyKind::Session
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn websafe_form_is_url_safe() {
        let key = ConferenceKey::generate();
        let websafe = key.to_websafe();
        assert!(
            websafe
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[rstest]
    fn session_key_is_rejected_as_conference_key() {
        let session = SessionKey::generate().to_websafe();
        let err = session.parse::<ConferenceKey>().expect_err("wrong kind");
        assert_eq!(
            err,
            KeyParseError::WrongKind {
                expected: KeyKind::Conference
            }
        );
    }

    #[rstest]
    #[case("not base64!", KeyParseError::Encoding)]
    #[case("", KeyParseError::WrongKind { expected: KeyKind::Conference })]
    fn malformed_keys_are_rejected(#[case] raw: &str, #[case] expected: KeyParseError) {
        assert_eq!(raw.parse::<ConferenceKey>().expect_err("malformed"), expected);
    }

    #[rstest]
    fn non_canonical_identifier_is_rejected() {
        let upper = format!("Conference:{}", Uuid::new_v4().hyphenated()).to_uppercase();
        let mixed = upper.replacen("CONFERENCE", "Conference", 1);
        let raw = URL_SAFE_NO_PAD.encode(mixed);
        assert_eq!(
            raw.parse::<ConferenceKey>().expect_err("upper-case uuid"),
            KeyParseError::InvalidId
        );
    }

    #[rstest]
    fn serde_uses_websafe_string() {
        let key = SessionKey::generate();
        let json = serde_json::to_value(key).expect("serialise");
        assert_eq!(json, serde_json::Value::String(key.to_websafe()));
        let back: SessionKey = serde_json::from_value(json).expect("deserialise");
        assert_eq!(back, key);
    }
}
