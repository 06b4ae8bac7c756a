//! Macros generating the error enums returned by driven ports.
//!
//! [`define_port_error!`] declares a `thiserror` enum with one snake_case
//! constructor per variant; every constructor parameter is `impl Into<_>`.
//!
//! [`define_repository_error!`] is the storage flavour. It prepends the
//! `Connection` and `Query` variants every persistence adapter reports and
//! generates `into_domain_error`, which maps an unreachable store to
//! [`ErrorCode::ServiceUnavailable`](crate::domain::ErrorCode) and anything
//! else to an internal error. Services match the variants callers can act
//! on and hand the rest to that method.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                $crate::domain::ports::define_port_error!(
                    @ctor $variant $( { $($field : $ty),* } )?
                );
            )*
        }
    };
}

macro_rules! define_repository_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident for $subject:literal {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// Repository connection could not be established.
            #[error("{subject} connection failed: {message}", subject = $subject)]
            Connection { message: String },
            /// Query or mutation failed during execution.
            #[error("{subject} query failed: {message}", subject = $subject)]
            Query { message: String },
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $crate::domain::ports::define_port_error!(@ctor Connection { message: String });
            $crate::domain::ports::define_port_error!(@ctor Query { message: String });
            $(
                $crate::domain::ports::define_port_error!(
                    @ctor $variant $( { $($field : $ty),* } )?
                );
            )*

            /// Map the failure onto a domain error.
            ///
            /// Connection failures become `service_unavailable`; queries and
            /// any variant the caller did not handle itself become `internal`.
            pub fn into_domain_error(self) -> $crate::domain::Error {
                match self {
                    Self::Connection { message } => $crate::domain::Error::service_unavailable(
                        format!("{} unavailable: {message}", $subject),
                    ),
                    Self::Query { message } => {
                        $crate::domain::Error::internal(format!("{} error: {message}", $subject))
                    }
                    #[allow(unreachable_patterns)]
                    other => {
                        $crate::domain::Error::internal(format!("{} error: {other}", $subject))
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;
pub(crate) use define_repository_error;
