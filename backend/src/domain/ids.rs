//! Opaque identifiers for users, lists, and tasks.
//!
//! Identifiers are server-generated UUID v4 strings, but callers may present
//! any non-blank string; an unknown identifier is a lookup miss, not a
//! validation failure.

use std::fmt;

use uuid::Uuid;

/// Validation errors raised when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The identifier was empty or only whitespace.
    #[error("{kind} must not be empty")]
    Blank {
        /// Name of the identifier kind.
        kind: &'static str,
    },
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a client- or storage-provided identifier.
            ///
            /// # Errors
            /// Returns [`IdValidationError::Blank`] for empty input.
            pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(IdValidationError::Blank { kind: $kind });
                }
                Ok(Self(id))
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of a user.
    UserId,
    "userId"
);
define_id!(
    /// Identifier of a todo list, unique within its owner.
    ListId,
    "listId"
);
define_id!(
    /// Identifier of a todo task, unique within its list.
    TaskId,
    "taskId"
);
