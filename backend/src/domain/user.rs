//! Raw user input accepted from callers and from the peer service.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised before a raw user may be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserValidationError {
    /// The id was absent, null or zero.
    MissingId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "User ID is required"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Non-zero integer identifier keying derived records.
///
/// # Examples
/// ```
/// use dataproc::domain::UserId;
///
/// assert!(UserId::new(0).is_err());
/// assert_eq!(UserId::new(7).expect("non-zero").get(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64, example = 7)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id == 0 {
            return Err(UserValidationError::MissingId);
        }
        Ok(Self(id))
    }

    /// Access the raw integer.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// User record as supplied by an external caller.
///
/// The identifier is optional on the wire so a missing id surfaces as a
/// validation error rather than a decode failure.
///
/// Example JSON:
/// `{"id":7,"name":"Ada","email":"ada@example.com","age":36}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RawUser {
    /// Caller-assigned identifier; absent or zero ids are rejected.
    #[serde(default)]
    #[schema(example = 7)]
    pub id: Option<i64>,
    /// Display name.
    #[schema(example = "Ada")]
    pub name: String,
    /// Contact email; not validated.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Age in years as supplied by the caller.
    #[schema(example = 36)]
    pub age: i64,
}

impl RawUser {
    /// Return the validated identifier, rejecting absent or zero ids.
    pub fn require_id(&self) -> Result<UserId, UserValidationError> {
        self.id
            .ok_or(UserValidationError::MissingId)
            .and_then(UserId::new)
    }
}
