//! Derived attributes computed from a raw user.
//!
//! Derivation is pure: the same [`RawUser`] always yields the same
//! [`DerivedFields`]. Callers validate the identifier first; nothing here
//! can fail.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RawUser;

/// Placeholder domain for emails without an `@`.
pub const UNKNOWN_EMAIL_DOMAIN: &str = "unknown";

const ADULT_AGE: i64 = 18;
const MIDDLE_AGE_START: i64 = 30;
const SENIOR_AGE_START: i64 = 50;

/// Coarse age bucket fixed at derivation time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    /// Younger than 30.
    Young,
    /// From 30 up to 49.
    Middle,
    /// 50 and over.
    Senior,
}

impl AgeCategory {
    /// Every category in histogram order.
    pub const ALL: [Self; 3] = [Self::Young, Self::Middle, Self::Senior];

    /// Bucket an age.
    ///
    /// # Examples
    /// ```
    /// use dataproc::domain::AgeCategory;
    ///
    /// assert_eq!(AgeCategory::from_age(29), AgeCategory::Young);
    /// assert_eq!(AgeCategory::from_age(30), AgeCategory::Middle);
    /// assert_eq!(AgeCategory::from_age(50), AgeCategory::Senior);
    /// ```
    #[must_use]
    pub fn from_age(age: i64) -> Self {
        if age < MIDDLE_AGE_START {
            Self::Young
        } else if age < SENIOR_AGE_START {
            Self::Middle
        } else {
            Self::Senior
        }
    }

    /// Deterministic age substituted when the live age cannot be fetched.
    #[must_use]
    pub fn fallback_age(self) -> f64 {
        match self {
            Self::Young => 25.0,
            Self::Middle => 40.0,
            Self::Senior => 60.0,
        }
    }

    /// Stable wire label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Young => "young",
            Self::Middle => "middle",
            Self::Senior => "senior",
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes computed from a raw user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DerivedFields {
    /// Number of characters in the name.
    pub name_length: usize,
    /// Text after the last `@` in the email, or `"unknown"`.
    pub email_domain: String,
    /// Age bucket assigned at processing time.
    pub age_category: AgeCategory,
    /// Name in upper case.
    pub name_uppercase: String,
    /// Email in upper case.
    pub email_uppercase: String,
    /// Square of the age, saturating at `i64::MAX`.
    pub age_squared: i64,
    /// Whether the age is at least 18.
    pub is_adult: bool,
}

/// Compute the derived attributes for `user`.
///
/// # Examples
/// ```
/// use dataproc::domain::{derive, AgeCategory, RawUser};
///
/// let fields = derive(&RawUser {
///     id: Some(1),
///     name: "Ada".to_owned(),
///     email: "ada@example.com".to_owned(),
///     age: 36,
/// });
/// assert_eq!(fields.email_domain, "example.com");
/// assert_eq!(fields.age_category, AgeCategory::Middle);
/// assert_eq!(fields.age_squared, 1296);
/// ```
#[must_use]
pub fn derive(user: &RawUser) -> DerivedFields {
    DerivedFields {
        name_length: user.name.chars().count(),
        email_domain: email_domain(&user.email).to_owned(),
        age_category: AgeCategory::from_age(user.age),
        name_uppercase: user.name.to_uppercase(),
        email_uppercase: user.email.to_uppercase(),
        age_squared: user.age.saturating_mul(user.age),
        is_adult: user.age >= ADULT_AGE,
    }
}

fn email_domain(email: &str) -> &str {
    email
        .rsplit_once('@')
        .map_or(UNKNOWN_EMAIL_DOMAIN, |(_, domain)| domain)
}
