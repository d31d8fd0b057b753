//! User data model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a user name.
pub const USER_NAME_MAX: usize = 255;
/// Maximum number of characters accepted for an email address.
pub const EMAIL_MAX: usize = 255;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a positive integer")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("email must look like local@domain.tld")]
    InvalidEmail,
    #[error("updated_at must not precede created_at")]
    TimestampsOutOfOrder,
}

impl UserValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
            Self::TimestampsOutOfOrder => "updatedAt",
        }
    }

    /// Stable machine-readable reason, used in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::EmptyEmail => "empty_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::TimestampsOutOfOrder => "timestamps_out_of_order",
        }
    }
}

/// Server-assigned user identifier.
///
/// Identifiers come from the database sequence and are always positive.
///
/// # Examples
/// ```
/// use users_backend::domain::UserId;
///
/// let id: UserId = "42".parse().expect("valid id");
/// assert_eq!(id.as_i64(), 42);
/// assert!("0".parse::<UserId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored in the database.
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<i64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Display name of a user, trimmed and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a name read back from storage without re-validating it.
    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address of a user. Uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap an address read back from storage without re-validating it.
    pub(crate) fn from_stored(email: String) -> Self {
        Self(email)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Client-supplied fields for creating or replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    name: UserName,
    email: EmailAddress,
}

impl UserRequest {
    /// Build a request from already validated parts.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Validate raw strings into a request.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::UserRequest;
    ///
    /// let request = UserRequest::try_from_strings(" Ada ", "ada@example.com").expect("valid");
    /// assert_eq!(request.name().as_ref(), "Ada");
    /// ```
    pub fn try_from_strings(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserName::new(name)?, EmailAddress::new(email)?))
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` is positive and assigned by the store.
/// - `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from stored parts, checking timestamp order.
    pub fn try_new(
        id: UserId,
        name: UserName,
        email: EmailAddress,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        if updated_at < created_at {
            return Err(UserValidationError::TimestampsOutOfOrder);
        }
        Ok(Self {
            id,
            name,
            email,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            created_at,
            updated_at,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at,
            updated_at,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_new(
            UserId::new(value.id)?,
            UserName::new(value.name)?,
            EmailAddress::new(value.email)?,
            value.created_at,
            value.updated_at,
        )
    }
}
