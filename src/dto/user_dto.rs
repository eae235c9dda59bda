use crate::model::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Public projection of a user row. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 255, message = "must be between 2 and 255 characters"))]
    pub name: String,

    #[validate(
        email(message = "must be a valid email address"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,

    /// Optional role; validated against the known roles in the handler.
    pub role: Option<String>,
}

impl SignUpRequest {
    /// Trim the name and trim + lower-case the email before validation.
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl SignInRequest {
    pub fn normalize(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

/// Partial update payload. Supplying no recognized field is not an error;
/// the update becomes a no-op returning the current record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 255, message = "must be between 2 and 255 characters"))]
    pub name: Option<String>,

    #[validate(
        email(message = "must be a valid email address"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: Option<String>,

    pub role: Option<String>,
}

impl UpdateUserRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.map(|name| name.trim().to_string());
        self.email = self.email.map(|email| email.trim().to_lowercase());
        self
    }
}

/// Parse an optional role string against the known roles, producing a
/// field-level validation message on mismatch.
pub fn parse_role(role: &Option<String>) -> Result<Option<UserRole>, Vec<String>> {
    match role.as_deref() {
        None => Ok(None),
        Some(value) => value
            .parse::<UserRole>()
            .map(Some)
            .map_err(|_| vec!["role: must be either 'user' or 'admin'".to_string()]),
    }
}
