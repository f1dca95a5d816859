//! Login request and required-field validation

use serde::Deserialize;

use crate::domain::DomainError;

/// Raw login body as submitted by the client
///
/// Every field is optional at the parsing stage so that missing fields are
/// reported together as a validation failure rather than a JSON error.
#[derive(Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub organization_slug: Option<String>,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("organization_slug", &self.organization_slug)
            .finish()
    }
}

impl LoginRequest {
    /// Names of the required fields that are absent or empty, in wire spelling
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("email", &self.email),
            ("password", &self.password),
            ("organizationSlug", &self.organization_slug),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// Check that all required fields are present
    pub fn validate(self) -> Result<Credentials, DomainError> {
        let missing = self.missing_fields();

        match (
            non_empty(self.email),
            non_empty(self.password),
            non_empty(self.organization_slug),
        ) {
            (Some(email), Some(password), Some(organization_slug)) => Ok(Credentials {
                email,
                password,
                organization_slug,
            }),
            _ => Err(DomainError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validated tenant-scoped login credentials
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
    organization_slug: String,
}

impl Credentials {
    /// Email as submitted, used for tenant authentication
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Email normalized for the user-to-organization lookup
    pub fn membership_email(&self) -> String {
        self.email.to_lowercase()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn organization_slug(&self) -> &str {
        &self.organization_slug
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("organization_slug", &self.organization_slug)
            .finish()
    }
}
