use thiserror::Error;

/// Core domain errors
///
/// Every variant belongs to exactly one failure class, and the API layer maps
/// each class to a single HTTP status.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or incomplete request input (400)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Unknown tenant (404)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Known tenant, user not mapped to it (403)
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Credentials rejected by the tenant identity provider (401)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A backing store could not be reached or answered unexpectedly (500)
    #[error("Store error: {store} - {message}")]
    Store { store: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn store(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// The message without the class prefix, suitable for response bodies
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Forbidden { message }
            | Self::Authentication { message }
            | Self::Configuration { message } => message.clone(),
            Self::Store { store, message } => format!("{}: {}", store, message),
        }
    }

    /// Whether this error is an infrastructure failure rather than a client-caused one
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Store { .. } | Self::Configuration { .. })
    }
}
