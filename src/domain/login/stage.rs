//! Per-request login progression

use std::fmt;

/// Stages a login request moves through, strictly in order
///
/// A failure at any stage ends the request; the stage reached is reported
/// alongside the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginStage {
    Received,
    Validated,
    TenantResolved,
    Authorized,
    Authenticated,
    Responded,
}

impl LoginStage {
    /// The stage that follows this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Validated),
            Self::Validated => Some(Self::TenantResolved),
            Self::TenantResolved => Some(Self::Authorized),
            Self::Authorized => Some(Self::Authenticated),
            Self::Authenticated => Some(Self::Responded),
            Self::Responded => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::TenantResolved => "tenant_resolved",
            Self::Authorized => "authorized",
            Self::Authenticated => "authenticated",
            Self::Responded => "responded",
        }
    }
}

impl fmt::Display for LoginStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
