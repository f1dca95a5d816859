//! Identity domain
//!
//! Sessions and users issued by a tenant's own identity provider, and the
//! traits used to reach that provider.

mod entity;
mod provider;

pub use entity::{AuthenticatedUser, PasswordGrant, Session};
pub use provider::{IdentityProvider, IdentityProviderFactory};

#[cfg(test)]
pub use provider::{MockIdentityProvider, MockIdentityProviderFactory};
