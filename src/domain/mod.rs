//! Domain layer - Core business logic and entities

pub mod error;
pub mod identity;
pub mod login;
pub mod tenant;

pub use error::DomainError;
pub use identity::{
    AuthenticatedUser, IdentityProvider, IdentityProviderFactory, PasswordGrant, Session,
};
pub use login::{Credentials, LoginRequest, LoginStage, TenantLogin};
pub use tenant::{
    Organization, OrganizationId, TenantConnection, TenantDescriptor, TenantDirectory,
    UserOrganization,
};
