//! Login domain
//!
//! The transient login request, its validation, the stages a login passes
//! through, and the successful outcome handed back to the caller.

mod request;
mod stage;

pub use request::{Credentials, LoginRequest};
pub use stage::LoginStage;

use crate::domain::identity::{AuthenticatedUser, Session};
use crate::domain::tenant::TenantDescriptor;

/// Outcome of a successful tenant login
#[derive(Debug, Clone)]
pub struct TenantLogin {
    pub session: Session,
    pub user: AuthenticatedUser,
    pub organization: TenantDescriptor,
}
