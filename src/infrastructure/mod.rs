//! Infrastructure layer - External service implementations

pub mod logging;
pub mod services;
pub mod supabase;
