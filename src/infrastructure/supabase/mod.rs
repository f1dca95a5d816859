//! Supabase adapters
//!
//! PostgREST reads against the management store and GoTrue password
//! authentication against tenant databases.

mod factory;
mod gotrue;
mod http_client;
mod postgrest;

pub use factory::SupabaseIdentityProviderFactory;
pub use gotrue::GoTrueIdentityProvider;
pub use http_client::build_http_client;
pub use postgrest::PostgrestTenantDirectory;
