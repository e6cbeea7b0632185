//! # Lessons Auth
//!
//! Bearer token introspection for the Lessons API.
//!
//! The service does not issue or verify tokens itself. Every request's
//! `Authorization` header is forwarded, unchanged, to an external OAuth
//! service with an empty-body `POST`. A 2xx answer authorizes the request;
//! anything else (including a transport failure or timeout) rejects it.
//!
//! - [`client`]: [`IntrospectionClient`], the HTTP call and response interpretation
//! - [`identity`]: [`IdentityContext`], the payload returned by the authority
//!
//! # Example
//!
//! ```ignore
//! use lessons_auth::IntrospectionClient;
//! use lessons_config::OAuthConfig;
//!
//! let client = IntrospectionClient::new(&OAuthConfig::from_env())?;
//! let identity = client.introspect("Bearer abc123").await?;
//! println!("subject: {:?}", identity.subject());
//! ```

pub mod client;
pub mod identity;

// Re-export commonly used types at crate root
pub use client::{IntrospectionClient, IntrospectionError};
pub use identity::IdentityContext;
