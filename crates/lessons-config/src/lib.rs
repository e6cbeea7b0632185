//! # Lessons Config
//!
//! Configuration types for the Lessons API.
//!
//! Every struct is loaded once at startup with `from_env()` and then passed
//! around by value or reference; nothing in the request path reads the
//! process environment.
//!
//! - [`oauth`]: token introspection endpoint resolution and timeout
//! - [`server`]: listen address
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: connection pool sizing
//!
//! # Example
//!
//! ```ignore
//! use lessons_config::{CorsConfig, OAuthConfig, ServerConfig};
//!
//! let oauth_config = OAuthConfig::from_env();
//! println!("validating tokens against {}", oauth_config.validate_endpoint());
//! ```

pub mod cors;
pub mod database;
pub mod oauth;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use oauth::{InternalOAuthHost, OAuthConfig};
pub use server::ServerConfig;
