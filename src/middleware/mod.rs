//! Request gate and identity extractor.
//!
//! 1. [`auth::require_bearer`] runs in front of every route except the public
//!    `GET` ones (service info, health, docs).
//! 2. The `Authorization` header is forwarded unchanged to the introspection
//!    endpoint; any 2xx answer authorizes the request.
//! 3. Handlers that care who is calling take an [`auth::AuthIdentity`].

pub mod auth;
