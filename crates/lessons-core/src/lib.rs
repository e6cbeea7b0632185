//! # Lessons Core
//!
//! Core types shared by every crate of the Lessons API.
//!
//! - [`errors`]: [`AppError`] and the `{statusCode, message, error}` response envelope
//!
//! # Example
//!
//! ```ignore
//! use lessons_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Lesson with ID {} not found", id));
//! ```

pub mod errors;

pub use errors::{AppError, ErrorResponse};
