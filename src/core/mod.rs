//! Core types and error handling for makepick.
//!
//! The [`error`] module defines [`MakepickError`], the typed error every other
//! module reports through, and [`ErrorContext`] for presenting those errors to
//! CLI users with details and suggestions.

pub mod error;

pub use error::{ErrorContext, IntoAnyhowWithContext, MakepickError, user_friendly_error};
