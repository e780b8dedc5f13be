//! Core types for the booking storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod service;

pub use id::*;
pub use service::ServiceKind;
