//! Legión Spartana Core - Shared types library.
//!
//! This crate provides the domain types consumed by the workspace's other
//! crates: the `storefront` binary (public-facing booking site) and the
//! `integration-tests` crate (end-to-end tests over the router).
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Shops and
//! reservations live in the hosted data store; this crate only names them.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the barbershop service menu

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
