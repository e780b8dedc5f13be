//! Legión Spartana Booking Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod form;
pub mod routes;
pub mod state;
pub mod store;
