//! HTTP API gateway for the artisan directory service.
//!
//! Exposes artisan creation and listing, artisan self-registration with
//! optional webhook forwarding, analytics events, and health/diagnostic
//! probes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod forward;
pub mod routes;
pub mod state;
