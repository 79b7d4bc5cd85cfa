// --- File: crates/salon_api/src/lib.rs ---
//! HTTP implementation of the salon gateways.
//!
//! [`ApiClient`] talks JSON to the salon REST API and implements
//! [`AvailabilityGateway`](salon_common::AvailabilityGateway),
//! [`AppointmentGateway`](salon_common::AppointmentGateway) and
//! [`IdentityGateway`](salon_common::IdentityGateway) on top of it.

pub mod client;
pub mod error;
mod gateways;

#[cfg(test)]
mod client_test;

pub use client::ApiClient;
pub use error::ApiError;
