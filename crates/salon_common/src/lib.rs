// --- File: crates/salon_common/src/lib.rs ---

// Declare modules within this crate
pub mod credentials; // Shared bearer credential handle
pub mod error;       // Error handling
pub mod http;        // HTTP utilities
pub mod logging;     // Logging utilities
pub mod models;      // Data structures shared with the REST API
pub mod services;    // Gateway abstractions
pub mod storage;     // Durable key/value storage


// Re-export error types and utilities for easier access
pub use error::{
    SalonError,
    HttpStatusCode,
    Context,
    config_error,
    validation_error,
    not_found,
    storage_error,
    internal_error,
};

pub use credentials::CredentialHandle;

// Re-export HTTP utilities for easier access
pub use http::{
    error_message_from_body,
    join_url,
    client::{build_client, create_client},
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_config, init_with_level, log_error, log_result};

pub use services::{AppointmentGateway, AvailabilityGateway, BoxFuture, IdentityGateway};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
