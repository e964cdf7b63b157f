//! Error types for chaperone-core.
//!
//! The pure engine modules are total over well-formed input and raise no
//! errors; everything here belongs to the gateway and configuration
//! boundaries, where transport, authorization, and malformed source data
//! must be caught and translated.

use std::path::PathBuf;
use thiserror::Error;

/// Calendar gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The Calendar API answered with an error payload or status.
    #[error("Calendar API error: {0}")]
    CalendarApi(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The bearer credential was rejected; the surrounding session layer
    /// must refresh or re-authenticate.
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    /// The source supplied an event the core cannot work with (missing id,
    /// missing or unparseable start instant).
    #[error("Invalid event data for '{event_id}': {reason}")]
    InvalidEventData { event_id: String, reason: String },

    /// Acceptance was requested for a user who is not on the event.
    #[error("{email} is not an attendee of event {event_id}")]
    NotAnAttendee { event_id: String, email: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}
