//! Event data model shared by the core engine and the calendar gateway.
//!
//! Instants are carried as offset-naive `chrono` values: the wall-clock time
//! written on the calendar is authoritative, and all ordering, grouping, and
//! window membership is computed on the parsed values rather than raw strings.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Workflow state of getting an adult committed to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    NeedsAssignment,
    AwaitingResponse,
    Confirmed,
}

impl AssignmentStatus {
    /// Wire/UI identifier for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::NeedsAssignment => "needs-assignment",
            AssignmentStatus::AwaitingResponse => "awaiting-response",
            AssignmentStatus::Confirmed => "confirmed",
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "needs-assignment" => Ok(AssignmentStatus::NeedsAssignment),
            "awaiting-response" => Ok(AssignmentStatus::AwaitingResponse),
            "confirmed" => Ok(AssignmentStatus::Confirmed),
            other => Err(format!("unknown assignment status: {other}")),
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The adult currently attached to an event, as derived from attendee data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedAdult {
    /// Email with the verbatim casing found on the event.
    pub email: String,
    /// Display name, the local part of the email.
    pub name: String,
    /// Raw response state string from the calendar source.
    pub response_status: String,
}

/// A roster adult. Identity is the email, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adult {
    pub email: String,
    pub name: String,
}

impl Adult {
    /// Build a roster entry from an email, deriving the display name
    /// from the local part.
    pub fn from_email(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: email_local_part(email).to_string(),
        }
    }
}

/// Attendee entry as the calendar source supplies it. Both fields may be
/// absent in real data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<String>,
}

/// A single, already-expanded calendar event enriched with assignment state
/// and child attribution. Recomputed wholesale on every fetch.
///
/// Invariant: `status == NeedsAssignment` exactly when `assigned_adult` is
/// `None`; any other status carries the adult whose response produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Opaque identifier, stable across refreshes.
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub status: AssignmentStatus,
    /// Attributed child, if a roster name appears in the title.
    pub kid: Option<String>,
    pub assigned_adult: Option<AssignedAdult>,
}

impl CalendarEvent {
    /// Calendar day the event starts on; the grouping key for day buckets.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Local part of an email address (text before `@`).
pub(crate) fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or("")
}
