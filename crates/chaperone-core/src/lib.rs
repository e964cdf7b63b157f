//! # Chaperone Core Library
//!
//! Core business logic for Chaperone, a shared-childcare scheduler over a
//! shared Google calendar: every event must be assigned to one of a fixed
//! set of adults, the adult must respond, and the view groups and filters
//! events by day, child, status, assignee, and date window.
//!
//! ## Architecture
//!
//! - **Engine** (`assignment`, `kid`, `window`, `filter`, `view`): pure,
//!   synchronous functions over an enriched event collection. No shared
//!   state, no I/O; rosters are passed in explicitly.
//! - **Gateway** (`gateway`): the only effectful boundary -- fetches raw
//!   events from the Google Calendar API and performs the attendee patches
//!   behind assignment and acceptance, with OAuth token refresh.
//! - **Config** (`config`): TOML-backed rosters, calendar id, and OAuth
//!   client credentials.
//!
//! Events are recomputed wholesale on every fetch; enrichment and views are
//! derived values, recomputed whenever sources or criteria change.

pub mod assignment;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod gateway;
pub mod kid;
pub mod view;
pub mod window;

pub use assignment::{classify, Classification};
pub use config::Config;
pub use error::{ConfigError, GatewayError};
pub use event::{Adult, AssignedAdult, AssignmentStatus, Attendee, CalendarEvent};
pub use filter::{
    date_counts, filter_events, status_counts, AssigneeFilter, FilterCriteria, StatusCounts,
    StatusFilter,
};
pub use gateway::CalendarGateway;
pub use kid::detect_kid;
pub use view::{group_by_day_and_kid, DayGroup, KidGroup, OTHER_BUCKET};
pub use window::{DateFilter, DateWindow};
