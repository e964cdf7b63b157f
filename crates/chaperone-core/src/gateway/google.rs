//! Google Calendar API gateway.
//!
//! Supplies raw events (enriched into [`CalendarEvent`]s on the way in) and
//! performs the attendee-list mutations behind assignment and acceptance.
//! The caller supplies a valid bearer credential; refresh is the session
//! layer's job (see [`super::oauth`]).

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::assignment::classify;
use crate::error::GatewayError;
use crate::event::{Attendee, CalendarEvent};
use crate::kid::detect_kid;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// How far ahead a fetch looks, matching the scheduling horizon of the view.
const FETCH_HORIZON_DAYS: i64 = 30;

/// Client for one shared calendar.
pub struct CalendarGateway {
    calendar_id: String,
    api_base: String,
    client: reqwest::Client,
}

impl CalendarGateway {
    pub fn new(calendar_id: &str) -> Self {
        Self::with_api_base(calendar_id, DEFAULT_API_BASE)
    }

    /// Client against a non-default API base; used by tests.
    pub fn with_api_base(calendar_id: &str, api_base: &str) -> Self {
        Self {
            calendar_id: calendar_id.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the upcoming-events snapshot and enrich each item with
    /// assignment status and child attribution.
    ///
    /// Asks the API for already-expanded single instances, ordered by start
    /// time, within the scheduling horizon. The result fully supersedes any
    /// previously fetched collection.
    pub async fn list_events(
        &self,
        access_token: &str,
        adult_emails: &[String],
        kid_names: &[String],
    ) -> Result<Vec<CalendarEvent>, GatewayError> {
        let now = Utc::now();
        let horizon = now + Duration::days(FETCH_HORIZON_DAYS);

        let params = [
            ("timeMin", now.to_rfc3339()),
            ("timeMax", horizon.to_rfc3339()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!(
            "{}/calendars/{}/events?{}",
            self.api_base, self.calendar_id, query
        );

        let resp = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;
        let body: Value = check_response(resp).await?.json().await?;

        if let Some(err) = body.get("error") {
            return Err(GatewayError::CalendarApi(err.to_string()));
        }

        let items = body["items"].as_array().cloned().unwrap_or_default();
        let events = items
            .iter()
            .map(|item| event_from_item(item, adult_emails, kid_names))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = events.len(), calendar = %self.calendar_id, "fetched events");
        Ok(events)
    }

    /// Assign an adult to each listed event, sequentially.
    ///
    /// Per event: read current attendees, strip every roster adult
    /// (case-insensitively), append the new adult as `needsAction`, write
    /// back with notifications. Earlier successes are not rolled back when a
    /// later event fails; the error reports the batch as a whole.
    pub async fn assign_adult(
        &self,
        access_token: &str,
        event_ids: &[String],
        adult_email: &str,
        adult_emails: &[String],
    ) -> Result<(), GatewayError> {
        let roster: Vec<String> = adult_emails.iter().map(|e| e.to_lowercase()).collect();

        for event_id in event_ids {
            let event = self.get_event(access_token, event_id).await?;
            let existing = event["attendees"].as_array().cloned().unwrap_or_default();

            let mut updated: Vec<Value> = existing
                .into_iter()
                .filter(|a| {
                    !a["email"]
                        .as_str()
                        .is_some_and(|e| roster.contains(&e.to_lowercase()))
                })
                .collect();
            updated.push(json!({
                "email": adult_email,
                "responseStatus": "needsAction",
            }));

            self.patch_attendees(access_token, event_id, &updated, true)
                .await?;
            info!(event_id = %event_id, adult = %adult_email, "assigned adult");
        }

        Ok(())
    }

    /// Mark the user's own attendee entry as accepted, leaving every other
    /// attendee untouched.
    pub async fn accept_invite(
        &self,
        access_token: &str,
        event_id: &str,
        user_email: &str,
    ) -> Result<(), GatewayError> {
        let event = self.get_event(access_token, event_id).await?;
        let attendees = event["attendees"].as_array().cloned().unwrap_or_default();

        let mut matched = false;
        let updated: Vec<Value> = attendees
            .into_iter()
            .map(|mut attendee| {
                let is_user = attendee["email"]
                    .as_str()
                    .is_some_and(|e| e.to_lowercase() == user_email.to_lowercase());
                if is_user {
                    matched = true;
                    attendee["responseStatus"] = json!("accepted");
                }
                attendee
            })
            .collect();

        if !matched {
            return Err(GatewayError::NotAnAttendee {
                event_id: event_id.to_string(),
                email: user_email.to_string(),
            });
        }

        self.patch_attendees(access_token, event_id, &updated, false)
            .await?;
        info!(event_id = %event_id, email = %user_email, "accepted invite");
        Ok(())
    }

    /// Replace an event's attendee list.
    pub async fn patch_attendees(
        &self,
        access_token: &str,
        event_id: &str,
        attendees: &[Value],
        send_updates: bool,
    ) -> Result<(), GatewayError> {
        let mut url = format!(
            "{}/calendars/{}/events/{}",
            self.api_base, self.calendar_id, event_id
        );
        if send_updates {
            url.push_str("?sendUpdates=all");
        }

        let resp = self
            .client
            .patch(&url)
            .bearer_auth(access_token)
            .json(&json!({ "attendees": attendees }))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn get_event(&self, access_token: &str, event_id: &str) -> Result<Value, GatewayError> {
        let url = format!(
            "{}/calendars/{}/events/{}",
            self.api_base, self.calendar_id, event_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::EventNotFound {
                event_id: event_id.to_string(),
            });
        }
        Ok(check_response(resp).await?.json().await?)
    }
}

/// Translate transport/authorization outcomes at the boundary.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    match resp.status() {
        status if status.is_success() => Ok(resp),
        StatusCode::UNAUTHORIZED => Err(GatewayError::AuthenticationRequired),
        status => {
            let body = resp.text().await.unwrap_or_default();
            Err(GatewayError::CalendarApi(format!("HTTP {status}: {body}")))
        }
    }
}

/// Build an enriched [`CalendarEvent`] from a raw API item.
///
/// A missing id or a missing/unparseable start token is invalid source data;
/// a missing title or end degrades gracefully.
pub fn event_from_item(
    item: &Value,
    adult_emails: &[String],
    kid_names: &[String],
) -> Result<CalendarEvent, GatewayError> {
    let id = item["id"]
        .as_str()
        .ok_or_else(|| GatewayError::InvalidEventData {
            event_id: "<unknown>".to_string(),
            reason: "missing event id".to_string(),
        })?;

    let title = item["summary"].as_str().unwrap_or("Untitled Event");
    let all_day = item["start"]["dateTime"].as_str().is_none();

    let start_raw = item["start"]["dateTime"]
        .as_str()
        .or_else(|| item["start"]["date"].as_str())
        .ok_or_else(|| GatewayError::InvalidEventData {
            event_id: id.to_string(),
            reason: "missing start instant".to_string(),
        })?;
    let start = parse_instant(start_raw).ok_or_else(|| GatewayError::InvalidEventData {
        event_id: id.to_string(),
        reason: format!("unparseable start instant: {start_raw}"),
    })?;

    let end = item["end"]["dateTime"]
        .as_str()
        .or_else(|| item["end"]["date"].as_str())
        .and_then(parse_instant)
        .unwrap_or(start);

    let attendees: Option<Vec<Attendee>> = match item.get("attendees") {
        Some(Value::Null) | None => None,
        Some(value) => Some(serde_json::from_value(value.clone())?),
    };
    let classification = classify(attendees.as_deref(), adult_emails);

    Ok(CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        start,
        end,
        all_day,
        status: classification.status,
        kid: detect_kid(title, kid_names),
        assigned_adult: classification.assigned_adult,
    })
}

/// Parse a source instant into a local wall-clock value.
///
/// RFC 3339 offsets are dropped: the written local time is what the shared
/// calendar means. Date-only tokens (all-day events) map to midnight.
fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    None
}
