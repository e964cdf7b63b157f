//! Two-level day/kid grouping for the scheduling view.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::CalendarEvent;

/// Bucket name for events with no attributed child.
pub const OTHER_BUCKET: &str = "Other";

/// Events for one child (or the `"Other"` bucket) within a day, ordered by
/// start instant ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KidGroup {
    pub kid: String,
    pub events: Vec<CalendarEvent>,
}

/// One calendar day of the view: date key, display label, and the ordered
/// kid buckets. Comparisons always use `date`; `label` is display-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    #[serde(rename = "dateLabel")]
    pub label: String,
    #[serde(rename = "kidGroups")]
    pub kid_groups: Vec<KidGroup>,
}

/// Partition events into day buckets, then kid buckets within each day.
///
/// Days are ordered chronologically ascending; kid buckets alphabetically
/// with `"Other"` forced last; events within a bucket by start instant
/// ascending. Pure and deterministic -- safe to recompute on every filter
/// change.
pub fn group_by_day_and_kid(events: &[CalendarEvent]) -> Vec<DayGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        by_date.entry(event.start_date()).or_default().push(event);
    }

    by_date
        .into_iter()
        .map(|(date, day_events)| {
            let mut by_kid: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
            for event in day_events {
                let kid = event.kid.clone().unwrap_or_else(|| OTHER_BUCKET.to_string());
                by_kid.entry(kid).or_default().push(event.clone());
            }

            let mut kid_groups: Vec<KidGroup> = by_kid
                .into_iter()
                .map(|(kid, mut events)| {
                    events.sort_by_key(|e| e.start);
                    KidGroup { kid, events }
                })
                .collect();
            // BTreeMap iteration is already alphabetical; only the Other
            // bucket needs to move to the end.
            kid_groups.sort_by_key(|group| group.kid == OTHER_BUCKET);

            DayGroup {
                date,
                label: day_label(date),
                kid_groups,
            }
        })
        .collect()
}

/// Human label for a day heading, e.g. "Wednesday, Jan 15".
fn day_label(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AssignmentStatus;

    fn event(id: &str, title: &str, start: &str, kid: Option<&str>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            start: start.parse().unwrap(),
            end: start.parse().unwrap(),
            all_day: false,
            status: AssignmentStatus::NeedsAssignment,
            kid: kid.map(String::from),
            assigned_adult: None,
        }
    }

    #[test]
    fn groups_events_by_date() {
        let events = [
            event("1", "Event 1", "2024-01-15T10:00:00", Some("Asa")),
            event("2", "Event 2", "2024-01-16T10:00:00", Some("Asa")),
        ];
        let groups = group_by_day_and_kid(&events);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date.to_string(), "2024-01-15");
        assert_eq!(groups[1].date.to_string(), "2024-01-16");
    }

    #[test]
    fn groups_by_kid_within_a_day_with_events_in_start_order() {
        // Unsorted input: Asa, Zola, Asa on the same day.
        let events = [
            event("1", "Asa Piano", "2024-01-15T16:00:00", Some("Asa")),
            event("2", "Zola Dance", "2024-01-15T14:00:00", Some("Zola")),
            event("3", "Asa Soccer", "2024-01-15T10:00:00", Some("Asa")),
        ];
        let groups = group_by_day_and_kid(&events);
        assert_eq!(groups.len(), 1);
        let kids: Vec<&str> = groups[0].kid_groups.iter().map(|g| g.kid.as_str()).collect();
        assert_eq!(kids, ["Asa", "Zola"]);
        let asa_ids: Vec<&str> = groups[0].kid_groups[0]
            .events
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(asa_ids, ["3", "1"]);
    }

    #[test]
    fn null_kid_lands_in_other_sorted_last() {
        let events = [
            event("1", "Family Event", "2024-01-15T10:00:00", None),
            event("2", "Zola Dance", "2024-01-15T14:00:00", Some("Zola")),
            event("3", "Asa Soccer", "2024-01-15T16:00:00", Some("Asa")),
        ];
        let groups = group_by_day_and_kid(&events);
        let kids: Vec<&str> = groups[0].kid_groups.iter().map(|g| g.kid.as_str()).collect();
        assert_eq!(kids, ["Asa", "Zola", OTHER_BUCKET]);
    }

    #[test]
    fn days_are_sorted_chronologically() {
        let events = [
            event("1", "Event", "2024-01-20T10:00:00", Some("Asa")),
            event("2", "Event", "2024-01-15T10:00:00", Some("Asa")),
            event("3", "Event", "2024-01-18T10:00:00", Some("Asa")),
        ];
        let groups = group_by_day_and_kid(&events);
        let dates: Vec<String> = groups.iter().map(|g| g.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-15", "2024-01-18", "2024-01-20"]);
    }

    #[test]
    fn day_label_is_locale_formatted() {
        let events = [event("1", "Event", "2025-01-15T10:00:00", None)];
        let groups = group_by_day_and_kid(&events);
        assert_eq!(groups[0].label, "Wednesday, Jan 15");
    }

    #[test]
    fn empty_input_yields_empty_view() {
        assert!(group_by_day_and_kid(&[]).is_empty());
    }

    #[test]
    fn view_serializes_with_presentation_field_names() {
        let events = [event("1", "Event", "2024-01-15T10:00:00", None)];
        let json = serde_json::to_value(group_by_day_and_kid(&events)).unwrap();
        assert_eq!(json[0]["date"], "2024-01-15");
        assert!(json[0]["dateLabel"].is_string());
        assert_eq!(json[0]["kidGroups"][0]["kid"], OTHER_BUCKET);
    }
}
