//! Predicate composition over the enriched event collection.
//!
//! Four independent criteria, all of which must pass: status, free-text
//! search, assignee, and an optional date window. Filtering preserves input
//! order among surviving events.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::event::{AssignmentStatus, CalendarEvent};
use crate::window::DateFilter;

/// Status criterion: everything, or one exact status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AssignmentStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Assignee criterion. `Adult` carries a literal email compared with
/// case-sensitive equality -- deliberately stricter than the
/// case-insensitive roster matching elsewhere, because the value comes from
/// an exact-match UI selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssigneeFilter {
    #[default]
    All,
    Unassigned,
    Adult(String),
}

impl AssigneeFilter {
    /// Map a UI selection value onto the criterion.
    pub fn from_selection(value: &str) -> Self {
        match value {
            "all" => AssigneeFilter::All,
            "unassigned" => AssigneeFilter::Unassigned,
            email => AssigneeFilter::Adult(email.to_string()),
        }
    }
}

/// The four filter criteria, composed with logical AND.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    /// Case-insensitive title substring; empty always passes.
    pub search: String,
    pub assignee: AssigneeFilter,
    /// Date window, resolved against the `now` passed to [`filter_events`].
    pub window: Option<DateFilter>,
}

/// Apply the criteria to a collection, returning the survivors in input
/// order. The date window is resolved once per call, not per event.
pub fn filter_events(
    events: &[CalendarEvent],
    criteria: &FilterCriteria,
    now: NaiveDateTime,
) -> Vec<CalendarEvent> {
    let window = criteria.window.map(|option| option.window(now));
    let search = criteria.search.to_lowercase();

    events
        .iter()
        .filter(|event| {
            if let StatusFilter::Only(status) = criteria.status {
                if event.status != status {
                    return false;
                }
            }
            if !search.is_empty() && !event.title.to_lowercase().contains(&search) {
                return false;
            }
            match &criteria.assignee {
                AssigneeFilter::All => {}
                AssigneeFilter::Unassigned => {
                    if event.assigned_adult.is_some() {
                        return false;
                    }
                }
                AssigneeFilter::Adult(email) => {
                    let assigned = event
                        .assigned_adult
                        .as_ref()
                        .is_some_and(|adult| adult.email == *email);
                    if !assigned {
                        return false;
                    }
                }
            }
            window.is_none_or(|w| w.contains_event(event))
        })
        .cloned()
        .collect()
}

/// Event tallies per status, for the status filter row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub needs_assignment: usize,
    pub awaiting_response: usize,
    pub confirmed: usize,
}

pub fn status_counts(events: &[CalendarEvent]) -> StatusCounts {
    let mut counts = StatusCounts {
        all: events.len(),
        ..StatusCounts::default()
    };
    for event in events {
        match event.status {
            AssignmentStatus::NeedsAssignment => counts.needs_assignment += 1,
            AssignmentStatus::AwaitingResponse => counts.awaiting_response += 1,
            AssignmentStatus::Confirmed => counts.confirmed += 1,
        }
    }
    counts
}

/// Event tallies per date-window option, for the date filter row. Windows
/// are resolved once each; events are tested by pre-parsed start instant.
pub fn date_counts(
    events: &[CalendarEvent],
    now: NaiveDateTime,
) -> Vec<(DateFilter, usize)> {
    DateFilter::ALL
        .into_iter()
        .map(|option| {
            let window = option.window(now);
            let count = events.iter().filter(|e| window.contains_event(e)).count();
            (option, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AssignedAdult;

    fn event(
        id: &str,
        title: &str,
        start: &str,
        status: AssignmentStatus,
        adult: Option<(&str, &str)>,
    ) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            start: start.parse().unwrap(),
            end: start.parse().unwrap(),
            all_day: false,
            status,
            kid: None,
            assigned_adult: adult.map(|(email, response)| AssignedAdult {
                email: email.to_string(),
                name: crate::event::email_local_part(email).to_string(),
                response_status: response.to_string(),
            }),
        }
    }

    fn fixture() -> Vec<CalendarEvent> {
        vec![
            event(
                "1",
                "Asa Soccer",
                "2024-01-15T10:00:00",
                AssignmentStatus::NeedsAssignment,
                None,
            ),
            event(
                "2",
                "Zola Dance",
                "2024-01-15T14:00:00",
                AssignmentStatus::Confirmed,
                Some(("parent1@gmail.com", "accepted")),
            ),
            event(
                "3",
                "Asa Piano",
                "2024-01-15T16:00:00",
                AssignmentStatus::AwaitingResponse,
                Some(("parent2@gmail.com", "needsAction")),
            ),
        ]
    }

    fn now() -> NaiveDateTime {
        "2024-01-15T08:00:00".parse().unwrap()
    }

    fn ids(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn default_criteria_pass_everything_in_order() {
        let result = filter_events(&fixture(), &FilterCriteria::default(), now());
        assert_eq!(ids(&result), ["1", "2", "3"]);
    }

    #[test]
    fn status_filter_matches_exactly() {
        let criteria = FilterCriteria {
            status: StatusFilter::Only(AssignmentStatus::Confirmed),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_events(&fixture(), &criteria, now())), ["2"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let criteria = FilterCriteria {
            search: "SOCCER".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_events(&fixture(), &criteria, now())), ["1"]);

        let criteria = FilterCriteria {
            search: "asa".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_events(&fixture(), &criteria, now())), ["1", "3"]);
    }

    #[test]
    fn unassigned_passes_only_events_without_an_adult() {
        let criteria = FilterCriteria {
            assignee: AssigneeFilter::Unassigned,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_events(&fixture(), &criteria, now())), ["1"]);
    }

    #[test]
    fn assignee_email_matches_exactly() {
        let criteria = FilterCriteria {
            assignee: AssigneeFilter::Adult("parent1@gmail.com".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_events(&fixture(), &criteria, now())), ["2"]);
    }

    #[test]
    fn assignee_email_comparison_is_case_sensitive() {
        // Unlike roster matching, the assignee criterion is a literal
        // selection value; a cased variant matches nothing.
        let criteria = FilterCriteria {
            assignee: AssigneeFilter::Adult("PARENT1@GMAIL.COM".to_string()),
            ..FilterCriteria::default()
        };
        assert!(filter_events(&fixture(), &criteria, now()).is_empty());
    }

    #[test]
    fn date_window_criterion_delegates_to_the_calculator() {
        let mut events = fixture();
        events.push(event(
            "4",
            "Far Future Recital",
            "2024-03-20T10:00:00",
            AssignmentStatus::NeedsAssignment,
            None,
        ));
        let criteria = FilterCriteria {
            window: Some(DateFilter::Days7),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_events(&events, &criteria, now())), ["1", "2", "3"]);
    }

    #[test]
    fn criteria_compose_as_a_conjunction() {
        // Event 3 matches status, search, and window but not assignee.
        let criteria = FilterCriteria {
            status: StatusFilter::Only(AssignmentStatus::AwaitingResponse),
            search: "piano".to_string(),
            assignee: AssigneeFilter::Adult("parent1@gmail.com".to_string()),
            window: Some(DateFilter::Days7),
        };
        assert!(filter_events(&fixture(), &criteria, now()).is_empty());

        // Relaxing the one failing criterion admits it.
        let criteria = FilterCriteria {
            assignee: AssigneeFilter::Adult("parent2@gmail.com".to_string()),
            ..criteria
        };
        assert_eq!(ids(&filter_events(&fixture(), &criteria, now())), ["3"]);
    }

    #[test]
    fn selection_values_map_onto_assignee_filter() {
        assert_eq!(AssigneeFilter::from_selection("all"), AssigneeFilter::All);
        assert_eq!(
            AssigneeFilter::from_selection("unassigned"),
            AssigneeFilter::Unassigned
        );
        assert_eq!(
            AssigneeFilter::from_selection("parent1@gmail.com"),
            AssigneeFilter::Adult("parent1@gmail.com".to_string())
        );
    }

    #[test]
    fn status_filter_parses_ui_values() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "confirmed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AssignmentStatus::Confirmed)
        );
        assert!("done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn status_counts_agree_with_status_filtering() {
        let events = fixture();
        let counts = status_counts(&events);
        assert_eq!(counts.all, 3);
        for (status, expected) in [
            (AssignmentStatus::NeedsAssignment, counts.needs_assignment),
            (AssignmentStatus::AwaitingResponse, counts.awaiting_response),
            (AssignmentStatus::Confirmed, counts.confirmed),
        ] {
            let criteria = FilterCriteria {
                status: StatusFilter::Only(status),
                ..FilterCriteria::default()
            };
            assert_eq!(filter_events(&events, &criteria, now()).len(), expected);
        }
    }

    #[test]
    fn date_counts_agree_with_window_filtering() {
        let mut events = fixture();
        events.push(event(
            "4",
            "Next Month Recital",
            "2024-02-20T10:00:00",
            AssignmentStatus::NeedsAssignment,
            None,
        ));
        for (option, count) in date_counts(&events, now()) {
            let criteria = FilterCriteria {
                window: Some(option),
                ..FilterCriteria::default()
            };
            assert_eq!(filter_events(&events, &criteria, now()).len(), count);
        }
    }
}
