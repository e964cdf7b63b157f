//! Assignment status derivation from raw attendee data.

use crate::event::{email_local_part, AssignedAdult, AssignmentStatus, Attendee};

/// Outcome of classifying an event against the adult roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: AssignmentStatus,
    pub assigned_adult: Option<AssignedAdult>,
}

impl Classification {
    fn unassigned() -> Self {
        Self {
            status: AssignmentStatus::NeedsAssignment,
            assigned_adult: None,
        }
    }
}

/// Derive an event's assignment status and assigned-adult record from its
/// attendee list and the adult-email roster.
///
/// Emails are compared case-insensitively; the first roster match in list
/// order wins and any later matches are ignored (the workflow assumes at most
/// one adult attendee per event). A missing or empty response state is
/// treated as `needsAction`.
pub fn classify(attendees: Option<&[Attendee]>, adult_emails: &[String]) -> Classification {
    let Some(attendees) = attendees else {
        return Classification::unassigned();
    };

    let roster: Vec<String> = adult_emails.iter().map(|e| e.to_lowercase()).collect();
    let adult = attendees.iter().find(|a| {
        a.email
            .as_deref()
            .is_some_and(|e| roster.contains(&e.to_lowercase()))
    });

    let Some(adult) = adult else {
        return Classification::unassigned();
    };

    let response = match adult.response_status.as_deref() {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => "needsAction".to_string(),
    };

    let status = match response.as_str() {
        "accepted" => AssignmentStatus::Confirmed,
        // A declined adult reads as unassigned, not as a distinct rejected
        // state; the record is cleared along with the status.
        "declined" => return Classification::unassigned(),
        _ => AssignmentStatus::AwaitingResponse,
    };

    let email = adult.email.clone().unwrap_or_default();
    Classification {
        status,
        assigned_adult: Some(AssignedAdult {
            name: email_local_part(&email).to_string(),
            email,
            response_status: response,
        }),
    }
}
