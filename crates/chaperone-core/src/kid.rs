//! Child attribution from event titles.

/// Return the first roster name that appears in the title, case-insensitively.
///
/// Roster order is priority order, and matching is plain substring search --
/// a name embedded in unrelated text still matches. An empty roster never
/// matches.
pub fn detect_kid(title: &str, kid_names: &[String]) -> Option<String> {
    let lower_title = title.to_lowercase();
    kid_names
        .iter()
        .find(|name| lower_title.contains(&name.to_lowercase()))
        .cloned()
}
