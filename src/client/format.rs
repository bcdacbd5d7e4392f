use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::model::email::Mailbox;

/// Relative date shown on email cards
///
/// Same day shows the time, then `Yesterday`, `n days ago` for the rest of the week and the
/// month and day beyond that. Times are shown in the time zone of `now`. Unparseable
/// timestamps are shown as received.
pub fn card_date<Tz>(timestamp: &str, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(date) => date.with_timezone(&now.timezone()),
        Err(_) => return timestamp.to_string(),
    };

    let days = now.signed_duration_since(&date).num_milliseconds().div_euclid(86_400_000);

    match days {
        0 => date.format("%-I:%M %p").to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => date.format("%b %-d").to_string(),
    }
}

/// Up to two uppercase initials, `?` for an empty name
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

/// Accessible label of a mailbox entry
pub fn mailbox_aria_label(mailbox: &Mailbox) -> String {
    if mailbox.unread_count > 0 {
        format!("{} mailbox, {} unread", mailbox.name, mailbox.unread_count)
    } else {
        format!("{} mailbox", mailbox.name)
    }
}
