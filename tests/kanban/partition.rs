//! Tests for placing emails into board columns.

use aiemail::{
    client::kanban::{board_columns, emails_for_column},
    model::email::{Email, Mailbox, INBOX_MAILBOX_ID},
};
use serde_json::json;

fn mailboxes() -> Vec<Mailbox> {
    serde_json::from_value(json!([
        { "id": "INBOX", "name": "Inbox", "icon": "Inbox", "isMain": true, "type": "system", "unreadCount": 3 },
        { "id": "SPAM", "name": "Spam", "icon": "Bell", "isMain": false, "type": "system" },
        { "id": "Label_1", "name": "To Do", "icon": "Tag", "isMain": false, "type": "custom" },
        { "id": "Label_2", "name": "Done", "icon": "NoSuchIcon", "isMain": false, "type": "custom" }
    ]))
    .unwrap()
}

fn emails() -> Vec<Email> {
    let email = |id: &str, mailbox_id: Option<&str>| {
        json!({
            "id": id,
            "from": { "name": "Sender", "email": "sender@example.com" },
            "subject": format!("Subject {}", id),
            "preview": "",
            "timestamp": "2024-01-15T10:00:00Z",
            "isRead": false,
            "isStarred": false,
            "hasAttachments": false,
            "mailboxId": mailbox_id,
        })
    };

    serde_json::from_value(json!([
        email("m1", None),
        email("m2", Some("Label_1")),
        email("m3", Some("Label_2")),
        email("m4", Some("INBOX")),
    ]))
    .unwrap()
}

/// Tests that every email lands in exactly one column.
///
/// Expected: unassigned and INBOX-assigned emails in the inbox, labelled ones in their label
#[test]
fn each_email_lands_in_one_column() {
    let columns = board_columns(&mailboxes());
    let emails = emails();

    let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![INBOX_MAILBOX_ID, "Label_1", "Label_2"]);

    let placed: Vec<Vec<String>> = columns
        .iter()
        .map(|column| {
            emails_for_column(&emails, &column.id)
                .into_iter()
                .map(|email| email.id)
                .collect()
        })
        .collect();

    assert_eq!(placed[0], vec!["m1", "m4"]);
    assert_eq!(placed[1], vec!["m2"]);
    assert_eq!(placed[2], vec!["m3"]);
    assert_eq!(placed.iter().map(Vec::len).sum::<usize>(), emails.len());
}
