//! Kanban board model.
//!
//! Columns are the main mailboxes plus custom labels. Each email sits in exactly one column:
//! the mailbox it is explicitly assigned to, or the inbox when it has no assignment.

use std::future::Future;

use dioxus_logger::tracing;

use crate::{
    client::error::ClientError,
    model::email::{Email, Mailbox, MailboxKind, INBOX_MAILBOX_ID},
};

/// Mailboxes shown as board columns, in the order received
pub fn board_columns(mailboxes: &[Mailbox]) -> Vec<Mailbox> {
    mailboxes
        .iter()
        .filter(|m| m.is_main || m.kind == MailboxKind::Custom)
        .cloned()
        .collect()
}

/// Emails belonging to one column
pub fn emails_for_column(emails: &[Email], column_id: &str) -> Vec<Email> {
    emails
        .iter()
        .filter(|email| match &email.mailbox_id {
            Some(mailbox_id) => mailbox_id == column_id,
            None => column_id == INBOX_MAILBOX_ID,
        })
        .cloned()
        .collect()
}

/// Trimmed label name, `None` when nothing is left
pub fn normalize_label_name(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was being dragged
    Ignored,
    Moved { email_id: String, target: String },
    Failed,
}

/// Moves the dragged email onto `target` and refreshes the board
///
/// The move is attempted once; a failure is logged and the board is left as is. Callers
/// clear their drag state whatever the outcome.
pub async fn drop_email<M, F>(
    dragged: Option<String>,
    target: &str,
    move_email: M,
    refresh: impl FnOnce(),
) -> DropOutcome
where
    M: FnOnce(String, String) -> F,
    F: Future<Output = Result<(), ClientError>>,
{
    let Some(email_id) = dragged else {
        return DropOutcome::Ignored;
    };

    match move_email(email_id.clone(), target.to_string()).await {
        Ok(()) => {
            refresh();
            DropOutcome::Moved {
                email_id,
                target: target.to_string(),
            }
        }
        Err(e) => {
            tracing::error!(email_id = %email_id, target = %target, "Failed to move email: {}", e);
            DropOutcome::Failed
        }
    }
}
