use dioxus::document::Title;
use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    client::{
        components::dashboard::{EmailSummaryModal, KanbanBoard, MailboxList},
        error::ClientError,
        hooks::{
            keyboard::ESCAPE, use_auth, use_keyboard_shortcuts, use_toasts, AuthContext, Shortcut,
            Toasts,
        },
        service::EmailService,
        util::AsyncAction,
    },
    model::email::INBOX_MAILBOX_ID,
};

/// Logs a failed load, signs out on a rejected token and tells the user
fn report(auth: &AuthContext, toasts: Toasts, action: &str, error: &ClientError) {
    tracing::error!("Failed to {}: {}", action, error);
    auth.handle_error(error);
    toasts.error(error.user_message());
}

/// Mailbox sidebar, kanban board and summary modal of the signed in user
#[component]
pub fn Inbox() -> Element {
    let auth = use_auth();
    let toasts = use_toasts();
    let service = use_context::<EmailService>();

    let mut selected_mailbox = use_signal(|| INBOX_MAILBOX_ID.to_string());
    let mut selected_email = use_signal(|| None::<String>);
    let mut summary_for = use_signal(|| None::<String>);
    let mut reload = use_signal(|| 0u32);

    let mailboxes = use_resource({
        let auth = auth.clone();
        let service = service.clone();
        move || {
            let auth = auth.clone();
            let service = service.clone();
            let _ = reload();
            async move {
                let result = service.list_mailboxes().await;
                if let Err(e) = &result {
                    report(&auth, toasts, "load mailboxes", e);
                }
                result
            }
        }
    });

    let emails = use_resource({
        let auth = auth.clone();
        let service = service.clone();
        move || {
            let auth = auth.clone();
            let service = service.clone();
            let _ = reload();
            let mailbox_id = selected_mailbox();
            async move {
                let result = service.list_emails(&mailbox_id).await;
                if let Err(e) = &result {
                    report(&auth, toasts, "load emails", e);
                }
                result
            }
        }
    });

    let on_email_move = use_hook({
        let service = service.clone();
        move || {
            AsyncAction::new(move |(email_id, target): (String, String)| {
                let service = service.clone();
                async move { service.move_email(&email_id, &target).await }
            })
        }
    });

    let on_create_label = use_hook({
        let service = service.clone();
        move || {
            AsyncAction::new(move |name: String| {
                let service = service.clone();
                async move {
                    let label = service.create_label(&name).await?;
                    tracing::info!(label_id = %label.id, "Created label {}", label.name);
                    Ok(())
                }
            })
        }
    });

    let on_delete_label = use_hook({
        let service = service.clone();
        move || {
            AsyncAction::new(move |label_id: String| {
                let service = service.clone();
                async move {
                    service.delete_label(&label_id).await?;
                    let mut selected_mailbox = selected_mailbox;
                    if *selected_mailbox.peek() == label_id {
                        selected_mailbox.set(INBOX_MAILBOX_ID.to_string());
                    }
                    let mut reload = reload;
                    reload += 1;
                    Ok(())
                }
            })
        }
    });

    use_keyboard_shortcuts(
        vec![
            Shortcut::new("r", "Refresh mailboxes and emails", move || {
                let mut reload = reload;
                reload += 1;
            })
            .ctrl(false)
            .meta(false),
            Shortcut::new("s", "Summarize the selected email", move || {
                if let Some(id) = (*selected_email.peek()).clone() {
                    let mut summary_for = summary_for;
                    summary_for.set(Some(id));
                }
            })
            .ctrl(false)
            .meta(false),
            Shortcut::new(ESCAPE, "Close the summary or clear the selection", move || {
                let mut summary_for = summary_for;
                let mut selected_email = selected_email;
                if summary_for.peek().is_some() {
                    summary_for.set(None);
                } else {
                    selected_email.set(None);
                }
            }),
        ],
        true,
    );

    let mailbox_list = (*mailboxes.read()).clone();
    let email_list = (*emails.read()).clone();

    let mailboxes_loading = mailbox_list.is_none();
    let emails_loading = email_list.is_none();
    let mailbox_list = mailbox_list.and_then(Result::ok).unwrap_or_default();
    let email_list = email_list.and_then(Result::ok).unwrap_or_default();

    let summary_subject = summary_for().and_then(|id| {
        email_list
            .iter()
            .find(|email| email.id == id)
            .map(|email| email.subject.clone())
    });

    rsx!(
        Title { "Inbox | AIEmail" }
        div { class: "flex h-screen",
            MailboxList {
                mailboxes: mailbox_list.clone(),
                selected: selected_mailbox(),
                loading: mailboxes_loading,
                on_select: move |id| {
                    selected_mailbox.set(id);
                    selected_email.set(None);
                },
                on_delete_label,
            }
            main { class: "flex-1 min-w-0 overflow-hidden",
                KanbanBoard {
                    mailboxes: mailbox_list,
                    emails: email_list,
                    selected_email: selected_email(),
                    loading: mailboxes_loading || emails_loading,
                    on_email_move,
                    on_create_label,
                    on_refresh: move |_| reload += 1,
                    on_open: move |id: String| {
                        selected_email.set(Some(id.clone()));
                        summary_for.set(Some(id));
                    },
                }
            }
        }
        if let Some(message_id) = summary_for() {
            EmailSummaryModal {
                key: "{message_id}",
                message_id: message_id.clone(),
                email_subject: summary_subject,
                on_close: move |_| summary_for.set(None),
            }
        }
    )
}
