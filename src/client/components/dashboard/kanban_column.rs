use dioxus::prelude::*;

use crate::{
    client::components::dashboard::{KanbanCard, MailboxIconView},
    model::email::{Email, Mailbox},
};

#[component]
pub fn KanbanColumn(
    mailbox: Mailbox,
    emails: Vec<Email>,
    dragged: Option<String>,
    selected_email: Option<String>,
    on_drag_start: EventHandler<String>,
    on_drag_end: EventHandler<()>,
    on_drop: EventHandler<String>,
    on_open: EventHandler<String>,
) -> Element {
    let mut drag_over = use_signal(|| false);
    let target = mailbox.id.clone();
    let count = emails.len();

    rsx!(
        section {
            class: "flex flex-col w-72 shrink-0 rounded-box bg-base-200",
            class: if drag_over() { "ring-2 ring-primary" },
            aria_label: "{mailbox.name} column",
            ondragover: move |evt| {
                evt.prevent_default();
                drag_over.set(true);
            },
            ondragleave: move |_| drag_over.set(false),
            ondrop: move |evt| {
                evt.prevent_default();
                drag_over.set(false);
                on_drop.call(target.clone());
            },
            header { class: "flex items-center gap-2 p-3",
                MailboxIconView { icon: mailbox.icon }
                h3 { class: "flex-1 font-semibold truncate", "{mailbox.name}" }
                span { class: "badge badge-sm", "{count}" }
            }
            div { class: "flex flex-col gap-2 p-2 overflow-y-auto min-h-24",
                if emails.is_empty() {
                    p { class: "text-sm text-center opacity-50 py-6", "No emails" }
                }
                for email in emails.iter() {
                    KanbanCard {
                        key: "{email.id}",
                        dragging: dragged.as_deref() == Some(email.id.as_str()),
                        selected: selected_email.as_deref() == Some(email.id.as_str()),
                        email: email.clone(),
                        on_drag_start,
                        on_drag_end,
                        on_open,
                    }
                }
            }
        }
    )
}
