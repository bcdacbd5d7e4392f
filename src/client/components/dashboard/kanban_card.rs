use chrono::Local;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPaperclip, FaStar};
use dioxus_free_icons::Icon;

use crate::{
    client::format::{card_date, initials},
    model::email::Email,
};

#[component]
pub fn KanbanCard(
    email: Email,
    dragging: bool,
    selected: bool,
    on_drag_start: EventHandler<String>,
    on_drag_end: EventHandler<()>,
    on_open: EventHandler<String>,
) -> Element {
    let date = card_date(&email.timestamp, Local::now());
    let sender = email.from.display().to_string();
    let sender_initials = initials(&sender);
    let attachments = email.attachment_count();
    let drag_id = email.id.clone();
    let open_id = email.id.clone();

    rsx!(
        article {
            class: "card card-sm bg-base-100 shadow-sm cursor-grab",
            class: if dragging { "opacity-50" },
            class: if selected { "ring-2 ring-primary" },
            class: if !email.is_read { "border-l-4 border-primary" },
            draggable: "true",
            aria_label: "Email from {sender}: {email.subject}",
            ondragstart: move |_| on_drag_start.call(drag_id.clone()),
            ondragend: move |_| on_drag_end.call(()),
            onclick: move |_| on_open.call(open_id.clone()),
            div { class: "card-body gap-1",
                div { class: "flex items-center gap-2",
                    div { class: "avatar avatar-placeholder",
                        div { class: "bg-neutral text-neutral-content w-7 rounded-full",
                            span { class: "text-xs", "{sender_initials}" }
                        }
                    }
                    p {
                        class: "flex-1 truncate text-sm",
                        class: if !email.is_read { "font-semibold" },
                        "{sender}"
                    }
                    if email.is_starred {
                        span { class: "text-warning", aria_label: "Starred",
                            Icon { width: 12, height: 12, icon: FaStar }
                        }
                    }
                    time { class: "text-xs opacity-60", datetime: "{email.timestamp}", "{date}" }
                }
                h4 {
                    class: "text-sm truncate",
                    class: if !email.is_read { "font-semibold" },
                    "{email.subject}"
                }
                p { class: "text-xs opacity-70 line-clamp-2", "{email.preview}" }
                div { class: "flex gap-1",
                    if email.has_attachments {
                        span { class: "badge badge-ghost badge-sm gap-1",
                            Icon { width: 10, height: 10, icon: FaPaperclip }
                            "{attachments}"
                        }
                    }
                    if !email.is_read {
                        span { class: "badge badge-primary badge-sm", "Unread" }
                    }
                }
            }
        }
    )
}
