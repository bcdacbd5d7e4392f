use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaChevronDown, FaChevronUp, FaRightFromBracket, FaTrash,
};
use dioxus_free_icons::Icon;
use dioxus_logger::tracing;

use crate::{
    client::{
        components::dashboard::MailboxIconView,
        format::mailbox_aria_label,
        hooks::{use_auth, use_toasts},
        router::Route,
        util::AsyncAction,
    },
    model::email::{Mailbox, MailboxKind},
};

/// Splits mailboxes into the always visible main ones and those behind "More"
pub fn partition_mailboxes(mailboxes: &[Mailbox]) -> (Vec<Mailbox>, Vec<Mailbox>) {
    mailboxes.iter().cloned().partition(|m| m.is_main)
}

#[component]
pub fn MailboxList(
    mailboxes: Vec<Mailbox>,
    selected: String,
    loading: bool,
    on_select: EventHandler<String>,
    on_delete_label: AsyncAction<String>,
) -> Element {
    let mut show_more = use_signal(|| false);
    let mut pending_delete = use_signal(|| None::<Mailbox>);
    let mut deleting = use_signal(|| false);

    let (main, secondary) = partition_mailboxes(&mailboxes);

    let confirm_delete = move |_| {
        let Some(label) = pending_delete() else {
            return;
        };
        let on_delete_label = on_delete_label.clone();

        deleting.set(true);
        spawn(async move {
            if let Err(e) = on_delete_label.call(label.id.clone()).await {
                tracing::error!(label_id = %label.id, "Failed to delete label: {}", e);
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    };

    rsx!(
        nav { class: "flex flex-col h-full w-64 bg-base-200", aria_label: "Mailboxes",
            ul { class: "menu w-full flex-1 overflow-y-auto",
                if loading {
                    for i in 0..6 {
                        li { key: "{i}",
                            div { class: "skeleton h-8 w-full" }
                        }
                    }
                } else {
                    for mailbox in main.iter() {
                        MailboxEntry {
                            key: "{mailbox.id}",
                            selected: mailbox.id == selected,
                            mailbox: mailbox.clone(),
                            on_select,
                            on_delete: move |mailbox| pending_delete.set(Some(mailbox)),
                        }
                    }
                    if !secondary.is_empty() {
                        li {
                            button {
                                class: "flex gap-2 text-sm opacity-70",
                                aria_expanded: "{show_more}",
                                onclick: move |_| show_more.toggle(),
                                if show_more() {
                                    Icon { width: 12, height: 12, icon: FaChevronUp }
                                    "Show less"
                                } else {
                                    Icon { width: 12, height: 12, icon: FaChevronDown }
                                    "More"
                                }
                            }
                        }
                        if show_more() {
                            for mailbox in secondary.iter() {
                                MailboxEntry {
                                    key: "{mailbox.id}",
                                    selected: mailbox.id == selected,
                                    mailbox: mailbox.clone(),
                                    on_select,
                                    on_delete: move |mailbox| pending_delete.set(Some(mailbox)),
                                }
                            }
                        }
                    }
                }
            }
            ProfileFooter {}
        }
        if let Some(label) = pending_delete() {
            dialog { class: "modal modal-open", role: "alertdialog",
                div { class: "modal-box",
                    h3 { class: "font-bold text-lg", "Delete label" }
                    p { class: "py-4",
                        "Are you sure you want to delete the label \"{label.name}\"? Emails with this label will not be deleted."
                    }
                    div { class: "modal-action",
                        button {
                            class: "btn",
                            disabled: deleting(),
                            onclick: move |_| pending_delete.set(None),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-error",
                            disabled: deleting(),
                            onclick: confirm_delete,
                            if deleting() { "Deleting..." } else { "Delete" }
                        }
                    }
                }
            }
        }
    )
}

#[component]
fn MailboxEntry(
    mailbox: Mailbox,
    selected: bool,
    on_select: EventHandler<String>,
    on_delete: EventHandler<Mailbox>,
) -> Element {
    let aria_label = mailbox_aria_label(&mailbox);
    let deletable = mailbox.kind == MailboxKind::User;
    let id = mailbox.id.clone();
    let target = mailbox.clone();

    rsx!(
        li { class: "group",
            div { class: "flex items-center justify-between",
                class: if selected { "menu-active" },
                button {
                    class: "flex flex-1 items-center gap-2",
                    aria_label: "{aria_label}",
                    aria_current: if selected { "page" },
                    onclick: move |_| on_select.call(id.clone()),
                    MailboxIconView { icon: mailbox.icon }
                    span { class: "flex-1 text-left truncate", "{mailbox.name}" }
                    if mailbox.unread_count > 0 {
                        span { class: "badge badge-primary badge-sm", "{mailbox.unread_count}" }
                    }
                }
                if deletable {
                    button {
                        class: "btn btn-ghost btn-xs opacity-0 group-hover:opacity-100",
                        aria_label: "Delete label {mailbox.name}",
                        onclick: move |_| on_delete.call(target.clone()),
                        Icon { width: 12, height: 12, icon: FaTrash }
                    }
                }
            }
        }
    )
}

#[component]
fn ProfileFooter() -> Element {
    let auth = use_auth();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let Some(user) = auth.user() else {
        return rsx!();
    };

    let logout = move |_| {
        let auth = auth.clone();
        spawn(async move {
            auth.logout().await;
            if auth.is_authenticated() {
                toasts.error("Logout failed");
            } else {
                toasts.success("Logged out successfully");
                navigator.replace(Route::Login {});
            }
        });
    };

    rsx!(
        div { class: "flex items-center gap-2 p-3 border-t border-base-300",
            div { class: "avatar avatar-placeholder",
                div { class: "bg-primary text-primary-content w-9 rounded-full",
                    span { class: "text-sm", "{user.initials()}" }
                }
            }
            div { class: "flex-1 min-w-0",
                p { class: "text-sm font-semibold truncate", "{user.name}" }
                p { class: "text-xs opacity-70 truncate", "{user.email}" }
            }
            button {
                class: "btn btn-ghost btn-sm",
                aria_label: "Log out",
                onclick: logout,
                Icon { width: 16, height: 16, icon: FaRightFromBracket }
            }
        }
    )
}
