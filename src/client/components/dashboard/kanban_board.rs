use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaPlus;
use dioxus_free_icons::Icon;
use dioxus_logger::tracing;

use crate::{
    client::{
        components::dashboard::KanbanColumn,
        kanban::{board_columns, drop_email, emails_for_column, normalize_label_name},
        util::AsyncAction,
    },
    model::email::{Email, Mailbox},
};

#[component]
pub fn KanbanBoard(
    mailboxes: Vec<Mailbox>,
    emails: Vec<Email>,
    selected_email: Option<String>,
    loading: bool,
    on_email_move: AsyncAction<(String, String)>,
    on_create_label: AsyncAction<String>,
    on_refresh: EventHandler<()>,
    on_open: EventHandler<String>,
) -> Element {
    let mut dragged = use_signal(|| None::<String>);
    let mut show_create = use_signal(|| false);

    let columns = board_columns(&mailboxes);

    let handle_drop = move |target: String| {
        let dragging = dragged();
        let on_email_move = on_email_move.clone();

        spawn(async move {
            drop_email(
                dragging,
                &target,
                |email_id, target| on_email_move.call((email_id, target)),
                || on_refresh.call(()),
            )
            .await;
            dragged.set(None);
        });
    };

    if loading {
        return rsx!(
            div { class: "flex gap-4 p-4",
                for i in 0..3 {
                    div { key: "{i}", class: "skeleton w-72 h-96" }
                }
            }
        );
    }

    rsx!(
        div { class: "flex flex-col h-full",
            div { class: "flex items-center justify-between px-4 pt-4",
                h2 { class: "text-xl font-bold", "Board" }
                button {
                    class: "btn btn-sm btn-outline flex gap-2",
                    onclick: move |_| show_create.set(true),
                    Icon { width: 12, height: 12, icon: FaPlus }
                    "New column"
                }
            }
            div { class: "flex gap-4 p-4 overflow-x-auto flex-1",
                for column in columns.iter() {
                    KanbanColumn {
                        key: "{column.id}",
                        mailbox: column.clone(),
                        emails: emails_for_column(&emails, &column.id),
                        dragged: dragged(),
                        selected_email: selected_email.clone(),
                        on_drag_start: move |id| dragged.set(Some(id)),
                        on_drag_end: move |_| dragged.set(None),
                        on_drop: handle_drop.clone(),
                        on_open,
                    }
                }
            }
        }
        if show_create() {
            CreateLabelDialog {
                on_create_label: on_create_label.clone(),
                on_close: move |_| show_create.set(false),
                on_created: move |_| on_refresh.call(()),
            }
        }
    )
}

#[component]
fn CreateLabelDialog(
    on_create_label: AsyncAction<String>,
    on_close: EventHandler<()>,
    on_created: EventHandler<()>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut creating = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();

        let Some(label) = normalize_label_name(&name.read()) else {
            return;
        };
        let on_create_label = on_create_label.clone();

        creating.set(true);
        spawn(async move {
            let result = on_create_label.call(label.clone()).await;
            creating.set(false);

            match result {
                Ok(()) => {
                    name.set(String::new());
                    on_close.call(());
                    on_created.call(());
                }
                Err(e) => tracing::error!(label = %label, "Failed to create label: {}", e),
            }
        });
    };

    let blank = normalize_label_name(&name.read()).is_none();

    rsx!(
        dialog { class: "modal modal-open",
            form { class: "modal-box flex flex-col gap-4", onsubmit: submit,
                h3 { class: "font-bold text-lg", "Create new column" }
                input {
                    class: "input input-bordered w-full",
                    placeholder: "Label name",
                    aria_label: "Label name",
                    autofocus: true,
                    disabled: creating(),
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                div { class: "modal-action",
                    button {
                        class: "btn",
                        r#type: "button",
                        disabled: creating(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: creating() || blank,
                        if creating() { "Creating..." } else { "Create" }
                    }
                }
            }
        }
    )
}
