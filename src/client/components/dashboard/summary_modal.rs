use std::future::Future;

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaWandMagicSparkles, FaXmark};
use dioxus_free_icons::Icon;
use dioxus_logger::tracing;

use crate::{
    client::{error::ClientError, hooks::use_toasts, service::EmailService},
    model::email::EmailSummary,
};

/// What the modal body shows while it is mounted
#[derive(Clone, Debug, PartialEq)]
pub enum SummaryState {
    Loading,
    Loaded(EmailSummary),
    Failed,
}

/// Runs one summary request and reports a failure through `on_error`
///
/// "Try Again" restarts the resource, which calls this again from scratch.
pub async fn load_summary<F>(
    message_id: &str,
    request: F,
    on_error: impl FnOnce(),
) -> SummaryState
where
    F: Future<Output = Result<EmailSummary, ClientError>>,
{
    match request.await {
        Ok(summary) => SummaryState::Loaded(summary),
        Err(e) => {
            tracing::error!(message_id = %message_id, "Failed to summarize email: {}", e);
            on_error();
            SummaryState::Failed
        }
    }
}

/// AI summary of a single email
///
/// The parent mounts the modal while it is open, so closing it drops any loaded summary.
#[component]
pub fn EmailSummaryModal(
    message_id: String,
    email_subject: Option<String>,
    on_close: EventHandler<()>,
) -> Element {
    let service = use_context::<EmailService>();
    let toasts = use_toasts();

    let mut summary = use_resource(move || {
        let service = service.clone();
        let message_id = message_id.clone();

        async move {
            load_summary(&message_id, service.summarize_email(&message_id), || {
                toasts.error("Failed to generate summary")
            })
            .await
        }
    });

    let state = (*summary.read()).clone().unwrap_or(SummaryState::Loading);

    let title = email_subject.unwrap_or_else(|| "Email Summary".to_string());

    rsx!(
        dialog { class: "modal modal-open", aria_label: "Email summary",
            div { class: "modal-box max-w-2xl",
                div { class: "flex items-center gap-2 mb-4",
                    Icon { width: 18, height: 18, icon: FaWandMagicSparkles }
                    h3 { class: "flex-1 font-bold text-lg truncate", "{title}" }
                    button {
                        class: "btn btn-ghost btn-sm btn-circle",
                        aria_label: "Close summary",
                        onclick: move |_| on_close.call(()),
                        Icon { width: 14, height: 14, icon: FaXmark }
                    }
                }
                {match state {
                    SummaryState::Loading => rsx!(
                        div { class: "flex flex-col items-center gap-2 py-10",
                            span { class: "loading loading-spinner loading-lg" }
                            p { class: "text-sm opacity-70", "Generating summary..." }
                        }
                    ),
                    SummaryState::Loaded(loaded) => rsx!(SummaryContent { summary: loaded }),
                    SummaryState::Failed => rsx!(
                        div { class: "flex flex-col items-center gap-4 py-10",
                            p { class: "text-error", "Failed to generate summary. Please try again." }
                            button {
                                class: "btn btn-primary btn-sm",
                                onclick: move |_| summary.restart(),
                                "Try Again"
                            }
                        }
                    ),
                }}
            }
            div { class: "modal-backdrop", onclick: move |_| on_close.call(()) }
        }
    )
}

#[component]
fn SummaryContent(summary: EmailSummary) -> Element {
    rsx!(
        div { class: "flex flex-col gap-4",
            section {
                h4 { class: "font-semibold text-sm opacity-70", "Quick Summary" }
                p { class: "text-base", "{summary.one_line_subject}" }
            }
            if !summary.bullets.is_empty() {
                section {
                    h4 { class: "font-semibold text-sm opacity-70", "Key Points" }
                    ol { class: "list-decimal pl-6",
                        for (i, bullet) in summary.bullets.iter().enumerate() {
                            li { key: "{i}", "{bullet}" }
                        }
                    }
                }
            }
            section {
                h4 { class: "font-semibold text-sm opacity-70", "Full Summary" }
                p { class: "whitespace-pre-line", "{summary.summary}" }
            }
            dl { class: "grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 text-sm",
                dt { class: "opacity-70", "From" }
                dd { "{summary.from}" }
                dt { class: "opacity-70", "To" }
                dd { "{summary.to}" }
                dt { class: "opacity-70", "Date" }
                dd { "{summary.date}" }
            }
        }
    )
}
