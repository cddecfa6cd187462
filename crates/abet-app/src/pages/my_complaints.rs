// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Complaint history page — fetch and display the citizen's filed complaints.

use dioxus::prelude::*;

use abet_core::human_errors::humanize_error;
use abet_core::types::ComplaintStatus;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn MyComplaints() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut status_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let session = state.read().session.clone();

    // Fetch once when the page mounts. Hooks run unconditionally; the
    // no-session case just skips the request.
    {
        let svc = svc.clone();
        let session = session.clone();
        use_hook(move || {
            let Some(session) = session else { return };
            loading.set(true);
            spawn(async move {
                match svc.my_complaints(&session).await {
                    Ok(complaints) => {
                        state.write().complaints = complaints;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "history fetch failed");
                        let human = humanize_error(&e);
                        status_msg.set(Some(human.message));
                    }
                }
                loading.set(false);
            });
        });
    }

    let Some(session) = session else {
        return rsx! {
            div { style: "max-width: 500px; margin: 0 auto; text-align: center; margin-top: 48px;",
                h1 { "My Complaints" }
                p { style: "color: #666;", "Register your account to see your complaint history." }
            }
        };
    };

    let complaints = state.read().complaints.clone();

    rsx! {
        div { style: "max-width: 500px; margin: 0 auto;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "My Complaints" }
                button {
                    style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                    disabled: *loading.read(),
                    onclick: {
                        let svc = svc.clone();
                        let session = session.clone();
                        move |_| {
                            let svc = svc.clone();
                            let session = session.clone();
                            loading.set(true);
                            status_msg.set(None);
                            spawn(async move {
                                match svc.my_complaints(&session).await {
                                    Ok(complaints) => {
                                        state.write().complaints = complaints;
                                    }
                                    Err(e) => {
                                        let human = humanize_error(&e);
                                        status_msg.set(Some(human.message));
                                    }
                                }
                                loading.set(false);
                            });
                        }
                    },
                    if *loading.read() { "Loading..." } else { "Refresh" }
                }
            }

            if complaints.is_empty() && !*loading.read() {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                    "No complaints filed yet."
                }
            }

            for complaint in complaints {
                {
                    let status_color = status_color(&complaint.status);
                    let chain = complaint.chain_key.as_deref().map(truncate_key);
                    let filed = complaint
                        .created_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string());
                    rsx! {
                        div { style: "border: 1px solid #e0e0e0; border-radius: 12px; padding: 16px; margin: 12px 0;",
                            div { style: "display: flex; justify-content: space-between; margin-bottom: 8px;",
                                if let Some(ref category) = complaint.category {
                                    span { style: "font-weight: bold;", "{category}" }
                                } else {
                                    span { style: "color: #888;", "Uncategorised" }
                                }
                                span { style: "padding: 2px 10px; border-radius: 10px; font-size: 12px; {status_color}",
                                    "{complaint.status.label()}"
                                }
                            }
                            p { style: "margin: 0; color: #333; font-size: 14px;", "{complaint.description}" }
                            if let Some(filed) = filed {
                                p { style: "margin: 8px 0 0 0; color: #888; font-size: 12px;", "Filed {filed}" }
                            }
                            if let Some(chain) = chain {
                                p { style: "margin: 8px 0 0 0; color: #888; font-size: 12px; font-family: monospace;",
                                    "chain: {chain}"
                                }
                            }
                        }
                    }
                }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 16px; padding: 16px; border-radius: 12px; background: #f0f0f0; color: #333; font-size: 15px; text-align: center;",
                    "{msg}"
                }
            }
        }
    }
}

/// Badge colours per status.
fn status_color(status: &ComplaintStatus) -> &'static str {
    match status {
        ComplaintStatus::Submitted => "background: #e8f2ff; color: #007aff;",
        ComplaintStatus::InReview => "background: #fff4e5; color: #b26a00;",
        ComplaintStatus::Resolved => "background: #e8f7e8; color: #1a7f37;",
        ComplaintStatus::Rejected => "background: #ffebe9; color: #cf222e;",
        ComplaintStatus::Unknown => "background: #f0f0f0; color: #666;",
    }
}

/// Shorten a ledger chain key for display.
///
/// Counts characters, not bytes — the key comes from the backend and is not
/// guaranteed to be ASCII.
fn truncate_key(key: &str) -> String {
    if key.chars().count() > 18 {
        let head: String = key.chars().take(16).collect();
        format!("{head}\u{2026}")
    } else {
        key.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_key_is_unchanged() {
        assert_eq!(truncate_key("0xabc123"), "0xabc123");
    }

    #[test]
    fn long_key_keeps_sixteen_chars() {
        let key = "0x0123456789abcdef0123456789abcdef";
        assert_eq!(truncate_key(key), "0x0123456789abcd\u{2026}");
    }

    #[test]
    fn multibyte_key_truncates_on_char_boundaries() {
        // 21 bytes but only 7 chars — stays intact.
        assert_eq!(truncate_key("€€€€€€€"), "€€€€€€€");
        // Long multi-byte key truncates without slicing mid-character.
        let key = "€".repeat(24);
        assert_eq!(truncate_key(&key), format!("{}\u{2026}", "€".repeat(16)));
    }
}
