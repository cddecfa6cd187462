// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — persistent app configuration.

use dioxus::prelude::*;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    rsx! {
        div { style: "max-width: 500px; margin: 0 auto;",
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Backend" }
                // API base URL
                div { style: "padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    label { style: "display: block; margin-bottom: 8px;", "API base URL" }
                    input {
                        r#type: "text",
                        style: "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 4px; box-sizing: border-box; font-family: monospace;",
                        value: "{state.read().config.api_base_url}",
                        onchange: move |evt| {
                            let url = evt.value().trim().to_string();
                            if !url.is_empty() {
                                state.write().config.api_base_url = url;
                            }
                        },
                    }
                }
                // Request timeout
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Request timeout (seconds)" }
                    input {
                        r#type: "number",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{state.read().config.request_timeout_secs}",
                        onchange: move |evt| {
                            if let Ok(secs) = evt.value().parse::<u64>()
                                && secs > 0
                            {
                                state.write().config.request_timeout_secs = secs;
                            }
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Photos & Location" }
                // JPEG quality
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Upload JPEG quality (1\u{2013}100)" }
                    input {
                        r#type: "number",
                        min: "1",
                        max: "100",
                        style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;",
                        value: "{state.read().config.jpeg_quality}",
                        onchange: move |evt| {
                            if let Ok(q) = evt.value().parse::<u8>()
                                && (1..=100).contains(&q)
                            {
                                state.write().config.jpeg_quality = q;
                            }
                        },
                    }
                }
                SettingRow {
                    label: "High-accuracy GPS",
                    checked: state.read().config.high_accuracy_location,
                    on_toggle: move |v: bool| { state.write().config.high_accuracy_location = v; },
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Abet v0.2.0"
                    br {}
                    "Anonymous Citizen Complaint Reporter"
                    br {}
                    "Platform bridge: {svc.platform_name()}"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| {
                    on_toggle.call(evt.checked());
                },
            }
        }
    }
}
