// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Registration page — scan or type the FAN, add a phone number, register.
//
// The FAN itself never leaves the device: the service layer hashes it and
// sends only the digest. On mobile the "Scan" button drives the native QR
// scanner through the bridge; on desktop the number is typed by hand.

use dioxus::prelude::*;

use abet_core::human_errors::humanize_error;
use abet_identity::resolve_from_scan;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Register() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut fan_input = use_signal(String::new);
    let mut phone_input = use_signal(String::new);
    let mut id_photo = use_signal(|| Option::<Vec<u8>>::None);
    let mut status_msg = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    // Already registered — show the account card instead of the form.
    if let Some(session) = state.read().session.clone() {
        let hash_preview = truncate_hash(&session.fan_hash);
        return rsx! {
            div { style: "max-width: 500px; margin: 0 auto;",
                h1 { "Account" }
                div { style: "padding: 16px; border-radius: 12px; background: #f0f7f0; margin: 16px 0;",
                    p { style: "margin: 0 0 4px 0; font-weight: bold;", "Registered" }
                    p { style: "margin: 0; color: #666; font-size: 14px; font-family: monospace;",
                        "{hash_preview}"
                    }
                }
                p { style: "color: #666; font-size: 14px;",
                    "Your account is identified only by this hash. Your FAN was never stored or sent."
                }
                button {
                    style: "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid #ff3b30; color: #ff3b30; background: white; margin-top: 16px;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            if let Err(e) = svc.clear_session() {
                                tracing::warn!(error = %e, "sign-out cleanup failed");
                            }
                            state.write().session = None;
                            state.write().complaints.clear();
                        }
                    },
                    "Sign Out"
                }
            }
        };
    }

    rsx! {
        div { style: "max-width: 500px; margin: 0 auto;",
            h1 { "Register" }
            p { style: "color: #666; margin-bottom: 24px;",
                "Scan the QR code on your ID card, or type your FAN below."
            }

            // FAN input + scan
            div { style: "margin-bottom: 16px;",
                label { style: "display: block; font-size: 16px; font-weight: bold; margin-bottom: 8px;",
                    "FAN (ID number)"
                }
                div { style: "display: flex; gap: 8px;",
                    input {
                        r#type: "text",
                        placeholder: "e.g. 123456789",
                        value: "{fan_input}",
                        style: "flex: 1; padding: 14px; font-size: 18px; border: 2px solid #ccc; border-radius: 12px; box-sizing: border-box;",
                        oninput: move |evt| fan_input.set(evt.value().to_string()),
                    }
                    button {
                        style: "padding: 14px 16px; border-radius: 12px; border: 2px dashed #007aff; color: #007aff; background: white;",
                        disabled: *busy.read(),
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                match svc.scan_qr() {
                                    Ok(Some(payload)) => {
                                        // The scanner hands back whatever the QR encodes;
                                        // pull the FAN digits out of it.
                                        if let Some(fan) = resolve_from_scan(&payload) {
                                            fan_input.set(fan);
                                            status_msg.set(Some("Code scanned.".into()));
                                        }
                                    }
                                    Ok(None) => {
                                        status_msg.set(Some("Scan cancelled.".into()));
                                    }
                                    Err(e) => {
                                        let human = humanize_error(&e);
                                        status_msg.set(Some(human.message));
                                    }
                                }
                            }
                        },
                        "Scan QR"
                    }
                }
            }

            // Phone input
            div { style: "margin-bottom: 16px;",
                label { style: "display: block; font-size: 16px; font-weight: bold; margin-bottom: 8px;",
                    "Phone Number"
                }
                input {
                    r#type: "tel",
                    placeholder: "+251911223344",
                    value: "{phone_input}",
                    style: "width: 100%; padding: 14px; font-size: 18px; border: 2px solid #ccc; border-radius: 12px; box-sizing: border-box;",
                    oninput: move |evt| phone_input.set(evt.value().to_string()),
                }
            }

            // Optional ID photo
            div { style: "margin-bottom: 24px;",
                label { style: "display: block; font-size: 16px; font-weight: bold; margin-bottom: 8px;",
                    "ID Photo (optional)"
                }
                button {
                    style: "width: 100%; padding: 16px; border-radius: 12px; border: 2px dashed #ccc; color: #666; background: white;",
                    disabled: *busy.read(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            #[cfg(not(any(target_os = "ios", target_os = "android")))]
                            {
                                let _ = &svc;
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("Images", &["jpg", "jpeg", "png"])
                                    .pick_file()
                                {
                                    match std::fs::read(&path) {
                                        Ok(bytes) => {
                                            tracing::info!(path = %path.display(), bytes = bytes.len(), "ID photo loaded");
                                            id_photo.set(Some(bytes));
                                        }
                                        Err(e) => status_msg.set(Some(format!("Could not read file: {e}"))),
                                    }
                                }
                            }
                            #[cfg(any(target_os = "ios", target_os = "android"))]
                            {
                                match svc.capture_photo() {
                                    Ok(Some(bytes)) => id_photo.set(Some(bytes)),
                                    Ok(None) => {}
                                    Err(e) => {
                                        let human = humanize_error(&e);
                                        status_msg.set(Some(human.message));
                                    }
                                }
                            }
                        }
                    },
                    if id_photo.read().is_some() { "ID photo added \u{2713}" } else { "Add ID Photo" }
                }
            }

            // Register button
            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #007aff; color: white; font-size: 18px; font-weight: bold;",
                disabled: fan_input.read().trim().is_empty() || *busy.read(),
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let fan = fan_input.read().clone();
                        let phone = phone_input.read().clone();
                        let photo = id_photo.read().clone();

                        busy.set(true);
                        status_msg.set(Some("Registering...".into()));

                        let svc = svc.clone();
                        spawn(async move {
                            match svc.register(&fan, &phone, photo).await {
                                Ok(session) => {
                                    state.write().session = Some(session);
                                    status_msg.set(None);
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "registration failed");
                                    let human = humanize_error(&e);
                                    status_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                }
                            }
                            busy.set(false);
                        });
                    }
                },
                if *busy.read() { "Registering..." } else { "Register" }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 16px; padding: 16px; border-radius: 12px; background: #f0f0f0; color: #333; font-size: 15px; text-align: center;",
                    "{msg}"
                }
            }
        }
    }
}

/// Shorten a 66-character hash for display: `0x1234…cdef`.
fn truncate_hash(hash: &str) -> String {
    if hash.len() > 14 {
        format!("{}\u{2026}{}", &hash[..10], &hash[hash.len() - 4..])
    } else {
        hash.to_owned()
    }
}
