// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// New complaint page — pick tags, describe the problem, attach photos and a
// location, submit.
//
// On desktop the photo buttons open a file dialog; on mobile they drive the
// native camera/gallery bridge. Location always goes through the bridge,
// which on desktop reports that no positioning hardware is available.

use dioxus::prelude::*;

use abet_core::human_errors::humanize_error;
use abet_core::types::{ComplaintTag, GeoPoint};

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn NewComplaint() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut selected_tags = use_signal(Vec::<ComplaintTag>::new);
    let mut description = use_signal(String::new);
    let mut photos = use_signal(Vec::<Vec<u8>>::new);
    let mut location = use_signal(|| Option::<GeoPoint>::None);
    let mut status_msg = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let session = state.read().session.clone();
    let Some(session) = session else {
        return rsx! {
            div { style: "max-width: 500px; margin: 0 auto; text-align: center; margin-top: 48px;",
                h1 { "Report a Problem" }
                p { style: "color: #666;", "Register your account first, then come back here to file a complaint." }
            }
        };
    };

    rsx! {
        div { style: "max-width: 500px; margin: 0 auto;",
            h1 { "Report a Problem" }

            // Tag selection
            div { style: "margin-bottom: 16px;",
                label { style: "display: block; font-size: 16px; font-weight: bold; margin-bottom: 8px;",
                    "What kind of problem?"
                }
                div { style: "display: flex; flex-wrap: wrap; gap: 8px;",
                    for tag in ComplaintTag::ALL {
                        {
                            let active = selected_tags.read().contains(&tag);
                            let style = if active {
                                "padding: 10px 14px; border-radius: 20px; border: 2px solid #007aff; background: #e8f2ff; color: #007aff; font-size: 14px;"
                            } else {
                                "padding: 10px 14px; border-radius: 20px; border: 2px solid #ccc; background: white; color: #333; font-size: 14px;"
                            };
                            rsx! {
                                button {
                                    style: "{style}",
                                    onclick: move |_| {
                                        let mut tags = selected_tags.write();
                                        if let Some(pos) = tags.iter().position(|t| *t == tag) {
                                            tags.remove(pos);
                                        } else {
                                            tags.push(tag);
                                        }
                                    },
                                    "{tag.label()}"
                                }
                            }
                        }
                    }
                }
            }

            // Description
            div { style: "margin-bottom: 16px;",
                label { style: "display: block; font-size: 16px; font-weight: bold; margin-bottom: 8px;",
                    "Describe the problem"
                }
                textarea {
                    placeholder: "The traffic light at the Bole roundabout has been dark for three days...",
                    value: "{description}",
                    rows: "4",
                    style: "width: 100%; padding: 14px; font-size: 16px; border: 2px solid #ccc; border-radius: 12px; box-sizing: border-box; font-family: inherit;",
                    oninput: move |evt| description.set(evt.value().to_string()),
                }
            }

            // Photos
            div { style: "margin-bottom: 16px;",
                label { style: "display: block; font-size: 16px; font-weight: bold; margin-bottom: 8px;",
                    "Photos"
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        disabled: *busy.read(),
                        onclick: {
                            let svc = svc.clone();
                            move |_| add_photo(&svc, PhotoSource::Camera, photos, status_msg)
                        },
                        "\u{1F4F7} Take Photo"
                    }
                    button {
                        style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        disabled: *busy.read(),
                        onclick: {
                            let svc = svc.clone();
                            move |_| add_photo(&svc, PhotoSource::Gallery, photos, status_msg)
                        },
                        "\u{1F5BC} Attach"
                    }
                }
                if !photos.read().is_empty() {
                    div { style: "display: flex; gap: 8px; overflow-x: auto; padding: 8px 0;",
                        for (i, photo) in photos.read().iter().enumerate() {
                            {
                                let size_kb = photo.len() / 1024;
                                rsx! {
                                    div { style: "min-width: 80px; height: 80px; border: 1px solid #ccc; border-radius: 4px; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #f0f0f0; font-size: 12px;",
                                        span { "\u{1F4F7} {i + 1}" }
                                        span { style: "color: #888;", "{size_kb}KB" }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // Location
            div { style: "margin-bottom: 24px;",
                button {
                    style: "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                    disabled: *busy.read(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            match svc.current_position() {
                                Ok(pos) => {
                                    tracing::info!(lat = pos.lat, lng = pos.lng, "location captured");
                                    location.set(Some(pos));
                                }
                                Err(e) => {
                                    let human = humanize_error(&e);
                                    status_msg.set(Some(human.message));
                                }
                            }
                        }
                    },
                    {
                        match *location.read() {
                            Some(ref pos) => format!("\u{1F4CD} {:.5}, {:.5}", pos.lat, pos.lng),
                            None => "\u{1F4CD} Attach My Location".to_string(),
                        }
                    }
                }
            }

            // Submit
            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #007aff; color: white; font-size: 18px; font-weight: bold;",
                disabled: description.read().trim().is_empty() || *busy.read(),
                onclick: {
                    let svc = svc.clone();
                    let session = session.clone();
                    move |_| {
                        let desc = description.read().clone();
                        let tags = selected_tags.read().clone();
                        let loc = *location.read();
                        let pics = photos.read().clone();
                        let session = session.clone();

                        busy.set(true);
                        status_msg.set(Some("Submitting...".into()));

                        let svc = svc.clone();
                        spawn(async move {
                            match svc.submit_complaint(&session, &desc, tags, loc, pics).await {
                                Ok(id) => {
                                    status_msg.set(Some(format!("Complaint filed. Reference: {id}")));
                                    // Reset the form for the next report
                                    description.set(String::new());
                                    selected_tags.set(Vec::new());
                                    photos.set(Vec::new());
                                    location.set(None);
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "complaint submission failed");
                                    let human = humanize_error(&e);
                                    status_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                }
                            }
                            busy.set(false);
                        });
                    }
                },
                if *busy.read() { "Submitting..." } else { "Submit Complaint" }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 16px; padding: 16px; border-radius: 12px; background: #f0f0f0; color: #333; font-size: 15px; text-align: center;",
                    "{msg}"
                }
            }
        }
    }
}

/// Where a photo comes from.
#[derive(Clone, Copy, PartialEq)]
enum PhotoSource {
    Camera,
    Gallery,
}

/// Acquire a photo from the given source and append it to `photos`.
///
/// Desktop has no camera bridge, so both sources open a file dialog there.
fn add_photo(
    svc: &AppServices,
    source: PhotoSource,
    mut photos: Signal<Vec<Vec<u8>>>,
    mut status_msg: Signal<Option<String>>,
) {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        let _ = (svc, source);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png"])
            .pick_file()
        {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    tracing::info!(path = %path.display(), bytes = bytes.len(), "photo loaded");
                    photos.write().push(bytes);
                }
                Err(e) => status_msg.set(Some(format!("Could not read file: {e}"))),
            }
        }
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        let result = match source {
            PhotoSource::Camera => svc.capture_photo(),
            PhotoSource::Gallery => svc.pick_photo(),
        };
        match result {
            Ok(Some(bytes)) => photos.write().push(bytes),
            Ok(None) => {}
            Err(e) => {
                let human = humanize_error(&e);
                status_msg.set(Some(human.message));
            }
        }
    }
}
