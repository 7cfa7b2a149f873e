use std::sync::Arc;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::entities::geo::LatLng;
use crate::infra::geocode::http::HttpGeocoder;
use crate::infra::map::leaflet::{bootstrap_script, LEAFLET_CSS, LEAFLET_JS, MAP_ELEMENT_ID};
use crate::platform::desktop::files::{read_upload, write_export};
use crate::platform::desktop::webview_map::WebviewMap;
use crate::ui::components::{LedgerSummary, StatusLine, StoreCard};
use crate::ui::state::app_state::AppState;
use crate::ui::state::view::ReviewView;
use crate::usecase::ports::codec::EXPORT_FILE_NAME;

const BUTTON_STYLE: &str = "padding: 0.75rem 1.5rem; color: #fff; font-weight: 700; border-radius: 0.5rem; border: none; cursor: pointer;";

#[component]
pub fn App() -> Element {
    // Resolved once in `main` and handed over as launch context.
    let config = use_context::<Arc<AppConfig>>();

    let mut state = AppState::new(&config);
    let geocoder = use_hook(|| HttpGeocoder::new(config.geocoder.clone()));

    let map_settings = config.map.clone();
    use_future(move || {
        let map_settings = map_settings.clone();
        async move {
            let mut channel = document::eval(&bootstrap_script(&map_settings));
            loop {
                match channel.recv::<LatLng>().await {
                    Ok(position) => {
                        let _ = state.session.write().drag_candidate(position);
                    }
                    Err(err) => {
                        warn!(?err, "map event channel closed");
                        break;
                    }
                }
            }
        }
    });

    let view = ReviewView::from(&*state.session.read());
    let address = state.address;
    let searching = state.searching;
    let skip_opacity = if view.skip_enabled { "1" } else { "0.5" };

    rsx! {
        document::Link { rel: "stylesheet", href: LEAFLET_CSS }
        document::Script { src: LEAFLET_JS }
        div {
            style: "min-height: 100vh; background-image: linear-gradient(to bottom right, #eff6ff, #e0e7ff); padding: 2rem; font-family: Inter, sans-serif; color: #374151; display: flex; flex-direction: column; align-items: center;",
            div {
                style: "background-color: #ffffff; padding: 2rem; border-radius: 1rem; max-width: 48rem; width: 100%; margin-bottom: 2rem; border: 1px solid #e5e7eb;",
                h1 {
                    style: "font-size: 2.25rem; font-weight: 800; text-align: center; color: #4338ca; margin-bottom: 1.5rem;",
                    "Store Location Updater"
                }
                p {
                    style: "text-align: center; color: #4b5563; margin-bottom: 2rem;",
                    "Upload your Excel file, adjust store locations, and download the updated data."
                }

                div {
                    style: "margin-bottom: 1.5rem; display: flex; justify-content: center;",
                    button {
                        style: "{BUTTON_STYLE} background-color: #4f46e5;",
                        onclick: move |_| {
                            let Some(file_path) = FileDialog::new()
                                .add_filter("Excel", &["xlsx"])
                                .pick_file() else {
                                state.session.write().report("Upload cancelled.");
                                return;
                            };

                            match read_upload(&file_path) {
                                Ok((file_name, bytes)) => {
                                    let imported = state
                                        .session
                                        .write()
                                        .import(&bytes, &file_name, &mut WebviewMap);
                                    if imported.is_ok() {
                                        state.sync_address();
                                    }
                                }
                                Err(err) => {
                                    warn!(error = %format!("{err:#}"), "failed to read upload");
                                    state.session.write().report(format!("Error reading file: {err:#}"));
                                }
                            }
                        },
                        "Upload Excel Document (.xlsx)"
                    }
                }

                StatusLine { message: view.status.clone() }

                if let Some(store) = view.current.clone() {
                    StoreCard { store }
                }

                div {
                    style: "display: flex; gap: 1rem; align-items: center; justify-content: center; margin-bottom: 1.5rem;",
                    input {
                        r#type: "text",
                        placeholder: "Enter address",
                        value: "{address}",
                        style: "padding: 0.5rem 1rem; border-radius: 9999px; border: 1px solid #d1d5db; width: 70%; font-size: 1rem;",
                        oninput: move |evt| state.address.set(evt.value()),
                    }
                    button {
                        style: "padding: 0.5rem 1rem; border-radius: 9999px; background-color: #3b82f6; color: #fff; font-weight: 600; border: none; cursor: pointer;",
                        disabled: searching(),
                        onclick: move |_| {
                            let query = state.address.read().clone();
                            let geocoder = geocoder.clone();
                            state.session.write().begin_search(&query);
                            state.searching.set(true);
                            spawn(async move {
                                let result = geocoder.geocode(&query).await;
                                let _ = state.session.write().apply_geocode(result, &mut WebviewMap);
                                state.searching.set(false);
                            });
                        },
                        "Search"
                    }
                }

                div {
                    id: MAP_ELEMENT_ID,
                    style: "width: 100%; height: 600px; min-height: 300px; border-radius: 0.75rem; border: 1px solid #e5e7eb;",
                }

                div {
                    style: "display: flex; gap: 1rem; justify-content: center; margin-top: 1.5rem; flex-wrap: wrap;",
                    if view.show_save {
                        button {
                            style: "{BUTTON_STYLE} background-color: #10b981;",
                            onclick: move |_| {
                                if state.session.write().save_and_next(&mut WebviewMap).is_ok() {
                                    state.sync_address();
                                }
                            },
                            "Save & Next Store"
                        }
                    }
                    if view.show_skip {
                        button {
                            style: "{BUTTON_STYLE} background-color: #2563eb; opacity: {skip_opacity};",
                            disabled: !view.skip_enabled,
                            onclick: move |_| {
                                if state.session.write().skip(&mut WebviewMap).is_ok() {
                                    state.sync_address();
                                }
                            },
                            "Skip & Next Store"
                        }
                    }
                    if view.show_export {
                        button {
                            style: "{BUTTON_STYLE} background-color: #7c3aed;",
                            onclick: move |_| download_export(state),
                            "Download Updated Excel"
                        }
                    }
                }

                LedgerSummary { lines: view.ledger_lines.clone() }
            }
        }
    }
}

fn download_export(state: AppState) {
    let mut session = state.session;
    let Ok(bytes) = session.write().export() else {
        return;
    };

    let Some(path) = FileDialog::new()
        .add_filter("Excel", &["xlsx"])
        .set_file_name(EXPORT_FILE_NAME)
        .save_file()
    else {
        session.write().report("Download cancelled.");
        return;
    };

    match write_export(&path, &bytes) {
        Ok(()) => {
            info!(path = %path.display(), "export written");
            session
                .write()
                .report(format!("Updated Excel file saved to {}", path.display()));
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "failed to write export");
            session
                .write()
                .report(format!("Failed to save the updated Excel file: {err:#}"));
        }
    }
}
