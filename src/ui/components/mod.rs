use dioxus::prelude::*;

use crate::ui::state::view::CurrentStoreView;

#[component]
pub fn StatusLine(message: String) -> Element {
    if message.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            style: "background-color: #dbeafe; border: 1px solid #bfdbfe; color: #1e40af; padding: 0.75rem 1rem; border-radius: 0.5rem; margin-bottom: 1.5rem; text-align: center; font-size: 0.875rem;",
            "{message}"
        }
    }
}

#[component]
pub fn StoreCard(store: CurrentStoreView) -> Element {
    rsx! {
        div {
            style: "background-color: #eef2ff; padding: 1.5rem; border-radius: 0.75rem; margin-bottom: 1.5rem; border: 1px solid #c7d2fe;",
            h2 {
                style: "font-size: 1.5rem; font-weight: 700; color: #312e81; margin-bottom: 0.75rem;",
                "Current Store: {store.name}"
            }
            p { style: "color: #6b7280;", "Store {store.progress}" }
            p {
                "Province: "
                span { style: "font-weight: 600;", "{store.province}" }
            }
            p {
                "Original Coordinates: "
                span { style: "font-weight: 600;", "{store.original}" }
            }
            if let Some(candidate) = store.candidate.clone() {
                p {
                    "Current Green Marker Coordinates: "
                    span { style: "font-weight: 600;", "{candidate}" }
                }
            }
        }
    }
}

#[component]
pub fn LedgerSummary(lines: Vec<String>) -> Element {
    if lines.is_empty() {
        return rsx! {};
    }
    let count = lines.len();

    rsx! {
        div {
            style: "margin-top: 2rem; padding: 1.5rem; background-color: #f9fafb; border-radius: 0.75rem; border: 1px solid #e5e7eb;",
            h3 {
                style: "font-size: 1.25rem; font-weight: 700; margin-bottom: 1rem;",
                "Updated Stores Summary ({count})"
            }
            div {
                style: "max-height: 15rem; overflow-y: auto;",
                ul {
                    style: "list-style: disc; padding-left: 1.25rem;",
                    for (idx, line) in lines.iter().enumerate() {
                        li { key: "{idx}", style: "font-size: 0.875rem; margin-bottom: 0.25rem;", "{line}" }
                    }
                }
            }
        }
    }
}
