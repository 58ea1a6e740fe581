//! Header bar with marker counts

use dioxus::prelude::*;

use crate::state::AppState;
use crate::theme::{summary_text, PALETTE};

/// Title plus a live summary of reported potholes
#[component]
pub fn Header() -> Element {
    let state = use_context::<AppState>();
    let summary = (state.summary)();
    let [low, medium, high] = summary.active_by_severity;
    let summary_line = summary_text(&summary);

    rsx! {
        header {
            class: "header",
            style: "
                display: flex;
                align-items: baseline;
                gap: 16px;
                padding: 12px 16px;
                background: {PALETTE.bg_secondary};
                border-bottom: 1px solid {PALETTE.border};
            ",

            h1 {
                style: "margin: 0; font-size: 18px; color: {PALETTE.text_primary};",
                "Buracos"
            }

            span {
                style: "font-size: 13px; color: {PALETTE.text_primary};",
                "{summary_line}"
            }

            if summary.active > 0 {
                span {
                    style: "font-size: 12px; color: {PALETTE.text_secondary};",
                    "leves {low} · médios {medium} · graves {high}"
                }
            }

            if summary.resolved > 0 {
                span {
                    style: "font-size: 12px; color: {PALETTE.success};",
                    "✓ {summary.resolved}"
                }
            }
        }
    }
}
