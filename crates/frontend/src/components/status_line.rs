use dioxus::prelude::*;
use quake_shared::controller::RefreshStatus;

/// CSS class and text for a refresh status.
fn status_message(status: &RefreshStatus) -> (&'static str, String) {
    match status {
        RefreshStatus::Idle => ("status", String::new()),
        RefreshStatus::Loading { .. } => ("status loading", "Loading earthquakes…".to_string()),
        RefreshStatus::Loaded { count: 0 } => {
            ("status", "No earthquakes match this filter".to_string())
        }
        RefreshStatus::Loaded { count: 1 } => ("status", "Showing 1 earthquake".to_string()),
        RefreshStatus::Loaded { count } => ("status", format!("Showing {} earthquakes", count)),
        RefreshStatus::Failed { reason } => (
            "status error",
            format!("Could not load earthquakes ({})", reason),
        ),
    }
}

#[component]
pub fn StatusLine(status: RefreshStatus) -> Element {
    let (class, text) = status_message(&status);
    rsx! {
        div { id: "quake-status", class: "{class}", role: "status", "{text}" }
    }
}
