use chrono::{NaiveDate, Utc};
use dioxus::prelude::*;
use quake_shared::controller::MapViewController;
use quake_shared::filter::FilterInput;

use crate::api;
use crate::components::filter_panel::FilterPanel;
use crate::components::map_view::MapView;
use crate::components::status_line::StatusLine;
use crate::config;

/// The end-date default follows the UTC calendar day.
fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[component]
pub fn QuakeMap() -> Element {
    let config = use_signal(config::map_config);
    let mut controller = use_signal(|| MapViewController::new(&config.peek()));
    let filter = use_signal(FilterInput::default);

    // One filter → fetch → render pass. Peeks so the mount effect below does
    // not subscribe to the filter and re-fire on every keystroke.
    let mut refresh = move || {
        let ticket = controller
            .write()
            .begin_refresh(&filter.peek(), today_utc());
        let config = config.peek().clone();
        spawn(async move {
            let result = api::fetch_events(&config, &ticket.filter).await;
            controller.write().complete_refresh(ticket.request, result);
        });
    };

    // Initial load
    use_effect(move || refresh());

    let status = controller.read().status().clone();

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Earthquake Map" }
                StatusLine { status: status }
            }

            div { class: "sidebar",
                FilterPanel {
                    filter: filter,
                    on_filter: move |_| refresh(),
                }
            }

            MapView {
                controller: controller,
                config: config.read().clone(),
            }
        }
    }
}
