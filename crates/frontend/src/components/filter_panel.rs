use dioxus::prelude::*;
use quake_shared::filter::FilterInput;

/// Magnitude and date-range controls. Element ids are the ones the backend's
/// page template has always used.
#[component]
pub fn FilterPanel(filter: Signal<FilterInput>, on_filter: EventHandler<()>) -> Element {
    let current = filter.read().clone();

    rsx! {
        div { class: "panel",
            h3 { "Filter" }
            form {
                onsubmit: move |evt: Event<FormData>| {
                    evt.prevent_default();
                    on_filter.call(());
                },
                label { r#for: "min_magnitud", "Minimum magnitude" }
                input {
                    id: "min_magnitud",
                    r#type: "number",
                    min: "0",
                    max: "10",
                    step: "0.1",
                    placeholder: "0",
                    value: "{current.min_magnitude}",
                    oninput: move |evt: Event<FormData>| {
                        filter.write().min_magnitude = evt.value();
                    },
                }
                label { r#for: "start_time", "From" }
                input {
                    id: "start_time",
                    r#type: "date",
                    value: "{current.start_date}",
                    oninput: move |evt: Event<FormData>| {
                        filter.write().start_date = evt.value();
                    },
                }
                label { r#for: "end_time", "To" }
                input {
                    id: "end_time",
                    r#type: "date",
                    value: "{current.end_date}",
                    oninput: move |evt: Event<FormData>| {
                        filter.write().end_date = evt.value();
                    },
                }
                div { style: "margin-top: 8px;",
                    button { id: "btn_filtrar", r#type: "submit", "Filter" }
                }
            }
        }
    }
}
