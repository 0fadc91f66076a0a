mod api;
mod components;
mod config;
mod coords;
mod pages;

use dioxus::prelude::*;
use pages::quake_map::QuakeMap;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[redirect("/mapa", || Route::QuakeMap {})]
    #[route("/")]
    QuakeMap {},
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
