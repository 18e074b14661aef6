mod api;
mod components;
mod pages;

use dioxus::prelude::*;

use pages::heatmaps::Heatmaps;
use pages::incidents::Incidents;
use pages::metrics::Metrics;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(NavBar)]
    #[route("/")]
    Metrics {},
    #[route("/heatmaps")]
    Heatmaps {},
    #[route("/incidents")]
    Incidents {},
}

#[component]
fn NavBar() -> Element {
    rsx! {
        nav { class: "navbar navbar-expand navbar-dark bg-dark mb-4",
            span { class: "navbar-brand", "SF Fire Dispatch" }
            div { class: "navbar-nav",
                Link { class: "nav-item nav-link", active_class: "active", to: Route::Metrics {}, "Dispatch" }
                Link { class: "nav-item nav-link", active_class: "active", to: Route::Incidents {}, "Incidents" }
                Link { class: "nav-item nav-link", active_class: "active", to: Route::Heatmaps {}, "Heatmaps" }
            }
        }
        Outlet::<Route> {}
    }
}

const CSS: Asset = asset!("/assets/main.css");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
