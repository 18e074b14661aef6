use dioxus::prelude::*;
use dispatch_shared::models::NearbyMatch;

use crate::api::{self, NearbyQuery};
use crate::components::alert::{Alert, AlertKind, ErrorAlert};

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Hidden,
    Found(NearbyMatch),
    Failed(String),
}

/// Most-likely-dispatch form: address, time of day and search radius.
#[component]
pub fn NearbyForm() -> Element {
    let mut query = use_signal(NearbyQuery::default);
    let mut outcome = use_signal(|| Outcome::Hidden);

    let on_submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        let q = query.read().clone();
        outcome.set(Outcome::Hidden);
        spawn(async move {
            match api::fetch_nearby(&q).await {
                Ok(m) => outcome.set(Outcome::Found(m)),
                Err(e) => {
                    tracing::error!("nearby call lookup failed: {e}");
                    outcome.set(Outcome::Failed(e.alert_text()));
                }
            }
        });
    };

    rsx! {
        form { id: "dispatchTypeForm", onsubmit: on_submit,
            div { class: "form-group",
                label { r#for: "address", "Address" }
                input {
                    id: "address",
                    class: "form-control",
                    r#type: "text",
                    placeholder: "1 Dr Carlton B Goodlett Pl",
                    value: "{query.read().address}",
                    oninput: move |evt: Event<FormData>| {
                        query.write().address = evt.value();
                        outcome.set(Outcome::Hidden);
                    },
                }
            }
            div { class: "form-row",
                div { class: "form-group col",
                    label { r#for: "time", "Time" }
                    input {
                        id: "time",
                        class: "form-control",
                        r#type: "time",
                        step: "1",
                        value: "{query.read().time}",
                        oninput: move |evt: Event<FormData>| {
                            query.write().time = evt.value();
                            outcome.set(Outcome::Hidden);
                        },
                    }
                }
                div { class: "form-group col",
                    label { r#for: "radius", "Radius (miles)" }
                    input {
                        id: "radius",
                        class: "form-control",
                        r#type: "number",
                        min: "0",
                        step: "0.1",
                        value: "{query.read().radius}",
                        oninput: move |evt: Event<FormData>| {
                            query.write().radius = evt.value();
                            outcome.set(Outcome::Hidden);
                        },
                    }
                }
            }
            button { class: "btn btn-primary", r#type: "submit", "Find dispatch" }
        }
        div { id: "nearbyResults",
            match outcome.read().clone() {
                Outcome::Hidden => rsx! {},
                Outcome::Found(m) => rsx! {
                    Alert { kind: AlertKind::Info,
                        "Most likely dispatch required: "
                        b { {m.unit_type_match.unwrap_or_default()} }
                        " with "
                        i { {m.unit_type_match_count.map(|n| n.to_string()).unwrap_or_default()} }
                        " matching incidents."
                    }
                },
                Outcome::Failed(message) => rsx! {
                    ErrorAlert { message }
                },
            }
        }
    }
}
