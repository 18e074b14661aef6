use dioxus::prelude::*;
use dispatch_shared::chart::{
    breakdown_chart, series_chart, BATTALION_DISTRIBUTION, CALLS_PER_HOUR, GROUP_RESPONSE_TIME,
};
use dispatch_shared::models::BattalionBreakdown;

use super::{use_page_load, use_selection, SelectionResults};
use crate::api;
use crate::components::chart_canvas::ChartCanvas;
use crate::components::nearby_form::NearbyForm;

/// Dispatch metrics: static charts, the nearby-dispatch form and the
/// per-battalion call-type breakdown.
#[component]
pub fn Metrics() -> Element {
    let group_response_time = use_page_load("group response time", || async {
        api::fetch_group_response_time()
            .await
            .map(|s| series_chart(&GROUP_RESPONSE_TIME, &s))
    });
    let calls_per_hour = use_page_load("calls per hour", || async {
        api::fetch_calls_per_hour()
            .await
            .map(|s| series_chart(&CALLS_PER_HOUR, &s))
    });
    let battalion_distribution = use_page_load("battalion distribution", || async {
        api::fetch_battalion_distribution()
            .await
            .map(|s| series_chart(&BATTALION_DISTRIBUTION, &s))
    });
    let battalions = use_page_load("battalion list", || async { api::fetch_battalions().await });

    let breakdown = use_selection::<BattalionBreakdown>();
    let breakdown_config = use_memo(move || breakdown.current().map(|b| breakdown_chart(&b)));

    let submit_battalion = move |battalion: String| {
        breakdown.submit(battalion, |b| async move {
            api::fetch_battalion_breakdown(&b).await
        });
    };

    // Show the first battalion as soon as the list arrives.
    use_effect(move || {
        if let Some(first) = battalions.read().as_ref().and_then(|list| list.first()) {
            submit_battalion(first.clone());
        }
    });

    let battalion_list = battalions.read().clone().unwrap_or_default();

    rsx! {
        div { class: "container",
            h1 { "Dispatch Metrics" }

            div { class: "row",
                div { class: "col-lg-6",
                    h4 { "Average Response Time by Call Type Group" }
                    ChartCanvas { id: "typeResponseTime", config: group_response_time }
                }
                div { class: "col-lg-6",
                    h4 { "Average Calls per Hour" }
                    ChartCanvas { id: "avgCallsPerHour", config: calls_per_hour }
                }
            }

            div { class: "row",
                div { class: "col-lg-6",
                    h4 { "Most Likely Dispatch" }
                    NearbyForm {}
                }
                div { class: "col-lg-6",
                    h4 { "Calls by Battalion" }
                    ChartCanvas { id: "battalionDistrib", config: battalion_distribution }
                }
            }

            div { class: "row",
                div { class: "col-lg-12",
                    h4 { "Battalion Call Types" }
                    form {
                        id: "battalionDistForm",
                        onsubmit: move |evt: Event<FormData>| {
                            evt.prevent_default();
                            submit_battalion(breakdown.selected());
                        },
                        select {
                            id: "battalion",
                            class: "form-control",
                            "aria-label": "Select battalion",
                            onchange: move |evt: Event<FormData>| submit_battalion(evt.value()),
                            for b in battalion_list {
                                option {
                                    value: "{b}",
                                    selected: breakdown.selected() == b,
                                    "{b}"
                                }
                            }
                        }
                    }
                    SelectionResults { id: "trendResults", failure: breakdown.failure(),
                        ChartCanvas { id: "battalionDistChart", config: breakdown_config }
                    }
                }
            }
        }
    }
}
