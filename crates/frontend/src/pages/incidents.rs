use dioxus::prelude::*;
use dispatch_shared::chart::{multi_series_chart, trend_chart};
use dispatch_shared::models::TrendSeries;
use dispatch_shared::table::{SortKey, SortOrder};

use super::{use_page_load, use_selection, SelectionResults};
use crate::api;
use crate::components::chart_canvas::ChartCanvas;
use crate::components::data_table::{Column, DataTable};

/// Neighborhood pre-selected to show an annotated example.
const EXAMPLE_NEIGHBORHOOD: &str = "Sunset/Parkside";

const SAFEST_COLUMNS: [Column; 3] = [
    Column {
        header: "Neighborhood",
        field: "neighborhood_district",
    },
    Column {
        header: "Incidents",
        field: "incidents",
    },
    Column {
        header: "Calls",
        field: "calls",
    },
];

/// Pick the example neighborhood when offered, otherwise the first one.
fn initial_neighborhood(list: &[String]) -> Option<&String> {
    list.iter()
        .find(|n| n.as_str() == EXAMPLE_NEIGHBORHOOD)
        .or_else(|| list.first())
}

#[component]
pub fn Incidents() -> Element {
    let per_day = use_page_load("incidents per day", || async {
        api::fetch_incidents_per_day()
            .await
            .map(|t| multi_series_chart(&t))
    });
    let neighborhoods =
        use_page_load("neighborhood list", || async { api::fetch_neighborhoods().await });
    let safest = use_page_load("safest neighborhoods", || async {
        api::fetch_safest_neighborhoods().await
    });

    let trend = use_selection::<TrendSeries>();
    let trend_config = use_memo(move || trend.current().map(|t| trend_chart(&t)));

    let submit_neighborhood = move |neighborhood: String| {
        trend.submit(neighborhood, |n| async move {
            api::fetch_neighborhood_trend(&n).await
        });
    };

    use_effect(move || {
        if let Some(initial) = neighborhoods
            .read()
            .as_ref()
            .and_then(|list| initial_neighborhood(list).cloned())
        {
            submit_neighborhood(initial);
        }
    });

    let neighborhood_list = neighborhoods.read().clone().unwrap_or_default();
    let show_example = trend.selected() == EXAMPLE_NEIGHBORHOOD;

    rsx! {
        div { class: "container",
            h1 { "Incident Metrics" }

            div { class: "row",
                div { class: "col-lg-12",
                    h4 { "Incidents per Day" }
                    ChartCanvas { id: "incidentsPerDay", config: per_day }
                }
            }

            div { class: "row",
                div { class: "col-lg-12",
                    h4 { "Neighborhood Trends" }
                    form {
                        id: "neighborhoodTrendForm",
                        onsubmit: move |evt: Event<FormData>| {
                            evt.prevent_default();
                            submit_neighborhood(trend.selected());
                        },
                        select {
                            id: "neighborhood",
                            class: "form-control",
                            "aria-label": "Select neighborhood",
                            onchange: move |evt: Event<FormData>| submit_neighborhood(evt.value()),
                            for n in neighborhood_list {
                                option {
                                    value: "{n}",
                                    selected: trend.selected() == n,
                                    "{n}"
                                }
                            }
                        }
                    }
                    if show_example {
                        p { id: "trendExample", class: "text-muted mt-2",
                            "Example: in Sunset/Parkside the stacked bars show which call types make up each day's total. "
                            "Days where a single type dominates the stack stand out against the total line."
                        }
                    }
                    SelectionResults { id: "trendResults", failure: trend.failure(),
                        ChartCanvas { id: "neighborhoodTrendsChart", config: trend_config }
                    }
                }
            }

            div { class: "row",
                div { class: "col-lg-12",
                    h4 { "Safest Neighborhoods" }
                    DataTable {
                        columns: SAFEST_COLUMNS.to_vec(),
                        rows: safest.read().clone().unwrap_or_default(),
                        initial_sort: SortKey { column: 1, order: SortOrder::Ascending },
                        paged: true,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial_neighborhood_prefers_example() {
        let list = names(&["Bayview Hunters Point", "Mission", "Sunset/Parkside"]);
        assert_eq!(initial_neighborhood(&list).unwrap(), "Sunset/Parkside");
    }

    #[test]
    fn test_initial_neighborhood_falls_back_to_first() {
        let list = names(&["Bayview Hunters Point", "Mission"]);
        assert_eq!(initial_neighborhood(&list).unwrap(), "Bayview Hunters Point");
        assert!(initial_neighborhood(&[]).is_none());
    }
}
