use dioxus::prelude::*;
use dispatch_shared::models::{GeoPoint, Row};

use super::use_page_load;
use crate::api;
use crate::components::data_table::{Column, DataTable};
use crate::components::heatmap_view::HeatmapView;

/// Rows shown in the longest-dispatch table.
const DISPATCH_TABLE_ROWS: usize = 20;

const DISPATCH_COLUMNS: [Column; 3] = [
    Column {
        header: "Address",
        field: "address",
    },
    Column {
        header: "Avg. Dispatch Time",
        field: "avg_dispatch_time",
    },
    Column {
        header: "Calls",
        field: "count",
    },
];

fn dispatch_rows(points: &[GeoPoint]) -> Vec<Row> {
    points
        .iter()
        .take(DISPATCH_TABLE_ROWS)
        .map(GeoPoint::to_row)
        .collect()
}

#[component]
pub fn Heatmaps() -> Element {
    let longest_dispatch =
        use_page_load("longest dispatch", || async { api::fetch_longest_dispatch().await });
    let address_frequency =
        use_page_load("address frequency", || async { api::fetch_address_frequency().await });

    let rows = longest_dispatch
        .read()
        .as_deref()
        .map(dispatch_rows)
        .unwrap_or_default();

    rsx! {
        div { class: "container",
            h1 { "Heatmaps" }

            div { class: "row",
                div { class: "col-lg-6",
                    h4 { "Longest Dispatch Times" }
                    HeatmapView { id: "dispatchTimeMap", points: longest_dispatch }
                }
                div { class: "col-lg-6",
                    h4 { "Most Frequent Addresses" }
                    HeatmapView { id: "addressFreqMap", points: address_frequency }
                }
            }

            div { class: "row",
                div { class: "col-lg-12",
                    h4 { "Addresses with the Longest Dispatch Times" }
                    DataTable {
                        columns: DISPATCH_COLUMNS.to_vec(),
                        rows,
                        highlight: "count",
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(n: u32) -> GeoPoint {
        GeoPoint {
            lat: 37.7,
            lng: -122.4,
            count: Some(n),
            address: Some(format!("{n} MARKET ST")),
            avg_dispatch_time: Some("0:05:00".to_string()),
        }
    }

    #[test]
    fn test_dispatch_rows_capped_at_twenty() {
        let points: Vec<GeoPoint> = (0..35).map(point).collect();
        let rows = dispatch_rows(&points);
        assert_eq!(rows.len(), DISPATCH_TABLE_ROWS);
        assert_eq!(rows[0]["address"], "0 MARKET ST");
    }

    #[test]
    fn test_dispatch_rows_short_response() {
        let rows = dispatch_rows(&[point(4)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["count"], 4);
        assert_eq!(rows[0]["avg_dispatch_time"], "0:05:00");
    }
}
