//! Chart.js (2.x) configuration built from API payloads.
//!
//! Every chart on the dashboard is described by a [`ChartConfig`] that
//! serializes to the exact object the chart library expects. Tooltip text is
//! precomputed here per data point (`tooltipLabels` on each dataset) so the
//! renderer only has to look strings up.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{BattalionBreakdown, Dataset, LabelSeries, TrendSeries};
use crate::palette;

/// Headroom added above the API-provided maximum on trend charts.
pub const TREND_HEADROOM: f64 = 2.0;

const TITLE_FONT_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// How tooltip text is produced for a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipFormat {
    /// `"12 calls"`
    Unit(&'static str),
    /// `"Fire: 12 calls"`
    SeriesUnit(&'static str),
    /// `"Alarms: 10 (25.0%)"`
    Share,
}

/// Whether a single-dataset chart gets one color or one color per point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coloring {
    Single,
    PerPoint,
}

/// Fixed presentation of a single-series chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_begin_at_zero: bool,
    pub hourly_time_axis: bool,
    pub coloring: Coloring,
    pub tooltip: TooltipFormat,
}

pub const CALLS_PER_HOUR: ChartSpec = ChartSpec {
    kind: ChartKind::Line,
    dataset_label: "Average Calls",
    x_label: "Hour of Day",
    y_label: "Average Number of Calls",
    y_begin_at_zero: false,
    hourly_time_axis: true,
    coloring: Coloring::Single,
    tooltip: TooltipFormat::Unit("calls"),
};

pub const GROUP_RESPONSE_TIME: ChartSpec = ChartSpec {
    kind: ChartKind::Bar,
    dataset_label: "Average Response Time",
    x_label: "Call Type Group",
    y_label: "Average Response Time (minutes)",
    y_begin_at_zero: true,
    hourly_time_axis: false,
    coloring: Coloring::PerPoint,
    tooltip: TooltipFormat::Unit("mins"),
};

pub const BATTALION_DISTRIBUTION: ChartSpec = ChartSpec {
    kind: ChartKind::Bar,
    dataset_label: "Number of Calls by Battalion",
    x_label: "Battalion",
    y_label: "Number of Calls",
    y_begin_at_zero: true,
    hourly_time_axis: false,
    coloring: Coloring::PerPoint,
    tooltip: TooltipFormat::Unit("calls"),
};

// ---------------------------------------------------------------------------
// Serializable configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Styling passed through from API-provided datasets.
    #[serde(flatten)]
    pub style: Map<String, Value>,
    pub tooltip_labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltips: Option<Tooltips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub display: bool,
    pub text: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub y_axes: Vec<Axis>,
    pub x_axes: Vec<Axis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_label: Option<ScaleLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLabel {
    pub display: bool,
    pub label_string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_skip: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScale {
    pub parser: String,
    pub unit: String,
    pub unit_step_size: u32,
    pub display_formats: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltips {
    pub enabled: bool,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

/// What an existing chart instance needs to redraw with new data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartUpdate {
    pub data: ChartData,
    pub title: Option<String>,
    pub y_max: Option<f64>,
}

impl ChartConfig {
    /// Extract the parts of this configuration that change between fetches.
    pub fn update(&self) -> ChartUpdate {
        let y_max = self
            .options
            .scales
            .as_ref()
            .and_then(|s| s.y_axes.first())
            .and_then(|a| a.ticks.as_ref())
            .and_then(|t| t.max);
        ChartUpdate {
            data: self.data.clone(),
            title: self.options.title.as_ref().map(|t| t.text.clone()),
            y_max,
        }
    }
}

// ---------------------------------------------------------------------------
// Tooltip text
// ---------------------------------------------------------------------------

/// Render a number the way the chart library prints it: no trailing `.0`.
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// Share of `values[index]` in the total, as a percentage rounded to one decimal.
pub fn percent_of_total(values: &[f64], index: usize) -> f64 {
    let total: f64 = values.iter().sum();
    let Some(value) = values.get(index) else {
        return 0.0;
    };
    if total == 0.0 {
        return 0.0;
    }
    (value / total * 1000.0).round() / 10.0
}

/// Value and share, e.g. `"10 (25.0%)"`.
pub fn share_text(values: &[f64], index: usize) -> String {
    let value = values.get(index).copied().unwrap_or(0.0);
    format!(
        "{} ({:.1}%)",
        format_value(value),
        percent_of_total(values, index)
    )
}

/// Tooltip text for every point of one dataset.
pub fn tooltip_labels(
    format: TooltipFormat,
    series: &str,
    labels: &[String],
    values: &[f64],
) -> Vec<String> {
    (0..values.len())
        .map(|i| match format {
            TooltipFormat::Unit(unit) => format!("{} {}", format_value(values[i]), unit),
            TooltipFormat::SeriesUnit(unit) => {
                format!("{}: {} {}", series, format_value(values[i]), unit)
            }
            TooltipFormat::Share => {
                let label = labels.get(i).map(String::as_str).unwrap_or_default();
                format!("{}: {}", label, share_text(values, i))
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn scale_label(text: &str) -> Option<ScaleLabel> {
    Some(ScaleLabel {
        display: true,
        label_string: text.to_string(),
    })
}

fn single_tooltips() -> Option<Tooltips> {
    Some(Tooltips {
        enabled: true,
        mode: "single".to_string(),
    })
}

fn title(text: String) -> Option<Title> {
    Some(Title {
        display: true,
        text,
        font_size: TITLE_FONT_SIZE,
    })
}

fn hourly_time_scale() -> TimeScale {
    let display_formats = [("minute", "HH:mm"), ("hour", "HH:mm")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TimeScale {
        parser: "HH:mm".to_string(),
        unit: "hour".to_string(),
        unit_step_size: 1,
        display_formats,
    }
}

fn from_api_dataset(ds: &Dataset, tooltip_labels: Vec<String>) -> ChartDataset {
    ChartDataset {
        label: ds.label.clone(),
        data: ds.data.clone(),
        background_color: None,
        border_color: None,
        border_width: None,
        style: ds.style.clone(),
        tooltip_labels,
    }
}

/// Build a single-dataset line or bar chart from a label/value series.
pub fn series_chart(spec: &ChartSpec, series: &LabelSeries) -> ChartConfig {
    let colors = match spec.coloring {
        Coloring::Single => 1,
        Coloring::PerPoint => series.data.len(),
    };

    let dataset = ChartDataset {
        label: spec.dataset_label.to_string(),
        data: series.data.clone(),
        background_color: Some(palette::background_colors(colors)),
        border_color: Some(palette::border_colors(colors)),
        border_width: Some(1),
        style: Map::new(),
        tooltip_labels: tooltip_labels(
            spec.tooltip,
            spec.dataset_label,
            &series.labels,
            &series.data,
        ),
    };

    let y_axis = Axis {
        scale_label: scale_label(spec.y_label),
        ticks: spec.y_begin_at_zero.then(|| Ticks {
            begin_at_zero: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let x_axis = Axis {
        axis_type: spec.hourly_time_axis.then(|| "time".to_string()),
        time: spec.hourly_time_axis.then(hourly_time_scale),
        scale_label: scale_label(spec.x_label),
        ticks: Some(Ticks {
            auto_skip: Some(false),
            ..Default::default()
        }),
        ..Default::default()
    };

    ChartConfig {
        kind: spec.kind,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            scales: Some(Scales {
                y_axes: vec![y_axis],
                x_axes: vec![x_axis],
            }),
            tooltips: single_tooltips(),
            legend: Some(Legend { display: false }),
            ..Default::default()
        },
    }
}

pub fn breakdown_title(battalion: &str) -> String {
    format!("Call Type Distribution for Battalion {}", battalion)
}

/// Pie chart of call types for one battalion.
pub fn breakdown_chart(breakdown: &BattalionBreakdown) -> ChartConfig {
    let ds = &breakdown.dataset;
    let mut dataset = from_api_dataset(
        ds,
        tooltip_labels(TooltipFormat::Share, &ds.label, &breakdown.labels, &ds.data),
    );
    if !ds.style.contains_key("backgroundColor") {
        dataset.background_color = Some(palette::background_colors(ds.data.len()));
        dataset.border_color = Some(palette::border_colors(ds.data.len()));
        dataset.border_width = Some(1);
    }

    ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels: breakdown.labels.clone(),
            datasets: vec![dataset],
        },
        options: ChartOptions {
            responsive: Some(true),
            title: title(breakdown_title(&breakdown.battalion)),
            tooltips: single_tooltips(),
            ..Default::default()
        },
    }
}

/// Line chart with one series per dataset (incidents per day).
pub fn multi_series_chart(trends: &TrendSeries) -> ChartConfig {
    let datasets = trends
        .datasets
        .iter()
        .map(|ds| {
            from_api_dataset(
                ds,
                tooltip_labels(
                    TooltipFormat::SeriesUnit("calls"),
                    &ds.label,
                    &trends.labels,
                    &ds.data,
                ),
            )
        })
        .collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: trends.labels.clone(),
            datasets,
        },
        options: ChartOptions {
            responsive: Some(true),
            scales: Some(Scales {
                y_axes: vec![Axis {
                    scale_label: scale_label("Number of Incidents"),
                    ..Default::default()
                }],
                x_axes: vec![Axis {
                    scale_label: scale_label("Date"),
                    ticks: Some(Ticks {
                        auto_skip: Some(false),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
            }),
            tooltips: single_tooltips(),
            ..Default::default()
        },
    }
}

pub fn trend_title(neighborhood: &str) -> String {
    format!("Incident Trends for {}", neighborhood)
}

/// Stacked bar chart of incident types for one neighborhood.
///
/// Two y axes share the same bounds: a visible unstacked one carrying the
/// label and a hidden stacked one (`bar-y-axis`) that datasets may target.
pub fn trend_chart(trends: &TrendSeries) -> ChartConfig {
    let max = trends.limits.map(|l| l.max + TREND_HEADROOM);
    let bounded = || Ticks {
        begin_at_zero: Some(true),
        min: Some(0.0),
        max,
        ..Default::default()
    };

    let datasets = trends
        .datasets
        .iter()
        .map(|ds| {
            from_api_dataset(
                ds,
                tooltip_labels(
                    TooltipFormat::SeriesUnit("incidents"),
                    &ds.label,
                    &trends.labels,
                    &ds.data,
                ),
            )
        })
        .collect();

    let neighborhood = trends.neighborhood_district.as_deref().unwrap_or_default();

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: trends.labels.clone(),
            datasets,
        },
        options: ChartOptions {
            responsive: Some(true),
            title: title(trend_title(neighborhood)),
            scales: Some(Scales {
                y_axes: vec![
                    Axis {
                        stacked: Some(false),
                        ticks: Some(bounded()),
                        scale_label: scale_label("Total Number of Incidents"),
                        ..Default::default()
                    },
                    Axis {
                        id: Some("bar-y-axis".to_string()),
                        axis_type: Some("linear".to_string()),
                        stacked: Some(true),
                        display: Some(false),
                        ticks: Some(bounded()),
                        ..Default::default()
                    },
                ],
                x_axes: vec![Axis {
                    stacked: Some(true),
                    scale_label: scale_label("Date"),
                    ticks: Some(Ticks {
                        auto_skip: Some(false),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        },
    }
}
