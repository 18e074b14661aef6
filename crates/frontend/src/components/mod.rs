pub mod alert;
pub mod chart_canvas;
pub mod data_table;
pub mod heatmap_view;
pub mod nearby_form;
