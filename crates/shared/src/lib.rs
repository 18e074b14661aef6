pub mod cache;
pub mod chart;
pub mod endpoints;
pub mod heatmap;
pub mod models;
pub mod palette;
pub mod table;
