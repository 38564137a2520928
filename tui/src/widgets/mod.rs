pub mod chart;
pub mod status_bar;

pub use chart::{chart_lines, palette_color};
pub use status_bar::StatusBar;
